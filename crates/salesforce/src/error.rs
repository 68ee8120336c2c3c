use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalesforceError {
    #[error("Missing Salesforce credential: {0}")]
    MissingCredential(&'static str),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Salesforce API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    /// The background task running the login panicked or was cancelled.
    #[error("Login task failed: {0}")]
    TaskFailed(String),
}

impl From<reqwest::Error> for SalesforceError {
    fn from(err: reqwest::Error) -> Self {
        SalesforceError::Http(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SalesforceError>;
