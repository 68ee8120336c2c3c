use crate::error::{Result, SalesforceError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ENV_USERNAME: &str = "SALESFORCE_USERNAME";
pub const ENV_PASSWORD: &str = "SALESFORCE_PASSWORD";
pub const ENV_SECURITY_TOKEN: &str = "SALESFORCE_SECURITY_TOKEN";
pub const ENV_DOMAIN: &str = "SALESFORCE_DOMAIN";

pub const DEFAULT_DOMAIN: &str = "login";
pub const DEFAULT_API_VERSION: &str = "59.0";

/// Username-password login material for a Salesforce org.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub security_token: String,
    /// `login` for production, `test` for sandboxes, or a My Domain prefix.
    pub domain: String,
    pub api_version: String,
}

/// Explicitly supplied credential fields. Anything left as `None` is read
/// from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialOverrides {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub security_token: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            security_token: String::new(),
            domain: DEFAULT_DOMAIN.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    pub fn with_security_token(mut self, token: impl Into<String>) -> Self {
        self.security_token = token.into();
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Merge explicit values over `SALESFORCE_*` environment variables.
    pub fn resolve(overrides: CredentialOverrides) -> Result<Self> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    pub fn resolve_with<F>(overrides: CredentialOverrides, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |explicit: Option<String>, key: &str| {
            explicit
                .or_else(|| lookup(key))
                .filter(|value| !value.trim().is_empty())
        };

        let username = pick(overrides.username, ENV_USERNAME)
            .ok_or(SalesforceError::MissingCredential(ENV_USERNAME))?;
        let password = pick(overrides.password, ENV_PASSWORD)
            .ok_or(SalesforceError::MissingCredential(ENV_PASSWORD))?;
        let security_token = pick(overrides.security_token, ENV_SECURITY_TOKEN).unwrap_or_default();
        let domain =
            pick(overrides.domain, ENV_DOMAIN).unwrap_or_else(|| DEFAULT_DOMAIN.to_string());
        let api_version = overrides
            .api_version
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        Ok(Self {
            username,
            password,
            security_token,
            domain,
            api_version,
        })
    }

    /// SOAP login endpoint for the configured domain.
    pub fn login_url(&self) -> String {
        let domain = self.domain.trim_end_matches(".salesforce.com");
        format!(
            "https://{}.salesforce.com/services/Soap/u/{}",
            domain, self.api_version
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("security_token", &"<redacted>")
            .field("domain", &self.domain)
            .field("api_version", &self.api_version)
            .finish()
    }
}
