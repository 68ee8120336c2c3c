pub mod client;
pub mod credentials;
pub mod error;
pub mod login;
pub mod rest;

pub use client::SalesforceClient;
pub use credentials::{CredentialOverrides, Credentials, DEFAULT_API_VERSION};
pub use error::SalesforceError;
pub use login::Session;
pub use rest::RestClient;
