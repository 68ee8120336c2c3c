use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sfclaw_salesforce::{CredentialOverrides, Credentials};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "sfclaw.yaml";
pub const CONFIG_PATH_ENV: &str = "SFCLAW_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Fields left out here are read from `SALESFORCE_*` variables.
    #[serde(default)]
    pub salesforce: CredentialOverrides,
}

impl Config {
    pub fn path() -> PathBuf {
        std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Load the config file if present; an absent file means "env only".
    pub fn load() -> Result<Self> {
        let path = Self::path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn credentials(&self) -> Result<Credentials> {
        Credentials::resolve(self.salesforce.clone())
            .context("Salesforce credentials are incomplete")
    }
}
