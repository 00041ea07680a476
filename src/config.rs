use std::time::Duration;

use reqwest::Url;

use crate::error::{MemoError, Result};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How the memo password travels to the server. Create, delete and edit all
/// use the same mode, so pick the one the paired server expects.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PasswordMode {
    /// SHA-256 hex digest computed on the client.
    #[default]
    #[value(alias = "sha256")]
    Digest,
    /// Raw password as typed.
    Plain,
}

impl PasswordMode {
    pub fn encode(self, password: &str) -> String {
        match self {
            Self::Digest => sha256::digest(password),
            Self::Plain => password.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base: String,
    pub password_mode: PasswordMode,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            password_mode: PasswordMode::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;
        if self.timeout_secs == 0 {
            return Err(MemoError::Config("timeout must be at least one second".into()));
        }
        Ok(())
    }

    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.api_base)
            .map_err(|e| MemoError::Config(format!("invalid api base {}: {e}", self.api_base)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(MemoError::Config(format!("unsupported scheme: {scheme}"))),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
