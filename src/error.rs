use thiserror::Error;

/// Everything that can go wrong between a UI event and the memo API.
#[derive(Error, Debug)]
pub enum MemoError {
    /// Rejected locally, no request was issued.
    #[error("{0}")]
    Validation(String),

    /// Non-2xx answer carrying the server's own error text.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("server connection failed: {0}")]
    Connection(#[from] reqwest::Error),

    #[error("category does not exist: {0}")]
    UnknownCategory(String),

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("input error: {0}")]
    Input(String),
}

pub type Result<T> = std::result::Result<T, MemoError>;

pub const EMPTY_FIELDS: &str = "Please enter both content and password.";
pub const EMPTY_PASSWORD: &str = "Please enter the memo password.";
pub const CONNECTION_FAILED: &str = "Server connection failed.";
pub const CATEGORY_MISSING: &str = "Category does not exist.";

impl MemoError {
    /// Text shown to the user when this error ends an operation.
    pub fn alert_text(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Server { message, .. } => message.clone(),
            Self::Connection(_) => CONNECTION_FAILED.to_string(),
            Self::UnknownCategory(_) => CATEGORY_MISSING.to_string(),
            Self::Decode(message) | Self::Config(message) | Self::Input(message) => {
                message.clone()
            }
        }
    }

    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server { .. })
    }
}
