use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::config::{Config, PasswordMode};
use crate::error::{MemoError, Result};
use crate::modules::common::{endpoint, ErrorBody};

/// Handle shared by every API call: one HTTP client, the API base and the
/// password contract agreed with the server.
#[derive(Clone, Debug)]
pub struct ApiClient {
    pub http: Client,
    pub base: Url,
    pub password_mode: PasswordMode,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http,
            base: config.base_url()?,
            password_mode: config.password_mode,
        })
    }

    pub fn url(&self, segments: &[&str]) -> Result<Url> {
        endpoint(&self.base, segments)
    }

    pub fn encode_password(&self, password: &str) -> String {
        self.password_mode.encode(password)
    }
}

/// Turns a non-2xx response into `MemoError::Server`, keeping the server's
/// `{error}` text when it sent one.
pub async fn server_error(response: Response) -> MemoError {
    let status = response.status();

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
    };

    tracing::warn!(status = status.as_u16(), %message, "memo api returned an error");

    MemoError::Server {
        status: status.as_u16(),
        message,
    }
}

pub async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| MemoError::Decode(e.to_string()))
}
