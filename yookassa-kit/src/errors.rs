//! Error types returned by the client.

use std::fmt::Display;

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Error body returned by the API for non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Always `"error"`.
    #[serde(rename = "type", default)]
    pub error_type: String,
    /// Error ID, useful when contacting support.
    #[serde(default)]
    pub id: String,
    /// Machine readable code, e.g. `invalid_request`.
    #[serde(default)]
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Name of the offending request parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)?;
        if let Some(description) = &self.description {
            write!(f, ": {description}")?;
        }
        if let Some(parameter) = &self.parameter {
            write!(f, " (parameter `{parameter}`)")?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Network or HTTP library failure, passed through as is.
    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request could not be built, e.g. an idempotency key that is not a valid
    /// header value. Nothing was sent, so resending the same input fails again.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[source] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Serialization/Deserialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// The API answered with a non-2xx status.
    #[error("API error ({status}): {error}")]
    Api { status: StatusCode, error: ApiError },

    /// A polymorphic field could not be resolved.
    #[error("Resolve error: {0}")]
    Resolve(#[from] yookassa_core::errors::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable `{0}` is not set")]
    MissingVar(&'static str),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}
