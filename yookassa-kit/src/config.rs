//! Client configuration.

use std::fmt::Debug;

use bon::Builder;
use url::Url;

use crate::errors::ConfigError;

/// Production API root.
pub const BASE_URL: &str = "https://api.yookassa.ru/v3/";

/// Environment variable holding the shop (account) ID.
pub const ACCOUNT_ID_VAR: &str = "YOOKASSA_ACCOUNT_ID";
/// Environment variable holding the secret key.
pub const SECRET_KEY_VAR: &str = "YOOKASSA_SECRET_KEY";
/// Environment variable overriding [`BASE_URL`].
pub const BASE_URL_VAR: &str = "YOOKASSA_BASE_URL";

/// Credentials and endpoint used by a [`Client`](crate::client::Client).
///
/// ```
/// use yookassa_kit::config::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .account_id("100001")
///     .secret_key("test_secret")
///     .build();
///
/// assert_eq!(config.base_url, "https://api.yookassa.ru/v3/");
/// assert!(!format!("{config:?}").contains("test_secret"));
/// ```
#[derive(Builder, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Shop ID, used as the Basic auth user name.
    #[builder(into)]
    pub account_id: String,
    /// Secret key, used as the Basic auth password.
    #[builder(into)]
    pub secret_key: String,
    /// API root every endpoint is appended to.
    #[builder(into, default = BASE_URL.to_owned())]
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(account_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        ClientConfig::builder()
            .account_id(account_id)
            .secret_key(secret_key)
            .build()
    }

    /// Read the configuration from `YOOKASSA_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        let account_id = required(ACCOUNT_ID_VAR)?;
        let secret_key = required(SECRET_KEY_VAR)?;
        let base_url = lookup(BASE_URL_VAR)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| BASE_URL.to_owned());
        Url::parse(&base_url)?;

        Ok(ClientConfig {
            account_id,
            secret_key,
            base_url,
        })
    }

    /// Full URL of `endpoint` under the configured base.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        ))
    }
}

impl Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("account_id", &self.account_id)
            .field("secret_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}
