//! HTTP request dispatch.
//!
//! [`Client`] owns the credentials and the underlying [`reqwest::Client`]. It builds one
//! authenticated request per call and sends it exactly once: there is no retry loop and
//! no interpretation of the response status here.

use http::{HeaderName, Method, header::CONTENT_TYPE};
use yookassa_core::{idempotency::IdempotencyKey, types::Record};

use crate::{
    config::ClientConfig,
    errors::{ClientError, ConfigError},
};

/// Header carrying the idempotency key of a mutating request.
pub const IDEMPOTENCE_KEY: HeaderName = HeaderName::from_static("idempotence-key");

/// Whether requests with `method` change state on the server and need an idempotency key.
///
/// ```
/// use http::Method;
/// use yookassa_kit::client::is_mutating;
///
/// assert!(is_mutating(&Method::POST));
/// assert!(!is_mutating(&Method::GET));
/// ```
pub fn is_mutating(method: &Method) -> bool {
    !method.is_safe()
}

/// A YooKassa API client.
///
/// Construct it once and share it by reference; it holds no per-operation state and
/// cloning it is cheap.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
}

impl Client {
    pub fn new(account_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Client::from_config(ClientConfig::new(account_id, secret_key))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Client {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Build a client from `YOOKASSA_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        ClientConfig::from_env().map(Client::from_config)
    }

    /// Use a custom transport, e.g. one with timeouts or a proxy configured.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the request [`make_request`](Client::make_request) would send.
    ///
    /// Mutating methods get a JSON content type and an `Idempotence-Key` header; a key is
    /// generated when `idempotency_key` is `None` or empty. Read-only methods never carry
    /// the header.
    pub fn build_request(
        &self,
        method: Method,
        endpoint: &str,
        body: Vec<u8>,
        params: Option<&Record<String>>,
        idempotency_key: Option<IdempotencyKey>,
    ) -> Result<reqwest::Request, ClientError> {
        let url = self.config.endpoint_url(endpoint)?;
        let mutating = is_mutating(&method);

        let mut builder = self
            .http
            .request(method, url)
            .basic_auth(&self.config.account_id, Some(&self.config.secret_key));

        if let Some(params) = params {
            builder = builder.query(params);
        }

        if mutating {
            let key = idempotency_key
                .filter(|k| !k.is_empty())
                .unwrap_or_else(IdempotencyKey::generate);
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .header(IDEMPOTENCE_KEY, key.as_str());
        }

        if !body.is_empty() {
            builder = builder.body(body);
        }

        builder.build().map_err(ClientError::InvalidRequest)
    }

    /// Send one request and return the raw response.
    ///
    /// Transport failures are returned unchanged and non-2xx statuses are not treated as
    /// errors; both are left to the caller.
    pub async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        body: Vec<u8>,
        params: Option<&Record<String>>,
        idempotency_key: Option<IdempotencyKey>,
    ) -> Result<reqwest::Response, ClientError> {
        let request = self.build_request(method, endpoint, body, params, idempotency_key)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            method = %request.method(),
            url = %request.url(),
            "Dispatching YooKassa request"
        );

        self.http.execute(request).await.map_err(|err| {
            if err.is_builder() {
                ClientError::InvalidRequest(err)
            } else {
                ClientError::Transport(err)
            }
        })
    }
}
