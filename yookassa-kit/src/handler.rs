//! Payment operations.
//!
//! A [`PaymentHandler`] carries the state of one logical operation: a reference to the
//! shared [`Client`] and a single idempotency key slot. Every dispatch consumes the slot,
//! so a key set for one request can never leak into the next one.
//!
//! ```no_run
//! use yookassa_kit::{
//!     client::Client,
//!     confirmation::Confirmation,
//!     handler::PaymentHandler,
//!     payment::Payment,
//!     types::Amount,
//! };
//!
//! # async fn create() -> Result<(), yookassa_kit::errors::ClientError> {
//! let client = Client::new("100001", "test_secret");
//! let mut handler = PaymentHandler::new(&client);
//!
//! let request = Payment::builder()
//!     .amount(Amount::rub("100.00"))
//!     .capture(true)
//!     .confirmation(Confirmation::embedded())
//!     .description("Order No. 72")
//!     .build();
//!
//! let payment = handler
//!     .set_idempotency_key("order-72")
//!     .create_payment(&request)
//!     .await?;
//! let token = payment.confirmation_token()?;
//! # let _ = token;
//! # Ok(())
//! # }
//! ```
//!
//! To retry after a transport failure, set the same key again and resend:
//!
//! ```no_run
//! # use yookassa_kit::{client::Client, handler::PaymentHandler, payment::Payment};
//! # async fn retry(client: &Client, request: &Payment) -> Result<Payment, yookassa_kit::errors::ClientError> {
//! let mut handler = PaymentHandler::new(client);
//! let key = "order-72";
//!
//! match handler.set_idempotency_key(key).create_payment(request).await {
//!     Err(yookassa_kit::errors::ClientError::Transport(_)) => {
//!         handler.set_idempotency_key(key).create_payment(request).await
//!     }
//!     other => other,
//! }
//! # }
//! ```

use http::Method;
use serde::{Serialize, de::DeserializeOwned};
use yookassa_core::{
    idempotency::{IdempotencyKey, IdempotencySlot},
    payment::{Payment, PaymentList, PaymentListFilter},
    types::Record,
};

use crate::{
    client::Client,
    errors::{ApiError, ClientError},
};

const PAYMENTS: &str = "payments";

/// Per-operation handler for payment endpoints.
///
/// Not meant to be shared between concurrent operations: create one handler per
/// in-flight logical operation. All methods take `&mut self`.
#[derive(Debug)]
pub struct PaymentHandler<'c> {
    client: &'c Client,
    idempotency: IdempotencySlot,
}

impl<'c> PaymentHandler<'c> {
    pub fn new(client: &'c Client) -> Self {
        PaymentHandler {
            client,
            idempotency: IdempotencySlot::new(),
        }
    }

    /// Use `key` for the next dispatched request.
    ///
    /// Ignored while a previously set key has not been consumed. Returns this same
    /// handler, not a copy, so the call can be chained with an operation.
    pub fn set_idempotency_key(&mut self, key: impl Into<IdempotencyKey>) -> &mut Self {
        self.idempotency.set(key);
        self
    }

    /// The key the next request will use, if one was set.
    pub fn idempotency_key(&self) -> Option<&IdempotencyKey> {
        self.idempotency.peek()
    }

    /// Create a payment.
    pub async fn create_payment(&mut self, payment: &Payment) -> Result<Payment, ClientError> {
        let body = encode(payment)?;
        let response = self.dispatch(Method::POST, PAYMENTS, body, None).await?;
        let created: Payment = decode(response).await?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            payment_id = created.id.as_deref().unwrap_or_default(),
            status = created.status.map(|s| s.as_str()).unwrap_or_default(),
            "Payment created"
        );

        Ok(created)
    }

    /// Fetch a payment by ID.
    pub async fn find_payment(&mut self, payment_id: &str) -> Result<Payment, ClientError> {
        let endpoint = format!("{PAYMENTS}/{payment_id}");
        let response = self
            .dispatch(Method::GET, &endpoint, Vec::new(), None)
            .await?;
        decode(response).await
    }

    /// Capture a `waiting_for_capture` payment.
    ///
    /// Only the fields set on `payment` are sent, e.g. an amount for a partial capture.
    pub async fn capture_payment(
        &mut self,
        payment_id: &str,
        payment: &Payment,
    ) -> Result<Payment, ClientError> {
        let endpoint = format!("{PAYMENTS}/{payment_id}/capture");
        let body = encode(payment)?;
        let response = self.dispatch(Method::POST, &endpoint, body, None).await?;
        decode(response).await
    }

    /// Cancel a `waiting_for_capture` payment.
    pub async fn cancel_payment(&mut self, payment_id: &str) -> Result<Payment, ClientError> {
        let endpoint = format!("{PAYMENTS}/{payment_id}/cancel");
        let response = self
            .dispatch(Method::POST, &endpoint, Vec::new(), None)
            .await?;
        decode(response).await
    }

    /// List payments matching `filter`.
    pub async fn list_payments(
        &mut self,
        filter: &PaymentListFilter,
    ) -> Result<PaymentList, ClientError> {
        let params = filter.to_params();
        let response = self
            .dispatch(Method::GET, PAYMENTS, Vec::new(), Some(&params))
            .await?;
        decode(response).await
    }

    /// Consume the idempotency slot and send one request.
    async fn dispatch(
        &mut self,
        method: Method,
        endpoint: &str,
        body: Vec<u8>,
        params: Option<&Record<String>>,
    ) -> Result<reqwest::Response, ClientError> {
        let key = self.idempotency.consume_or_generate();
        self.client
            .make_request(method, endpoint, body, params, Some(key))
            .await
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ClientError> {
    Ok(serde_json::to_vec(value)?)
}

/// Decode a 2xx body into `T`, anything else into [`ClientError::Api`].
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        status = status.as_u16(),
        body_len = body.len(),
        "Decoding YooKassa response"
    );

    if status.is_success() {
        return Ok(serde_json::from_slice(&body)?);
    }

    let error = serde_json::from_slice::<ApiError>(&body).unwrap_or_else(|_| ApiError {
        description: Some(String::from_utf8_lossy(&body).into_owned()),
        ..ApiError::default()
    });

    Err(ClientError::Api { status, error })
}
