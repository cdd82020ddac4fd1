//! # YooKassa Kit
//!
//! A client for the YooKassa payment API built around two guarantees:
//!
//! - **Safe retries.** Every mutating request carries an `Idempotence-Key`. A
//!   [`PaymentHandler`](handler::PaymentHandler) hands its key to exactly one request, so a
//!   caller retrying with the same key never executes an operation twice, and a new
//!   operation never reuses a stale key.
//! - **Typed views over polymorphic fields.** `payment_method`, `confirmation` and
//!   `metadata` are decoded as raw JSON and resolved on demand into typed variants, with
//!   discriminator checks and distinct errors for missing, mistyped and empty fields.
//!
//! ## Core Components Overview
//!
//! - **[`config`]**: Credentials and API root, from a builder or `YOOKASSA_*` variables.
//! - **[`client`]**: The request dispatcher.
//! - **[`handler`]**: Payment operations with a single-use idempotency key slot.
//! - **[`payment`]**, **[`payment_method`]**, **[`confirmation`]**, **[`metadata`]**,
//!   **[`item`]**: Wire types of the payment resource.
//! - **[`resolve`]**: Resolution of polymorphic fields into typed variants.
//! - **[`idempotency`]**: Idempotency keys.
//!
//! ## Example
//!
//! ```no_run
//! use yookassa_kit::{
//!     client::Client,
//!     handler::PaymentHandler,
//!     payment_method::SbpPaymentMethod,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::from_env()?;
//! let mut handler = PaymentHandler::new(&client);
//!
//! let payment = handler
//!     .find_payment("2419a771-000f-5000-9000-1edaf29243f2")
//!     .await?;
//!
//! match payment.resolve_payment_method::<SbpPaymentMethod>() {
//!     Ok(sbp) => println!("paid via SBP: {:?}", sbp.sbp_operation_id),
//!     Err(err) => println!("not an SBP payment: {err}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Extending Variants
//!
//! Shapes this crate does not know about stay available as raw JSON, and can be
//! resolved by implementing [`resolve::Variant`] for your own type:
//!
//! ```
//! use serde::Deserialize;
//! use serde_json::json;
//! use yookassa_kit::{
//!     payment_method::PaymentMethod,
//!     resolve::{Variant, resolve},
//! };
//!
//! #[derive(Debug, Clone, Deserialize)]
//! struct YooMoneyWallet {
//!     #[serde(rename = "type")]
//!     method_type: String,
//!     account_number: String,
//! }
//!
//! impl Variant for YooMoneyWallet {
//!     type Family = PaymentMethod;
//!     const NAME: &'static str = "YooMoneyWallet";
//!     const TAG: Option<&'static str> = Some("yoo_money");
//!
//!     fn project(_: &PaymentMethod) -> Option<&Self> {
//!         None
//!     }
//!
//!     fn discriminator(&self) -> Option<&str> {
//!         Some(&self.method_type)
//!     }
//! }
//!
//! let method = PaymentMethod::Raw(json!({
//!     "type": "yoo_money",
//!     "account_number": "410011758831136"
//! }));
//! let wallet: YooMoneyWallet = resolve(&method).unwrap();
//! assert_eq!(wallet.account_number, "410011758831136");
//! ```

pub mod confirmation {
    pub use yookassa_core::confirmation::*;
}

pub mod idempotency {
    pub use yookassa_core::idempotency::*;
}

pub mod item {
    pub use yookassa_core::item::*;
}

pub mod metadata {
    pub use yookassa_core::metadata::*;
}

pub mod payment {
    pub use yookassa_core::payment::*;
}

pub mod payment_method {
    pub use yookassa_core::payment_method::*;
}

pub mod resolve {
    pub use yookassa_core::resolve::*;
}

pub mod types {
    pub use yookassa_core::types::*;
}

pub mod client;
pub mod config;
pub mod errors;
pub mod handler;
