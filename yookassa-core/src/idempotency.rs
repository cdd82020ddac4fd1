//! Single-use idempotency keys.
//!
//! The API recognises a retried mutating request by its `Idempotence-Key` header and
//! executes it at most once. An [`IdempotencySlot`] holds the key for the next request
//! of one logical operation and hands it out exactly once:
//!
//! ```
//! use yookassa_core::idempotency::IdempotencySlot;
//!
//! let mut slot = IdempotencySlot::new();
//! slot.set("order-72").set("ignored");
//! assert_eq!(slot.peek().map(|k| k.as_str()), Some("order-72"));
//!
//! let key = slot.consume_or_generate();
//! assert_eq!(key.as_str(), "order-72");
//! assert!(slot.is_empty());
//! ```
//!
//! To retry a request safely, set the same key again before resending it. A new
//! logical operation must never reuse a key.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An opaque retry-safety token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Generates a fresh random (UUID v4) key.
    pub fn generate() -> Self {
        IdempotencyKey(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for IdempotencyKey {
    fn from(value: String) -> Self {
        IdempotencyKey(value)
    }
}

impl From<&str> for IdempotencyKey {
    fn from(value: &str) -> Self {
        IdempotencyKey(value.to_owned())
    }
}

impl From<Uuid> for IdempotencyKey {
    fn from(value: Uuid) -> Self {
        IdempotencyKey(value.to_string())
    }
}

impl Display for IdempotencyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Holds at most one unconsumed idempotency key.
///
/// Not synchronized: one slot belongs to one in-flight logical operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdempotencySlot {
    key: Option<IdempotencyKey>,
}

impl IdempotencySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `key` if the slot is empty.
    ///
    /// An unconsumed key is never overwritten, and an empty token leaves the slot
    /// empty. Returns the same slot so calls can be chained.
    pub fn set(&mut self, key: impl Into<IdempotencyKey>) -> &mut Self {
        let key = key.into();
        if self.key.is_none() && !key.is_empty() {
            self.key = Some(key);
        }
        self
    }

    /// The key waiting for the next dispatch, if any.
    pub fn peek(&self) -> Option<&IdempotencyKey> {
        self.key.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_none()
    }

    /// Hands out the stored key, or a freshly generated one if none is stored.
    ///
    /// The slot is empty afterwards on both paths.
    pub fn consume_or_generate(&mut self) -> IdempotencyKey {
        self.key.take().unwrap_or_else(IdempotencyKey::generate)
    }
}
