//! YooKassa core library.
//!
//! This library provides the wire types of the YooKassa payment API together with the
//! two pieces of logic that do not need any I/O:
//!
//! - [`resolve`]: materializing strongly-typed variants out of polymorphic response fields.
//! - [`idempotency`]: single-use idempotency keys for mutating requests.

pub mod confirmation;
pub mod errors;
pub mod idempotency;
pub mod item;
pub mod metadata;
pub mod payment;
pub mod payment_method;
pub mod resolve;
pub mod types;
