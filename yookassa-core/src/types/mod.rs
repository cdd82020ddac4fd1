//! Core types used across the YooKassa Kit.

mod amount;
mod common;

pub use amount::*;
pub use common::*;
