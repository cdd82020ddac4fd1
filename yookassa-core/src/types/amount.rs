use std::fmt::Display;

use bon::Builder;
use serde::{Deserialize, Serialize};

/// A monetary amount as the API transmits it.
///
/// The value is kept in its textual wire form (e.g. `"100.00"`); no arithmetic or
/// currency validation is performed.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    /// Amount value, e.g. `"2.00"`.
    #[builder(into)]
    pub value: String,
    /// ISO-4217 currency code, e.g. `"RUB"`.
    #[builder(into)]
    pub currency: String,
}

impl Amount {
    pub fn new(value: impl Into<String>, currency: impl Into<String>) -> Self {
        Amount {
            value: value.into(),
            currency: currency.into(),
        }
    }

    /// Shorthand for an amount in Russian rubles.
    pub fn rub(value: impl Into<String>) -> Self {
        Amount::new(value, "RUB")
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}
