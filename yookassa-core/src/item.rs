//! Receipt data sent along with a payment.

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::types::{Amount, serialize_description};

/// A single line of a receipt.
///
/// `description` is cut to [`crate::types::MAX_DESCRIPTION_LENGTH`] characters when the
/// item is serialized; the value held in memory is left untouched.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Name of the product or service.
    #[builder(into)]
    #[serde(serialize_with = "serialize_description")]
    pub description: String,

    /// Quantity of goods; whole numbers only.
    pub quantity: u32,

    /// Price per unit.
    pub amount: Amount,

    /// VAT rate code; `1` means "without VAT".
    pub vat_code: u8,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure: Option<String>,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_subject: Option<String>,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_mode: Option<String>,
}

/// Receipt recipient contacts.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Receipt attached to a payment.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,

    #[builder(default)]
    pub items: Vec<Item>,
}
