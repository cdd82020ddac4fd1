//! Payment methods.
//!
//! A payment's `payment_method` arrives as an untyped object whose `type` field decides
//! its shape. It is kept as [`PaymentMethod::Raw`] until resolved into one of
//! [`BasePaymentMethod`], [`PaymentMethodWithCard`] or [`SbpPaymentMethod`].

use std::fmt::Display;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    resolve::{Variant, VariantFamily},
    types::AnyJson,
};

/// Discriminator of a payment method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaymentMethodType {
    BankCard,
    Sbp,
    YooMoney,
    SberPay,
    TinkoffBank,
    SberLoan,
    MobileBalance,
    Cash,
    B2bSberbank,
    ElectronicCertificate,
    /// A type this library does not know about yet.
    Other(String),
}

impl PaymentMethodType {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentMethodType::BankCard => "bank_card",
            PaymentMethodType::Sbp => "sbp",
            PaymentMethodType::YooMoney => "yoo_money",
            PaymentMethodType::SberPay => "sberbank",
            PaymentMethodType::TinkoffBank => "tinkoff_bank",
            PaymentMethodType::SberLoan => "sber_loan",
            PaymentMethodType::MobileBalance => "mobile_balance",
            PaymentMethodType::Cash => "cash",
            PaymentMethodType::B2bSberbank => "b2b_sberbank",
            PaymentMethodType::ElectronicCertificate => "electronic_certificate",
            PaymentMethodType::Other(other) => other,
        }
    }
}

/// A payload without a `type` field decodes to an empty [`PaymentMethodType::Other`].
impl Default for PaymentMethodType {
    fn default() -> Self {
        PaymentMethodType::Other(String::new())
    }
}

impl From<&str> for PaymentMethodType {
    fn from(value: &str) -> Self {
        match value {
            "bank_card" => PaymentMethodType::BankCard,
            "sbp" => PaymentMethodType::Sbp,
            "yoo_money" => PaymentMethodType::YooMoney,
            "sberbank" => PaymentMethodType::SberPay,
            "tinkoff_bank" => PaymentMethodType::TinkoffBank,
            "sber_loan" => PaymentMethodType::SberLoan,
            "mobile_balance" => PaymentMethodType::MobileBalance,
            "cash" => PaymentMethodType::Cash,
            "b2b_sberbank" => PaymentMethodType::B2bSberbank,
            "electronic_certificate" => PaymentMethodType::ElectronicCertificate,
            other => PaymentMethodType::Other(other.to_owned()),
        }
    }
}

impl Display for PaymentMethodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for PaymentMethodType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaymentMethodType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(PaymentMethodType::from(s.as_str()))
    }
}

/// Fields shared by every payment method.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasePaymentMethod {
    #[serde(rename = "type", default)]
    pub method_type: PaymentMethodType,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Whether the method was saved for recurring payments.
    #[builder(default)]
    #[serde(default)]
    pub saved: bool,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Bank card details returned by the API. Only masked data is ever exposed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first6: Option<String>,
    pub last4: String,
    pub expiry_year: String,
    pub expiry_month: String,
    pub card_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_name: Option<String>,
}

/// A payment method that may carry bank card details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodWithCard {
    #[serde(flatten)]
    pub base: BasePaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
}

/// Bank details of the payer of an SBP payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerBankDetails {
    pub bank_id: String,
    pub bic: String,
}

/// A payment made through the Faster Payments System (SBP).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SbpPaymentMethod {
    #[serde(flatten)]
    pub base: BasePaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sbp_operation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer_bank_details: Option<PayerBankDetails>,
}

/// The `payment_method` field of a payment.
///
/// Decoding always yields [`PaymentMethod::Raw`]; use [`crate::resolve::resolve`] or the
/// accessors on [`crate::payment::Payment`] to obtain a typed variant.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentMethod {
    Base(BasePaymentMethod),
    WithCard(PaymentMethodWithCard),
    Sbp(SbpPaymentMethod),
    /// The method as received, not yet resolved.
    Raw(AnyJson),
}

impl PaymentMethod {
    /// A method carrying only its type, as used when creating a payment.
    pub fn of_type(method_type: PaymentMethodType) -> Self {
        PaymentMethod::Base(BasePaymentMethod::builder().method_type(method_type).build())
    }
}

impl From<BasePaymentMethod> for PaymentMethod {
    fn from(value: BasePaymentMethod) -> Self {
        PaymentMethod::Base(value)
    }
}

impl From<PaymentMethodWithCard> for PaymentMethod {
    fn from(value: PaymentMethodWithCard) -> Self {
        PaymentMethod::WithCard(value)
    }
}

impl From<SbpPaymentMethod> for PaymentMethod {
    fn from(value: SbpPaymentMethod) -> Self {
        PaymentMethod::Sbp(value)
    }
}

impl Serialize for PaymentMethod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            PaymentMethod::Base(m) => m.serialize(serializer),
            PaymentMethod::WithCard(m) => m.serialize(serializer),
            PaymentMethod::Sbp(m) => m.serialize(serializer),
            PaymentMethod::Raw(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PaymentMethod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        AnyJson::deserialize(deserializer).map(PaymentMethod::Raw)
    }
}

impl VariantFamily for PaymentMethod {
    fn raw(&self) -> Option<&AnyJson> {
        match self {
            PaymentMethod::Raw(raw) => Some(raw),
            _ => None,
        }
    }

    fn shape(&self) -> &'static str {
        match self {
            PaymentMethod::Base(_) => "PaymentMethod::Base",
            PaymentMethod::WithCard(_) => "PaymentMethod::WithCard",
            PaymentMethod::Sbp(_) => "PaymentMethod::Sbp",
            PaymentMethod::Raw(_) => "PaymentMethod::Raw",
        }
    }
}

impl Variant for BasePaymentMethod {
    type Family = PaymentMethod;
    const NAME: &'static str = "BasePaymentMethod";

    fn project(family: &PaymentMethod) -> Option<&Self> {
        match family {
            PaymentMethod::Base(m) => Some(m),
            _ => None,
        }
    }

    fn discriminator(&self) -> Option<&str> {
        Some(self.method_type.as_str())
    }
}

// Cards show up under several method types, so no tag is enforced here.
impl Variant for PaymentMethodWithCard {
    type Family = PaymentMethod;
    const NAME: &'static str = "PaymentMethodWithCard";

    fn project(family: &PaymentMethod) -> Option<&Self> {
        match family {
            PaymentMethod::WithCard(m) => Some(m),
            _ => None,
        }
    }

    fn discriminator(&self) -> Option<&str> {
        Some(self.base.method_type.as_str())
    }
}

impl Variant for SbpPaymentMethod {
    type Family = PaymentMethod;
    const NAME: &'static str = "SbpPaymentMethod";
    const TAG: Option<&'static str> = Some("sbp");

    fn project(family: &PaymentMethod) -> Option<&Self> {
        match family {
            PaymentMethod::Sbp(m) => Some(m),
            _ => None,
        }
    }

    fn discriminator(&self) -> Option<&str> {
        Some(self.base.method_type.as_str())
    }
}
