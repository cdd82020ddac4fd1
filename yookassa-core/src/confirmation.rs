//! Payment confirmation scenarios.
//!
//! The `confirmation` object describes how the user confirms a payment. Its `type` field
//! selects one of the scenarios below.

use std::fmt::Display;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    resolve::{Variant, VariantFamily},
    types::AnyJson,
};

/// Discriminator of a confirmation scenario.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfirmationType {
    Redirect,
    Embedded,
    External,
    Qr,
    MobileApplication,
    Other(String),
}

impl ConfirmationType {
    pub fn as_str(&self) -> &str {
        match self {
            ConfirmationType::Redirect => "redirect",
            ConfirmationType::Embedded => "embedded",
            ConfirmationType::External => "external",
            ConfirmationType::Qr => "qr",
            ConfirmationType::MobileApplication => "mobile_application",
            ConfirmationType::Other(other) => other,
        }
    }
}

/// A payload without a `type` field decodes to an empty [`ConfirmationType::Other`].
impl Default for ConfirmationType {
    fn default() -> Self {
        ConfirmationType::Other(String::new())
    }
}

impl From<&str> for ConfirmationType {
    fn from(value: &str) -> Self {
        match value {
            "redirect" => ConfirmationType::Redirect,
            "embedded" => ConfirmationType::Embedded,
            "external" => ConfirmationType::External,
            "qr" => ConfirmationType::Qr,
            "mobile_application" => ConfirmationType::MobileApplication,
            other => ConfirmationType::Other(other.to_owned()),
        }
    }
}

impl Display for ConfirmationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ConfirmationType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ConfirmationType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ConfirmationType::from(s.as_str()))
    }
}

/// The user is redirected to `confirmation_url` and comes back to `return_url`.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectConfirmation {
    #[builder(default = ConfirmationType::Redirect)]
    #[serde(rename = "type", default)]
    pub confirmation_type: ConfirmationType,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_url: Option<String>,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforce: Option<bool>,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// Payment confirmed inside the checkout widget using `confirmation_token`.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedConfirmation {
    #[builder(default = ConfirmationType::Embedded)]
    #[serde(rename = "type", default)]
    pub confirmation_type: ConfirmationType,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_token: Option<String>,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// Payment confirmed outside of YooKassa, e.g. by SMS.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalConfirmation {
    #[builder(default = ConfirmationType::External)]
    #[serde(rename = "type", default)]
    pub confirmation_type: ConfirmationType,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// Payment confirmed by scanning a QR code built from `confirmation_data`.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrConfirmation {
    #[builder(default = ConfirmationType::Qr)]
    #[serde(rename = "type", default)]
    pub confirmation_type: ConfirmationType,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_data: Option<String>,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// Payment confirmed in a banking or wallet mobile application.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobileApplicationConfirmation {
    #[builder(default = ConfirmationType::MobileApplication)]
    #[serde(rename = "type", default)]
    pub confirmation_type: ConfirmationType,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_url: Option<String>,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,

    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// The `confirmation` field of a payment.
///
/// Decoding always yields [`Confirmation::Raw`].
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    Redirect(RedirectConfirmation),
    Embedded(EmbeddedConfirmation),
    External(ExternalConfirmation),
    Qr(QrConfirmation),
    MobileApplication(MobileApplicationConfirmation),
    /// The confirmation as received, not yet resolved.
    Raw(AnyJson),
}

impl Confirmation {
    /// Redirect scenario returning the user to `return_url`.
    pub fn redirect(return_url: impl Into<String>) -> Self {
        Confirmation::Redirect(RedirectConfirmation::builder().return_url(return_url).build())
    }

    /// Embedded checkout widget scenario.
    pub fn embedded() -> Self {
        Confirmation::Embedded(EmbeddedConfirmation::builder().build())
    }
}

impl Serialize for Confirmation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Confirmation::Redirect(c) => c.serialize(serializer),
            Confirmation::Embedded(c) => c.serialize(serializer),
            Confirmation::External(c) => c.serialize(serializer),
            Confirmation::Qr(c) => c.serialize(serializer),
            Confirmation::MobileApplication(c) => c.serialize(serializer),
            Confirmation::Raw(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Confirmation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        AnyJson::deserialize(deserializer).map(Confirmation::Raw)
    }
}

impl VariantFamily for Confirmation {
    fn raw(&self) -> Option<&AnyJson> {
        match self {
            Confirmation::Raw(raw) => Some(raw),
            _ => None,
        }
    }

    fn shape(&self) -> &'static str {
        match self {
            Confirmation::Redirect(_) => "Confirmation::Redirect",
            Confirmation::Embedded(_) => "Confirmation::Embedded",
            Confirmation::External(_) => "Confirmation::External",
            Confirmation::Qr(_) => "Confirmation::Qr",
            Confirmation::MobileApplication(_) => "Confirmation::MobileApplication",
            Confirmation::Raw(_) => "Confirmation::Raw",
        }
    }
}

macro_rules! confirmation_variant {
    ($ty:ident, $variant:ident, $tag:literal) => {
        impl Variant for $ty {
            type Family = Confirmation;
            const NAME: &'static str = stringify!($ty);
            const TAG: Option<&'static str> = Some($tag);

            fn project(family: &Confirmation) -> Option<&Self> {
                match family {
                    Confirmation::$variant(c) => Some(c),
                    _ => None,
                }
            }

            fn discriminator(&self) -> Option<&str> {
                Some(self.confirmation_type.as_str())
            }
        }

        impl From<$ty> for Confirmation {
            fn from(value: $ty) -> Self {
                Confirmation::$variant(value)
            }
        }
    };
}

confirmation_variant!(RedirectConfirmation, Redirect, "redirect");
confirmation_variant!(EmbeddedConfirmation, Embedded, "embedded");
confirmation_variant!(ExternalConfirmation, External, "external");
confirmation_variant!(QrConfirmation, Qr, "qr");
confirmation_variant!(MobileApplicationConfirmation, MobileApplication, "mobile_application");
