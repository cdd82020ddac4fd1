//! Free-form payment metadata.
//!
//! Metadata is an open key-value bag the merchant attaches to a payment (for example an
//! internal invoice ID) and receives back in every response. The API accepts at most
//! [`Metadata::MAX_KEYS`] keys, keys of up to [`Metadata::MAX_KEY_LENGTH`] characters and
//! values of up to [`Metadata::MAX_VALUE_LENGTH`] characters.

use serde::{Deserialize, Serialize};

use crate::{
    errors::{Error, Result},
    resolve::{VariantFamily, extract_str},
    types::{AnyJson, Record},
};

/// Metadata key under which invoices are tracked.
pub const INVOICE_ID: &str = "invoice_id";

/// The `metadata` field of a payment.
///
/// Decoding always yields [`Metadata::Raw`]; [`Metadata::Entries`] is built by the caller
/// through [`Metadata::from_entries`], which enforces the API limits.
#[derive(Debug, Clone, PartialEq)]
pub enum Metadata {
    Entries(Record<String>),
    Raw(AnyJson),
}

impl Metadata {
    pub const MAX_KEYS: usize = 16;
    pub const MAX_KEY_LENGTH: usize = 32;
    pub const MAX_VALUE_LENGTH: usize = 512;

    /// Build metadata from key-value pairs, checking the API limits.
    ///
    /// ```
    /// use yookassa_core::metadata::Metadata;
    ///
    /// let metadata = Metadata::from_entries([("invoice_id", "inv-1")]).unwrap();
    /// assert_eq!(metadata.invoice_id().unwrap(), "inv-1");
    /// ```
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Record::new();
        for (key, value) in entries {
            let key = key.into();
            let value = value.into();

            if key.chars().count() > Self::MAX_KEY_LENGTH {
                return Err(Error::MetadataKeyTooLong {
                    key,
                    max: Self::MAX_KEY_LENGTH,
                });
            }
            if value.chars().count() > Self::MAX_VALUE_LENGTH {
                return Err(Error::MetadataValueTooLong {
                    key,
                    max: Self::MAX_VALUE_LENGTH,
                });
            }
            record.insert(key, value);
        }

        if record.len() > Self::MAX_KEYS {
            return Err(Error::MetadataTooManyKeys {
                count: record.len(),
                max: Self::MAX_KEYS,
            });
        }

        Ok(Metadata::Entries(record))
    }

    /// A non-empty string value stored under `key`.
    pub fn string(&self, key: &'static str) -> Result<String> {
        extract_str(Some(self), key)
    }

    /// The merchant invoice ID stored under [`INVOICE_ID`].
    pub fn invoice_id(&self) -> Result<String> {
        self.string(INVOICE_ID)
    }
}

impl Serialize for Metadata {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Metadata::Entries(entries) => entries.serialize(serializer),
            Metadata::Raw(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        AnyJson::deserialize(deserializer).map(Metadata::Raw)
    }
}

impl VariantFamily for Metadata {
    fn raw(&self) -> Option<&AnyJson> {
        match self {
            Metadata::Raw(raw) => Some(raw),
            Metadata::Entries(_) => None,
        }
    }

    fn shape(&self) -> &'static str {
        match self {
            Metadata::Entries(_) => "Metadata::Entries",
            Metadata::Raw(_) => "Metadata::Raw",
        }
    }
}
