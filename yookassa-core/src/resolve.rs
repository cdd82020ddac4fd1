//! Materializing typed variants out of polymorphic response fields.
//!
//! Fields such as `payment_method` or `confirmation` are decoded without knowing which
//! concrete shape they carry, so they are kept as [`AnyJson`] inside a [`VariantFamily`]
//! until the caller asks for a specific [`Variant`]:
//!
//! 1. if the family already holds the requested variant, it is returned as is;
//! 2. if the family holds a raw JSON object, the object is decoded into the variant;
//! 3. anything else fails with [`Error::ShapeUnsupported`].
//!
//! Variants carrying a discriminator are checked after decoding, so a `bank_card`
//! payload never comes back as an SBP method.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    errors::{Error, Result},
    types::{AnyJson, json_shape},
};

/// A polymorphic field holding either a typed variant or the raw JSON it was decoded from.
pub trait VariantFamily {
    /// The raw JSON value, if the field has not been built from a typed variant.
    fn raw(&self) -> Option<&AnyJson>;

    /// Identifier of the typed variant currently held.
    fn shape(&self) -> &'static str;
}

/// One concrete shape within a [`VariantFamily`].
pub trait Variant: DeserializeOwned + Clone {
    type Family: VariantFamily;

    /// Human readable name, reported in decode errors.
    const NAME: &'static str;

    /// Name of the discriminator field.
    const DISCRIMINATOR: &'static str = "type";

    /// Discriminator value this variant requires, or `None` if it accepts any.
    const TAG: Option<&'static str> = None;

    /// Borrow the variant if the family already holds it.
    fn project(family: &Self::Family) -> Option<&Self>;

    /// The discriminator value carried by this instance.
    fn discriminator(&self) -> Option<&str> {
        None
    }
}

/// Resolve `family` into the variant `V`.
pub fn resolve<V: Variant>(family: &V::Family) -> Result<V> {
    if let Some(variant) = V::project(family) {
        check_discriminator(variant)?;
        return Ok(variant.clone());
    }

    let raw = match family.raw() {
        Some(raw @ AnyJson::Object(_)) => raw,
        Some(other) => {
            return Err(Error::ShapeUnsupported {
                shape: json_shape(other),
            });
        }
        None => {
            return Err(Error::ShapeUnsupported {
                shape: family.shape(),
            });
        }
    };

    let variant = <V as Deserialize>::deserialize(raw).map_err(|source| Error::Decode {
        variant: V::NAME,
        source,
    })?;
    check_discriminator(&variant)?;

    Ok(variant)
}

/// Resolve an optional field; an absent field is reported as a `null` shape.
pub fn resolve_optional<V: Variant>(family: Option<&V::Family>) -> Result<V> {
    match family {
        Some(family) => resolve(family),
        None => Err(Error::ShapeUnsupported { shape: "null" }),
    }
}

fn check_discriminator<V: Variant>(variant: &V) -> Result<()> {
    let Some(expected) = V::TAG else {
        return Ok(());
    };

    match variant.discriminator() {
        Some(found) if found == expected => Ok(()),
        found => Err(Error::DiscriminatorMismatch {
            field: V::DISCRIMINATOR,
            expected,
            found: found.unwrap_or_default().to_owned(),
        }),
    }
}

/// Extract a non-empty string field from a JSON object.
///
/// ```
/// use serde_json::json;
/// use yookassa_core::{errors::Error, resolve::string_field};
///
/// let confirmation = json!({ "confirmation_token": "ct-1" });
/// assert_eq!(string_field(&confirmation, "confirmation_token").unwrap(), "ct-1");
///
/// let err = string_field(&json!({}), "confirmation_token").unwrap_err();
/// assert!(matches!(err, Error::FieldMissing { .. }));
/// ```
pub fn string_field(raw: &AnyJson, field: &'static str) -> Result<String> {
    let AnyJson::Object(map) = raw else {
        return Err(Error::ShapeUnsupported {
            shape: json_shape(raw),
        });
    };

    let value = map.get(field).ok_or(Error::FieldMissing { field })?;
    let AnyJson::String(s) = value else {
        return Err(Error::FieldTypeMismatch {
            field,
            expected: "string",
            found: json_shape(value),
        });
    };

    if s.is_empty() {
        return Err(Error::FieldEmpty { field });
    }

    Ok(s.to_owned())
}

/// Extract a non-empty string field from an optional polymorphic field.
///
/// A family built from a typed variant is re-encoded to JSON first, so the same checks
/// apply regardless of how the field was populated.
pub fn extract_str<F>(family: Option<&F>, field: &'static str) -> Result<String>
where
    F: VariantFamily + Serialize,
{
    let family = family.ok_or(Error::ShapeUnsupported { shape: "null" })?;

    match family.raw() {
        Some(raw) => string_field(raw, field),
        None => string_field(&serde_json::to_value(family)?, field),
    }
}
