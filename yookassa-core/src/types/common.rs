//! Miscellaneous common types used throughout the YooKassa codebase.

use serde::Serializer;

/// Represents an key-value pair in the YooKassa API. The key is a `String`.
pub type Record<V> = std::collections::HashMap<String, V>;

/// Represents any JSON value. Used for serializing/deserializing arbitrary JSON data.
pub type AnyJson = serde_json::Value;

/// Maximum number of characters the API keeps in a `description` field.
pub const MAX_DESCRIPTION_LENGTH: usize = 128;

/// Name of the JSON kind held by `value`, used when reporting unexpected shapes.
///
/// ```
/// use serde_json::json;
/// use yookassa_core::types::json_shape;
///
/// assert_eq!(json_shape(&json!({})), "object");
/// assert_eq!(json_shape(&json!(42)), "number");
/// assert_eq!(json_shape(&json!(null)), "null");
/// ```
pub fn json_shape(value: &AnyJson) -> &'static str {
    match value {
        AnyJson::Null => "null",
        AnyJson::Bool(_) => "bool",
        AnyJson::Number(_) => "number",
        AnyJson::String(_) => "string",
        AnyJson::Array(_) => "array",
        AnyJson::Object(_) => "object",
    }
}

/// Cut `s` down to at most `max` characters without splitting a multi-byte sequence.
///
/// ```
/// use yookassa_core::types::truncate_chars;
///
/// assert_eq!(truncate_chars("привет", 3), "при");
/// assert_eq!(truncate_chars("abc", 10), "abc");
/// ```
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Serializes a description truncated to [`MAX_DESCRIPTION_LENGTH`] characters.
pub(crate) fn serialize_description<S>(description: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(truncate_chars(description, MAX_DESCRIPTION_LENGTH))
}

/// Same as [`serialize_description`] for optional fields.
pub(crate) fn serialize_optional_description<S>(
    description: &Option<String>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match description {
        Some(d) => serialize_description(d, serializer),
        None => serializer.serialize_none(),
    }
}
