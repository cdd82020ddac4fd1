/// Error types for YooKassa core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The field holds neither the requested variant nor a generic JSON object.
    #[error("Unsupported source shape: {shape}")]
    ShapeUnsupported {
        /// Identifier of the shape that was found.
        shape: &'static str,
    },

    /// The field decoded into the requested variant but its discriminator disagrees.
    #[error("Discriminator `{field}` mismatch: expected `{expected}`, got `{found}`")]
    DiscriminatorMismatch {
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    /// A named scalar field is absent from the mapping.
    #[error("Field `{field}` not found")]
    FieldMissing { field: &'static str },

    /// A named field is present but not of the expected primitive type.
    #[error("Field `{field}` is not a {expected}, got {found}")]
    FieldTypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A named string field is empty.
    #[error("Field `{field}` is empty")]
    FieldEmpty { field: &'static str },

    /// A generic mapping does not fit the shape of the requested variant.
    #[error("Failed to decode {variant}: {source}")]
    Decode {
        variant: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Metadata holds more keys than the API accepts.
    #[error("Metadata has {count} keys; at most {max} are allowed")]
    MetadataTooManyKeys { count: usize, max: usize },

    /// A metadata key exceeds the maximum key length.
    #[error("Metadata key `{key}` is longer than {max} characters")]
    MetadataKeyTooLong { key: String, max: usize },

    /// A metadata value exceeds the maximum value length.
    #[error("Metadata value for `{key}` is longer than {max} characters")]
    MetadataValueTooLong { key: String, max: usize },

    /// JSON serialization/deserialization errors.
    #[error("Serde JSON error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

/// A specialized `Result` type for YooKassa core operations.
pub type Result<T> = std::result::Result<T, Error>;
