//! Error types for metadata resolution and instance access.

/// Errors raised while resolving metadata paths against live instances.
///
/// Both variants indicate a mismatch between declared metadata and the
/// actual type. They are surfaced lazily — only when the declared path is
/// exercised — and are never guessed around.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// A declared property name does not resolve on the target instance.
    #[error("no readable property `{property}` on type `{type_name}`")]
    Configuration { type_name: String, property: String },

    /// A tracked field exists but its value cannot be read or stringified.
    #[error("cannot read tracked field `{field}` on type `{type_name}`: {reason}")]
    UnreadableProperty {
        type_name: String,
        field: String,
        reason: String,
    },
}

impl MetadataError {
    pub fn configuration(type_name: impl Into<String>, property: impl Into<String>) -> Self {
        Self::Configuration {
            type_name: type_name.into(),
            property: property.into(),
        }
    }

    pub fn unreadable(
        type_name: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnreadableProperty {
            type_name: type_name.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias for metadata results.
pub type MetadataResult<T> = Result<T, MetadataError>;
