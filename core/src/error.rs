//! Error types shared by the record pipeline.
//!
//! Each concern gets its own enum so callers can tell a configuration
//! mistake from a broken source file or a converter defect:
//!
//! - [`ConfigurationError`]: fatal, raised at construction time
//! - [`SourceError`]: reading or parsing a raw source failed
//! - [`FieldError`]: a single field of a raw record is missing or malformed
//! - [`ConversionError`]: a converter could not build an entity
//!
//! Validation rejections are not errors; see [`crate::validate::Rejection`].

use thiserror::Error;

/// Configuration problems detected before any data is read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A repository was constructed without a source identifier.
    #[error("Missing source identifier (file name)")]
    MissingSource,

    /// A configuration value is present but unusable.
    #[error("Invalid setting `{name}`: {reason}")]
    InvalidSetting {
        /// Name of the offending setting
        name: String,
        /// Why the value was refused
        reason: String,
    },
}

/// Failure to read or decode a raw record source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be opened or read.
    #[error("Failed to read source `{source_id}`: {error}")]
    Io {
        /// Source identifier (usually a file path)
        source_id: String,
        /// Underlying I/O error
        #[source]
        error: std::io::Error,
    },

    /// The source was readable but its content is not a list of flat records.
    #[error("Failed to parse source `{source_id}`: {reason}")]
    Parse {
        /// Source identifier (usually a file path)
        source_id: String,
        /// Parser message
        reason: String,
    },

    /// The source could not be written.
    #[error("Failed to write source `{source_id}`: {reason}")]
    Write {
        /// Target identifier (usually a file path)
        source_id: String,
        /// Writer message
        reason: String,
    },
}

impl SourceError {
    /// Identifier of the source the error relates to
    #[must_use]
    pub fn source_id(&self) -> &str {
        match self {
            Self::Io { source_id, .. }
            | Self::Parse { source_id, .. }
            | Self::Write { source_id, .. } => source_id,
        }
    }
}

/// Problem with a single field of a raw record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The field is absent.
    #[error("Missing field `{0}`")]
    Missing(String),

    /// The field holds a value of the wrong kind.
    #[error("Field `{field}` should be {expected}")]
    WrongType {
        /// Field name
        field: String,
        /// Human readable description of the expected kind
        expected: &'static str,
    },

    /// The field is text that does not parse into the expected kind.
    #[error("Field `{field}` has unparsable value `{value}`")]
    Unparsable {
        /// Field name
        field: String,
        /// Raw text that failed to parse
        value: String,
    },
}

/// A converter failed on a record.
///
/// Validators are expected to rule out every one of these; seeing one after
/// validation means the validator and converter disagree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// A field could not be read.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// The category name is not one of the known categories.
    #[error("Unknown product category `{0}`")]
    UnknownCategory(String),

    /// The shipping method name is not one of the known methods.
    #[error("Unknown shipping method `{0}`")]
    UnknownShippingMethod(String),

    /// A numeric field does not fit the entity's field type.
    #[error("Field `{field}` is out of range: {value}")]
    OutOfRange {
        /// Field name
        field: String,
        /// Offending value
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_error_exposes_source_id() {
        let err = SourceError::Parse {
            source_id: "orders.json".to_string(),
            reason: "expected array".to_string(),
        };
        assert_eq!(err.source_id(), "orders.json");
        assert!(err.to_string().contains("expected array"));
    }

    #[test]
    fn field_error_converts_into_conversion_error() {
        let err: ConversionError = FieldError::Missing("price".to_string()).into();
        assert_eq!(err.to_string(), "Missing field `price`");
    }
}
