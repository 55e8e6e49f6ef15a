//! Error types for repository operations.

use purchase_insights_core::error::{ConfigurationError, ConversionError, SourceError};
use thiserror::Error;

/// Result type alias for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Fatal failures of a repository load.
///
/// Rejected records and unresolved references are not errors; they are
/// reported through a `Reporter` and processing continues.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The repository is misconfigured.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The source could not be read or parsed; the cache is untouched.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A record passed validation but could not be converted.
    ///
    /// This is a defect in the validator/converter pair, not a data problem.
    #[error("Record #{index} of `{source_id}` passed validation but failed conversion: {error}")]
    Conversion {
        /// Source being loaded
        source_id: String,
        /// Zero-based record position
        index: usize,
        /// Converter error
        #[source]
        error: ConversionError,
    },
}
