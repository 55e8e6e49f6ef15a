//! Reader and writer collaborators for raw record sources.
//!
//! The pipeline never touches files directly. A repository is handed a
//! [`RecordReader`]; the round-trip path uses a [`RecordWriter`]. The JSON
//! file implementations live in the `purchase-insights-json` crate and
//! in-memory ones in `purchase-insights-testing`.

use crate::error::SourceError;
use crate::model::ToRawRecord;
use crate::record::RawRecord;

/// Reads the full list of raw records from a named source
pub trait RecordReader: Send + Sync {
    /// Reads every record of `source_id`
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the source is unreadable or malformed.
    fn read(&self, source_id: &str) -> Result<Vec<RawRecord>, SourceError>;
}

/// Writes a full list of raw records to a named target
pub trait RecordWriter: Send + Sync {
    /// Replaces the content of `target_id` with `records`
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the target cannot be written.
    fn write(&self, target_id: &str, records: &[RawRecord]) -> Result<(), SourceError>;
}

/// Projects entities to raw records and writes them in one go
///
/// # Errors
///
/// Propagates the writer's [`SourceError`].
pub fn write_entities<E: ToRawRecord>(
    writer: &dyn RecordWriter,
    target_id: &str,
    entities: &[E],
) -> Result<(), SourceError> {
    let records: Vec<RawRecord> = entities.iter().map(ToRawRecord::to_raw_record).collect();
    tracing::debug!(target_id, count = records.len(), "Writing entities");
    writer.write(target_id, &records)
}
