//! JSON file writer

use crate::resolve;
use purchase_insights_core::error::SourceError;
use purchase_insights_core::io::RecordWriter;
use purchase_insights_core::record::RawRecord;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::PathBuf;

/// Writes records as a pretty-printed JSON array, four-space indented.
///
/// Missing parent directories are created. An existing file is replaced.
#[derive(Clone, Debug, Default)]
pub struct JsonFileWriter {
    base_dir: Option<PathBuf>,
}

impl JsonFileWriter {
    /// Writer resolving target ids as plain paths
    #[must_use]
    pub const fn new() -> Self {
        Self { base_dir: None }
    }

    /// Resolve target ids under `dir`
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// File a target id maps to
    #[must_use]
    pub fn path_for(&self, target_id: &str) -> PathBuf {
        resolve(self.base_dir.as_deref(), target_id)
    }
}

fn to_pretty_json(target_id: &str, records: &[RawRecord]) -> Result<Vec<u8>, SourceError> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    records
        .serialize(&mut serializer)
        .map_err(|error| SourceError::Write {
            source_id: target_id.to_string(),
            reason: error.to_string(),
        })?;
    buffer.push(b'\n');
    Ok(buffer)
}

impl RecordWriter for JsonFileWriter {
    fn write(&self, target_id: &str, records: &[RawRecord]) -> Result<(), SourceError> {
        let path = self.path_for(target_id);
        let io_error = |error: std::io::Error| SourceError::Io {
            source_id: target_id.to_string(),
            error,
        };

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(&path, to_pretty_json(target_id, records)?).map_err(io_error)?;

        tracing::info!(path = %path.display(), count = records.len(), "Wrote JSON records");
        Ok(())
    }
}
