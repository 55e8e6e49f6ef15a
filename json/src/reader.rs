//! JSON file reader

use crate::resolve;
use purchase_insights_core::error::SourceError;
use purchase_insights_core::io::RecordReader;
use purchase_insights_core::record::RawRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads a JSON array of flat records from a file.
///
/// The source id is a file path, taken relative to the base directory when
/// one is set.
#[derive(Clone, Debug, Default)]
pub struct JsonFileReader {
    base_dir: Option<PathBuf>,
}

impl JsonFileReader {
    /// Reader resolving source ids as plain paths
    #[must_use]
    pub const fn new() -> Self {
        Self { base_dir: None }
    }

    /// Resolve source ids under `dir`
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// File a source id maps to
    #[must_use]
    pub fn path_for(&self, source_id: &str) -> PathBuf {
        resolve(self.base_dir.as_deref(), source_id)
    }
}

impl RecordReader for JsonFileReader {
    fn read(&self, source_id: &str) -> Result<Vec<RawRecord>, SourceError> {
        let path = self.path_for(source_id);
        tracing::debug!(path = %path.display(), "Reading JSON records");

        let content = fs::read_to_string(&path).map_err(|error| SourceError::Io {
            source_id: source_id.to_string(),
            error,
        })?;
        parse(source_id, &content, &path)
    }
}

fn parse(source_id: &str, content: &str, path: &Path) -> Result<Vec<RawRecord>, SourceError> {
    let records: Vec<RawRecord> =
        serde_json::from_str(content).map_err(|error| SourceError::Parse {
            source_id: source_id.to_string(),
            reason: error.to_string(),
        })?;
    tracing::debug!(path = %path.display(), count = records.len(), "Parsed JSON records");
    Ok(records)
}
