//! In-memory collaborators for fast, deterministic tests
//!
//! - [`InMemoryReader`]: named record lists, with injectable failures
//! - [`InMemoryWriter`]: captures everything written
//! - [`InMemorySource`]: shared entity list usable as an [`EntitySource`]
//! - [`RecordingReporter`]: captures reported [`Issue`]s
//!
//! All of them are cheap to clone; clones share state, so a test can keep
//! a handle while the pipeline owns another.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Panics only on lock poisoning

use purchase_insights_core::error::SourceError;
use purchase_insights_core::io::{RecordReader, RecordWriter};
use purchase_insights_core::record::RawRecord;
use purchase_insights_core::report::{Issue, Reporter};
use purchase_insights_repository::EntitySource;
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Arc, RwLock};

/// In-memory record reader keyed by source id.
///
/// Unknown sources fail like a missing file would, with
/// [`SourceError::Io`] of kind `NotFound`.
///
/// # Example
///
/// ```
/// use purchase_insights_core::io::RecordReader;
/// use purchase_insights_core::record::RawRecord;
/// use purchase_insights_testing::InMemoryReader;
///
/// let reader = InMemoryReader::new();
/// reader.insert("products.json", vec![RawRecord::new().with("id", 1_i64)]);
///
/// assert_eq!(reader.read("products.json").unwrap().len(), 1);
/// assert!(reader.read("missing.json").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryReader {
    sources: Arc<RwLock<HashMap<String, Vec<RawRecord>>>>,
    failing: Arc<RwLock<HashSet<String>>>,
    reads: Arc<RwLock<usize>>,
}

impl InMemoryReader {
    /// Create a reader with no sources
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Self::insert`]
    #[must_use]
    pub fn with_source(self, source_id: &str, records: Vec<RawRecord>) -> Self {
        self.insert(source_id, records);
        self
    }

    /// Set (or replace) the records of `source_id`
    pub fn insert(&self, source_id: &str, records: Vec<RawRecord>) {
        self.sources
            .write()
            .unwrap()
            .insert(source_id.to_string(), records);
    }

    /// Make every read of `source_id` fail with a parse error
    pub fn fail(&self, source_id: &str) {
        self.failing.write().unwrap().insert(source_id.to_string());
    }

    /// Undo [`Self::fail`]
    pub fn recover(&self, source_id: &str) {
        self.failing.write().unwrap().remove(source_id);
    }

    /// Number of read attempts so far, failed ones included
    #[must_use]
    pub fn reads(&self) -> usize {
        *self.reads.read().unwrap()
    }
}

impl RecordReader for InMemoryReader {
    fn read(&self, source_id: &str) -> Result<Vec<RawRecord>, SourceError> {
        *self.reads.write().unwrap() += 1;

        if self.failing.read().unwrap().contains(source_id) {
            return Err(SourceError::Parse {
                source_id: source_id.to_string(),
                reason: "injected failure".to_string(),
            });
        }

        self.sources
            .read()
            .unwrap()
            .get(source_id)
            .cloned()
            .ok_or_else(|| SourceError::Io {
                source_id: source_id.to_string(),
                error: io::Error::new(io::ErrorKind::NotFound, "no such in-memory source"),
            })
    }
}

/// Record writer that keeps the last write per target
#[derive(Clone, Debug, Default)]
pub struct InMemoryWriter {
    written: Arc<RwLock<HashMap<String, Vec<RawRecord>>>>,
}

impl InMemoryWriter {
    /// Create an empty writer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records last written to `target_id`
    #[must_use]
    pub fn written(&self, target_id: &str) -> Option<Vec<RawRecord>> {
        self.written.read().unwrap().get(target_id).cloned()
    }

    /// Targets written so far, sorted
    #[must_use]
    pub fn targets(&self) -> Vec<String> {
        let mut targets: Vec<String> = self.written.read().unwrap().keys().cloned().collect();
        targets.sort();
        targets
    }

    /// Reader serving everything written so far, for round trips
    #[must_use]
    pub fn to_reader(&self) -> InMemoryReader {
        let reader = InMemoryReader::new();
        for (target_id, records) in self.written.read().unwrap().iter() {
            reader.insert(target_id, records.clone());
        }
        reader
    }
}

impl RecordWriter for InMemoryWriter {
    fn write(&self, target_id: &str, records: &[RawRecord]) -> Result<(), SourceError> {
        self.written
            .write()
            .unwrap()
            .insert(target_id.to_string(), records.to_vec());
        Ok(())
    }
}

/// Shared, mutable list of entities.
///
/// Mutating a clone is visible to the builder holding another clone, which
/// is how tests exercise memoization and `force_refresh`.
///
/// # Example
///
/// ```
/// use purchase_insights_repository::EntitySource;
/// use purchase_insights_testing::InMemorySource;
///
/// let source = InMemorySource::new(vec![1, 2]);
/// let handle = source.clone();
/// handle.push(3);
///
/// assert_eq!(source.snapshot(), vec![1, 2, 3]);
/// ```
#[derive(Debug)]
pub struct InMemorySource<E> {
    entities: Arc<RwLock<Vec<E>>>,
}

impl<E> InMemorySource<E> {
    /// Create a source holding `entities`
    #[must_use]
    pub fn new(entities: Vec<E>) -> Self {
        Self {
            entities: Arc::new(RwLock::new(entities)),
        }
    }

    /// Replace every entity
    pub fn set(&self, entities: Vec<E>) {
        *self.entities.write().unwrap() = entities;
    }

    /// Append one entity
    pub fn push(&self, entity: E) {
        self.entities.write().unwrap().push(entity);
    }

    /// Remove every entity
    pub fn clear(&self) {
        self.entities.write().unwrap().clear();
    }

    /// Number of entities held
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.read().unwrap().len()
    }

    /// Whether no entity is held
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.read().unwrap().is_empty()
    }
}

impl<E> Clone for InMemorySource<E> {
    fn clone(&self) -> Self {
        Self {
            entities: Arc::clone(&self.entities),
        }
    }
}

impl<E> Default for InMemorySource<E> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<E: Clone> EntitySource for InMemorySource<E> {
    type Entity = E;

    fn snapshot(&self) -> Vec<E> {
        self.entities.read().unwrap().clone()
    }
}

/// Reporter that keeps every issue for later assertions
#[derive(Clone, Debug, Default)]
pub struct RecordingReporter {
    issues: Arc<RwLock<Vec<Issue>>>,
}

impl RecordingReporter {
    /// Create an empty reporter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every issue reported so far, in order
    #[must_use]
    pub fn issues(&self) -> Vec<Issue> {
        self.issues.read().unwrap().clone()
    }

    /// Only the [`Issue::RecordRejected`] entries
    #[must_use]
    pub fn rejections(&self) -> Vec<Issue> {
        self.matching(|issue| matches!(issue, Issue::RecordRejected { .. }))
    }

    /// Only the [`Issue::ReferentialMiss`] entries
    #[must_use]
    pub fn referential_misses(&self) -> Vec<Issue> {
        self.matching(|issue| matches!(issue, Issue::ReferentialMiss { .. }))
    }

    /// Only the [`Issue::EmptyData`] entries
    #[must_use]
    pub fn empty_data(&self) -> Vec<Issue> {
        self.matching(|issue| matches!(issue, Issue::EmptyData { .. }))
    }

    /// Only the [`Issue::SpendOverflow`] entries
    #[must_use]
    pub fn spend_overflows(&self) -> Vec<Issue> {
        self.matching(|issue| matches!(issue, Issue::SpendOverflow { .. }))
    }

    /// Number of issues reported
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.read().unwrap().len()
    }

    /// Whether nothing was reported
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.read().unwrap().is_empty()
    }

    /// Forget every issue (for test isolation)
    pub fn clear(&self) {
        self.issues.write().unwrap().clear();
    }

    fn matching(&self, predicate: impl Fn(&Issue) -> bool) -> Vec<Issue> {
        self.issues
            .read()
            .unwrap()
            .iter()
            .filter(|issue| predicate(issue))
            .cloned()
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, issue: &Issue) {
        self.issues.write().unwrap().push(issue.clone());
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::panic)] // Test code can use expect and panic
mod tests {
    use super::*;

    #[test]
    fn failing_source_can_recover() {
        let reader = InMemoryReader::new().with_source("a.json", vec![RawRecord::new()]);
        reader.fail("a.json");
        assert!(matches!(
            reader.read("a.json"),
            Err(SourceError::Parse { .. })
        ));

        reader.recover("a.json");
        assert_eq!(reader.read("a.json").expect("recovered").len(), 1);
        assert_eq!(reader.reads(), 2);
    }

    #[test]
    fn unknown_source_is_not_found() {
        let error = InMemoryReader::new().read("nope.json").unwrap_err();
        match error {
            SourceError::Io { source_id, error } => {
                assert_eq!(source_id, "nope.json");
                assert_eq!(error.kind(), io::ErrorKind::NotFound);
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn writer_output_reads_back() {
        let writer = InMemoryWriter::new();
        let records = vec![RawRecord::new().with("id", 1_i64)];
        writer.write("out.json", &records).expect("write");

        assert_eq!(writer.targets(), vec!["out.json".to_string()]);
        assert_eq!(writer.to_reader().read("out.json").expect("read"), records);
    }

    #[test]
    fn recording_reporter_filters_by_kind() {
        let reporter = RecordingReporter::new();
        reporter.report(&Issue::EmptyData {
            source_id: "orders.json".to_string(),
        });
        assert_eq!(reporter.len(), 1);
        assert_eq!(reporter.empty_data().len(), 1);
        assert!(reporter.rejections().is_empty());

        reporter.clear();
        assert!(reporter.is_empty());
    }
}
