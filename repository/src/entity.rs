//! Generic read → validate → convert → cache pipeline for one entity kind.
//!
//! An [`EntityRepository`] is instantiated once per entity kind with the
//! matching validator and converter injected. Construction never touches
//! the source; call [`EntityRepository::load`] explicitly so that error
//! handling and retries stay with the caller.

use crate::error::{RepositoryError, Result};
use purchase_insights_core::config::ValidationConfig;
use purchase_insights_core::convert::{
    CustomerConverter, OrderConverter, ProductConverter, RecordConverter,
};
use purchase_insights_core::error::ConfigurationError;
use purchase_insights_core::io::RecordReader;
use purchase_insights_core::model::{Customer, Order, Product};
use purchase_insights_core::report::{Issue, Reporter};
use purchase_insights_core::validate::{
    CustomerValidator, OrderValidator, ProductValidator, RecordValidator,
};
use std::fmt;
use std::sync::Arc;

/// Anything that can hand out its current entities
///
/// This is the seam between the purchase summary builder and the
/// repositories, so tests can swap in in-memory data.
pub trait EntitySource {
    /// Entity kind
    type Entity;

    /// Owned copy of the entities currently held
    fn snapshot(&self) -> Vec<Self::Entity>;
}

impl<T: EntitySource + ?Sized> EntitySource for &T {
    type Entity = T::Entity;

    fn snapshot(&self) -> Vec<Self::Entity> {
        (**self).snapshot()
    }
}

impl<E: Clone> EntitySource for Vec<E> {
    type Entity = E;

    fn snapshot(&self) -> Vec<E> {
        self.clone()
    }
}

/// Outcome counts of the last load
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadReport {
    /// Source that was read
    pub source_id: String,
    /// Records converted into entities
    pub accepted: usize,
    /// Records refused by the validator
    pub rejected: usize,
}

impl LoadReport {
    /// Total number of records read
    #[must_use]
    pub const fn total(&self) -> usize {
        self.accepted + self.rejected
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} accepted, {} rejected",
            self.source_id, self.accepted, self.rejected
        )
    }
}

/// Cached list of typed entities read from one named source
pub struct EntityRepository<E> {
    source_id: String,
    reader: Arc<dyn RecordReader>,
    validator: Arc<dyn RecordValidator>,
    converter: Arc<dyn RecordConverter<Entity = E>>,
    reporter: Arc<dyn Reporter>,
    data: Vec<E>,
    last_report: Option<LoadReport>,
}

fn checked_source(source_id: String) -> std::result::Result<String, ConfigurationError> {
    if source_id.trim().is_empty() {
        Err(ConfigurationError::MissingSource)
    } else {
        Ok(source_id)
    }
}

impl<E> EntityRepository<E> {
    /// Create a repository over `source_id` with injected strategies.
    ///
    /// The cache starts empty; nothing is read until [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingSource`] if `source_id` is blank.
    pub fn new(
        source_id: impl Into<String>,
        reader: Arc<dyn RecordReader>,
        validator: Arc<dyn RecordValidator>,
        converter: Arc<dyn RecordConverter<Entity = E>>,
        reporter: Arc<dyn Reporter>,
    ) -> std::result::Result<Self, ConfigurationError> {
        Ok(Self {
            source_id: checked_source(source_id.into())?,
            reader,
            validator,
            converter,
            reporter,
            data: Vec::new(),
            last_report: None,
        })
    }

    /// Source identifier the repository reads from
    #[must_use]
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Counts from the most recent successful load, if any
    #[must_use]
    pub const fn last_report(&self) -> Option<&LoadReport> {
        self.last_report.as_ref()
    }

    /// Reads the configured source and replaces the cache.
    ///
    /// Rejected records are reported and skipped; the order of accepted
    /// records follows the source.
    ///
    /// # Errors
    ///
    /// - [`RepositoryError::Source`] if the reader fails; the cache is untouched.
    /// - [`RepositoryError::Conversion`] if a validated record fails to
    ///   convert; the cache is untouched.
    pub fn load(&mut self) -> Result<&[E]> {
        tracing::info!(source_id = %self.source_id, "Reading data");
        let records = self.reader.read(&self.source_id)?;

        let mut entities = Vec::with_capacity(records.len());
        let mut rejected = 0;
        for (index, record) in records.iter().enumerate() {
            match self.validator.validate(record) {
                Ok(()) => {
                    let entity = self.converter.convert(record).map_err(|error| {
                        RepositoryError::Conversion {
                            source_id: self.source_id.clone(),
                            index,
                            error,
                        }
                    })?;
                    entities.push(entity);
                },
                Err(rejection) => {
                    rejected += 1;
                    self.reporter.report(&Issue::RecordRejected {
                        source_id: self.source_id.clone(),
                        index,
                        record: record.to_string(),
                        reasons: rejection.reasons,
                    });
                },
            }
        }

        let report = LoadReport {
            source_id: self.source_id.clone(),
            accepted: entities.len(),
            rejected,
        };
        tracing::info!(
            source_id = %report.source_id,
            accepted = report.accepted,
            rejected = report.rejected,
            "Loaded data"
        );
        self.data = entities;
        self.last_report = Some(report);
        Ok(&self.data)
    }

    /// Switches to `source_id` and loads it.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::Configuration`] if `source_id` is blank, otherwise
    /// as [`Self::load`]. On error the previous source stays configured.
    pub fn load_from(&mut self, source_id: impl Into<String>) -> Result<&[E]> {
        let source_id = checked_source(source_id.into())?;
        let previous = std::mem::replace(&mut self.source_id, source_id);
        let outcome = self.load().map(|_| ());
        if let Err(error) = outcome {
            self.source_id = previous;
            return Err(error);
        }
        Ok(&self.data)
    }

    /// Entities from the last load.
    ///
    /// An empty cache is valid (never loaded, or no valid records) and is
    /// reported as [`Issue::EmptyData`].
    #[must_use]
    pub fn current_data(&self) -> &[E] {
        if self.data.is_empty() {
            self.reporter.report(&Issue::EmptyData {
                source_id: self.source_id.clone(),
            });
        }
        &self.data
    }
}

impl<E: Clone> EntitySource for EntityRepository<E> {
    type Entity = E;

    fn snapshot(&self) -> Vec<E> {
        self.current_data().to_vec()
    }
}

impl<E> fmt::Debug for EntityRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRepository")
            .field("source_id", &self.source_id)
            .field("len", &self.data.len())
            .field("last_report", &self.last_report)
            .finish_non_exhaustive()
    }
}

impl EntityRepository<Product> {
    /// Product repository with the default validator and converter
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn products(
        source_id: impl Into<String>,
        reader: Arc<dyn RecordReader>,
        reporter: Arc<dyn Reporter>,
    ) -> std::result::Result<Self, ConfigurationError> {
        Self::new(
            source_id,
            reader,
            Arc::new(ProductValidator::new()),
            Arc::new(ProductConverter),
            reporter,
        )
    }
}

impl EntityRepository<Customer> {
    /// Customer repository with the default validator and converter
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn customers(
        source_id: impl Into<String>,
        reader: Arc<dyn RecordReader>,
        config: &ValidationConfig,
        reporter: Arc<dyn Reporter>,
    ) -> std::result::Result<Self, ConfigurationError> {
        Self::new(
            source_id,
            reader,
            Arc::new(CustomerValidator::new(config)),
            Arc::new(CustomerConverter),
            reporter,
        )
    }
}

impl EntityRepository<Order> {
    /// Order repository with the default validator and converter
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn orders(
        source_id: impl Into<String>,
        reader: Arc<dyn RecordReader>,
        config: &ValidationConfig,
        reporter: Arc<dyn Reporter>,
    ) -> std::result::Result<Self, ConfigurationError> {
        Self::new(
            source_id,
            reader,
            Arc::new(OrderValidator::new(config)),
            Arc::new(OrderConverter),
            reporter,
        )
    }
}
