//! # Purchase Insights Testing
//!
//! Testing utilities for the Purchase Insights pipeline.
//!
//! This crate provides:
//! - In-memory readers, writers, entity sources and a recording reporter
//! - Shared fixtures with hand-checkable totals
//! - Proptest strategies for valid entities
//! - A Given-When-Then harness over the summary builder and analytics
//!
//! ## Example
//!
//! ```
//! use purchase_insights_core::report::Issue;
//! use purchase_insights_repository::EntityRepository;
//! use purchase_insights_testing::{InMemoryReader, RecordingReporter, fixtures};
//! use std::sync::Arc;
//!
//! let mut records = fixtures::raw_products();
//! records.push(purchase_insights_core::RawRecord::new().with("id", 7_i64));
//!
//! let reader = InMemoryReader::new().with_source("products.json", records);
//! let reporter = RecordingReporter::new();
//! let mut repository =
//!     EntityRepository::products("products.json", Arc::new(reader), Arc::new(reporter.clone()))
//!         .unwrap();
//!
//! assert_eq!(repository.load().unwrap(), fixtures::products().as_slice());
//! assert!(matches!(reporter.issues()[0], Issue::RecordRejected { index: 2, .. }));
//! ```

pub mod fixtures;
pub mod mocks;
pub mod scenario;
pub mod strategies;

pub use mocks::{InMemoryReader, InMemorySource, InMemoryWriter, RecordingReporter};
pub use scenario::{ScenarioAnalytics, SummaryScenario};
