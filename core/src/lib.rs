//! # Purchase Insights Core
//!
//! Domain model and pluggable record strategies for the Purchase Insights
//! pipeline.
//!
//! Raw records (flat field mappings decoded from a source) flow through a
//! fixed sequence of collaborators before they become typed entities:
//!
//! ```text
//! RecordReader ──► RawRecord ──► RecordValidator ──► RecordConverter ──► Entity
//!                                     │
//!                                     └── Rejection ──► Reporter
//! ```
//!
//! This crate defines those collaborators as traits, ships default
//! validators and converters for products, customers and orders, and holds
//! the shared error, configuration and reporting types. Orchestration lives
//! in `purchase-insights-repository`.
//!
//! ## Example
//!
//! ```
//! use purchase_insights_core::convert::{ProductConverter, RecordConverter};
//! use purchase_insights_core::record::RawRecord;
//! use purchase_insights_core::validate::{ProductValidator, RecordValidator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let record = RawRecord::new()
//!     .with("id", 101_i64)
//!     .with("name", "Laptop")
//!     .with("category", "Electronics")
//!     .with("price", "1500.00");
//!
//! ProductValidator::new().validate(&record)?;
//! let product = ProductConverter.convert(&record)?;
//! assert_eq!(product.name, "Laptop");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod io;
pub mod model;
pub mod record;
pub mod report;
pub mod validate;

// Re-export commonly used types
pub use config::{DatasetConfig, ValidationConfig};
pub use error::{ConfigurationError, ConversionError, FieldError, SourceError};
pub use model::{
    Customer, CustomerId, Order, OrderId, Product, ProductCategory, ProductId, ShippingMethod,
    ToRawRecord,
};
pub use record::{FieldValue, RawRecord};
pub use report::{Issue, NullReporter, Reporter, TracingReporter};
pub use rust_decimal::Decimal;
