//! # Purchase Insights Repository
//!
//! Orchestration on top of `purchase-insights-core`:
//!
//! - [`EntityRepository`]: read → validate → convert → cache, one per entity kind
//! - [`PurchaseSummaryBuilder`]: joins orders with customers and products into
//!   a memoized customer → product → quantity mapping
//! - [`AnalyticsService`]: spend and popularity queries over that summary
//!
//! ## Example
//!
//! ```
//! use purchase_insights_core::model::{
//!     Customer, CustomerId, Order, OrderId, Product, ProductCategory, ProductId, ShippingMethod,
//! };
//! use purchase_insights_core::{Decimal, NullReporter};
//! use purchase_insights_repository::{AnalyticsService, PurchaseSummaryBuilder};
//! use std::sync::Arc;
//!
//! let customers = vec![Customer::new(
//!     CustomerId::new(1),
//!     "John".to_string(),
//!     "Doe".to_string(),
//!     30,
//!     "john.doe@example.com".to_string(),
//! )];
//! let products = vec![Product::new(
//!     ProductId::new(101),
//!     "Laptop".to_string(),
//!     ProductCategory::Electronics,
//!     Decimal::new(150_000, 2),
//! )];
//! let orders = vec![Order::new(
//!     OrderId::new(1),
//!     CustomerId::new(1),
//!     ProductId::new(101),
//!     2,
//!     Decimal::ZERO,
//!     ShippingMethod::Standard,
//! )];
//!
//! let builder = PurchaseSummaryBuilder::new(customers, products, orders, Arc::new(NullReporter));
//! let mut analytics = AnalyticsService::new(builder);
//!
//! assert_eq!(analytics.summary().total_units(), 2);
//! assert_eq!(analytics.most_popular_products()[0].name, "Laptop");
//! ```

pub mod analytics;
pub mod entity;
pub mod error;
pub mod summary;

pub use analytics::{AnalyticsService, SpendExtremes, total_spent};
pub use entity::{EntityRepository, EntitySource, LoadReport};
pub use error::{RepositoryError, Result};
pub use summary::{ProductQuantities, PurchaseSummary, PurchaseSummaryBuilder};
