//! Reporting sink for advisory signals.
//!
//! Rejected records, unresolved order references, empty caches and spend
//! totals too large to represent are not failures: processing continues. They are handed to a [`Reporter`] so that
//! the batch can summarise them and tests can assert on them without
//! capturing log output.

use crate::model::{CustomerId, OrderId, ProductId};
use std::fmt;

/// Something worth telling the operator about
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Issue {
    /// A raw record failed validation and was skipped
    RecordRejected {
        /// Source the record came from
        source_id: String,
        /// Zero-based position of the record in the source
        index: usize,
        /// Rendered record, for the operator
        record: String,
        /// Every reason the validator gave
        reasons: Vec<String>,
    },

    /// An order points at a customer or product that is not loaded
    ReferentialMiss {
        /// The dropped order
        order_id: OrderId,
        /// Customer the order references
        customer_id: CustomerId,
        /// Product the order references
        product_id: ProductId,
        /// Whether the customer could not be resolved
        missing_customer: bool,
        /// Whether the product could not be resolved
        missing_product: bool,
    },

    /// A repository was asked for data while its cache is empty
    EmptyData {
        /// Source the repository reads from
        source_id: String,
    },

    /// A customer's total spend does not fit in a decimal; the customer is
    /// left out of the spend analytics
    SpendOverflow {
        /// The customer left out
        customer_id: CustomerId,
    },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecordRejected {
                source_id,
                index,
                record,
                reasons,
            } => write!(
                f,
                "Invalid entry #{index} in {source_id}: {record} ({})",
                reasons.join("; ")
            ),
            Self::ReferentialMiss {
                order_id,
                customer_id,
                product_id,
                missing_customer,
                missing_product,
            } => {
                write!(f, "Order {order_id} has invalid")?;
                match (missing_customer, missing_product) {
                    (true, true) => write!(f, " customer {customer_id} and product {product_id}"),
                    (true, false) => write!(f, " customer {customer_id}"),
                    _ => write!(f, " product {product_id}"),
                }?;
                write!(f, " reference")
            },
            Self::EmptyData { source_id } => write!(f, "No data available in cache for {source_id}"),
            Self::SpendOverflow { customer_id } => {
                write!(f, "Total spend of customer {customer_id} overflows")
            },
        }
    }
}

/// Sink for [`Issue`]s
pub trait Reporter: Send + Sync {
    /// Records one issue
    fn report(&self, issue: &Issue);
}

/// Forwards issues to `tracing`
///
/// Rejected records are logged at `error`, everything else at `warn`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, issue: &Issue) {
        match issue {
            Issue::RecordRejected {
                source_id, index, ..
            } => {
                tracing::error!(source_id = %source_id, index, "{issue}");
            },
            Issue::ReferentialMiss { order_id, .. } => {
                tracing::warn!(order_id = %order_id, "{issue}");
            },
            Issue::EmptyData { source_id } => {
                tracing::warn!(source_id = %source_id, "{issue}");
            },
            Issue::SpendOverflow { customer_id } => {
                tracing::warn!(customer_id = %customer_id, "{issue}");
            },
        }
    }
}

/// Discards every issue
#[derive(Clone, Copy, Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _issue: &Issue) {}
}
