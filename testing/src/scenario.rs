//! Fluent Given-When-Then harness for the summary builder and analytics.

#![allow(clippy::module_name_repetitions)] // SummaryScenario is the natural name

use crate::mocks::{InMemorySource, RecordingReporter};
use purchase_insights_core::model::{Customer, Order, Product};
use purchase_insights_core::report::Issue;
use purchase_insights_repository::{AnalyticsService, PurchaseSummary, PurchaseSummaryBuilder};
use std::sync::Arc;

/// Analytics service over in-memory sources, as built by [`SummaryScenario`]
pub type ScenarioAnalytics =
    AnalyticsService<InMemorySource<Customer>, InMemorySource<Product>, InMemorySource<Order>>;

/// Type alias for summary assertion functions
type SummaryAssertion = Box<dyn FnOnce(&PurchaseSummary)>;

/// Type alias for analytics assertion functions
type AnalyticsAssertion = Box<dyn FnOnce(&mut ScenarioAnalytics)>;

/// Type alias for issue assertion functions
type IssueAssertion = Box<dyn FnOnce(&[Issue])>;

/// Given entities, when the summary is built, then assert on it
///
/// # Example
///
/// ```
/// use purchase_insights_testing::{SummaryScenario, fixtures};
///
/// SummaryScenario::new()
///     .given_customers(fixtures::customers())
///     .given_products(fixtures::products())
///     .given_orders(fixtures::orders())
///     .then_summary(|summary| {
///         assert_eq!(summary.quantity(&fixtures::customer_1(), &fixtures::product_2()), 5);
///     })
///     .then_analytics(|analytics| {
///         assert_eq!(analytics.most_popular_products(), vec![fixtures::product_2()]);
///     })
///     .then_issues(|issues| assert!(issues.is_empty()))
///     .run();
/// ```
#[derive(Default)]
pub struct SummaryScenario {
    customers: Vec<Customer>,
    products: Vec<Product>,
    orders: Vec<Order>,
    summary_assertions: Vec<SummaryAssertion>,
    analytics_assertions: Vec<AnalyticsAssertion>,
    issue_assertions: Vec<IssueAssertion>,
}

impl SummaryScenario {
    /// Create an empty scenario
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Customers known to the builder (Given)
    #[must_use]
    pub fn given_customers(mut self, customers: Vec<Customer>) -> Self {
        self.customers = customers;
        self
    }

    /// Products known to the builder (Given)
    #[must_use]
    pub fn given_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    /// Orders to join (Given)
    #[must_use]
    pub fn given_orders(mut self, orders: Vec<Order>) -> Self {
        self.orders = orders;
        self
    }

    /// Add an assertion about the built summary (Then)
    #[must_use]
    pub fn then_summary<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&PurchaseSummary) + 'static,
    {
        self.summary_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion against the analytics service (Then)
    #[must_use]
    pub fn then_analytics<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&mut ScenarioAnalytics) + 'static,
    {
        self.analytics_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the issues reported while building (Then)
    #[must_use]
    pub fn then_issues<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Issue]) + 'static,
    {
        self.issue_assertions.push(Box::new(assertion));
        self
    }

    /// Build the summary (When) and run every assertion
    ///
    /// Summary assertions run first, then analytics, then issues, so issue
    /// assertions also see anything the analytics queries reported.
    ///
    /// # Panics
    ///
    /// Panics if any assertion fails.
    pub fn run(self) {
        let reporter = RecordingReporter::new();
        let builder = PurchaseSummaryBuilder::new(
            InMemorySource::new(self.customers),
            InMemorySource::new(self.products),
            InMemorySource::new(self.orders),
            Arc::new(reporter.clone()),
        );
        let mut analytics = AnalyticsService::new(builder);

        let summary = analytics.summary().clone();
        for assertion in self.summary_assertions {
            assertion(&summary);
        }

        for assertion in self.analytics_assertions {
            assertion(&mut analytics);
        }

        let issues = reporter.issues();
        for assertion in self.issue_assertions {
            assertion(&issues);
        }
    }
}

/// Helper assertions for reported issues
pub mod assertions {
    use purchase_insights_core::model::OrderId;
    use purchase_insights_core::report::Issue;

    /// Assert that exactly the given orders were dropped, in that order
    ///
    /// # Panics
    ///
    /// Panics if the referential misses differ from `expected`.
    pub fn assert_dropped_orders(issues: &[Issue], expected: &[i64]) {
        let dropped: Vec<OrderId> = issues
            .iter()
            .filter_map(|issue| match issue {
                Issue::ReferentialMiss { order_id, .. } => Some(*order_id),
                _ => None,
            })
            .collect();
        let expected: Vec<OrderId> = expected.iter().copied().map(OrderId::new).collect();
        assert_eq!(dropped, expected, "Unexpected dropped orders");
    }

    /// Assert the number of rejected records
    ///
    /// # Panics
    ///
    /// Panics if the count doesn't match.
    pub fn assert_rejections_count(issues: &[Issue], expected: usize) {
        let rejected = issues
            .iter()
            .filter(|issue| matches!(issue, Issue::RecordRejected { .. }))
            .count();
        assert_eq!(
            rejected, expected,
            "Expected {expected} rejected records, but found {rejected}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::assertions::assert_dropped_orders;
    use super::*;
    use crate::fixtures;
    use purchase_insights_core::model::{CustomerId, OrderId, ProductId, ShippingMethod};
    use rust_decimal::Decimal;

    #[test]
    fn reports_one_miss_per_dropped_order() {
        let mut orders = fixtures::orders();
        orders.push(Order::new(
            OrderId::new(9),
            CustomerId::new(99),
            ProductId::new(101),
            1,
            Decimal::ZERO,
            ShippingMethod::Standard,
        ));

        SummaryScenario::new()
            .given_customers(fixtures::customers())
            .given_products(fixtures::products())
            .given_orders(orders)
            .then_summary(|summary| assert_eq!(summary.total_units(), 8))
            .then_issues(|issues| assert_dropped_orders(issues, &[9]))
            .run();
    }
}
