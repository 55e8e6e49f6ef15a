//! Spend analytics over the purchase summary.
//!
//! All queries read the builder's current summary without forcing a
//! rebuild. Money is computed with exact decimals; quantities are integers.
//! Lists are sorted by id so results are deterministic.
//!
//! A customer whose total spend does not fit in a [`Decimal`] is reported as
//! [`Issue::SpendOverflow`] and left out of the spend queries.

use crate::entity::EntitySource;
use crate::summary::{ProductQuantities, PurchaseSummary, PurchaseSummaryBuilder};
use purchase_insights_core::model::{Customer, Order, Product};
use purchase_insights_core::report::{Issue, Reporter};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

/// Customers tied at the highest and at the lowest total spend
pub type SpendExtremes = (Vec<Customer>, Vec<Customer>);

/// Queries over a [`PurchaseSummaryBuilder`]
#[derive(Debug)]
pub struct AnalyticsService<C, P, O> {
    builder: PurchaseSummaryBuilder<C, P, O>,
}

impl<C, P, O> AnalyticsService<C, P, O>
where
    C: EntitySource<Entity = Customer>,
    P: EntitySource<Entity = Product>,
    O: EntitySource<Entity = Order>,
{
    /// Wrap a builder
    #[must_use]
    pub const fn new(builder: PurchaseSummaryBuilder<C, P, O>) -> Self {
        Self { builder }
    }

    /// Current summary (cached if already built)
    pub fn summary(&mut self) -> &PurchaseSummary {
        self.builder.summary(false)
    }

    /// Rebuild the summary from the sources
    pub fn refresh(&mut self) -> &PurchaseSummary {
        self.builder.summary(true)
    }

    /// Access the wrapped builder, e.g. to reach its sources
    pub const fn builder_mut(&mut self) -> &mut PurchaseSummaryBuilder<C, P, O> {
        &mut self.builder
    }

    /// Total spend divided by total units, per customer.
    ///
    /// A customer with no units averages exactly zero.
    pub fn average_spend_per_customer(&mut self) -> HashMap<Customer, Decimal> {
        let reporter = Arc::clone(self.builder.reporter());
        self.summary()
            .iter()
            .filter_map(|(customer, purchases)| {
                let units = purchases
                    .values()
                    .fold(0_u64, |total, quantity| total.saturating_add(*quantity));
                if units == 0 {
                    return Some((customer.clone(), Decimal::ZERO));
                }
                let spent = spend_or_report(reporter.as_ref(), customer, purchases)?;
                let average = spent.checked_div(Decimal::from(units))?;
                Some((customer.clone(), average))
            })
            .collect()
    }

    /// Products whose total quantity across customers is the maximum.
    ///
    /// Ties are all returned; an empty summary yields an empty list.
    pub fn most_popular_products(&mut self) -> Vec<Product> {
        let mut totals: HashMap<&Product, u64> = HashMap::new();
        for (_, purchases) in self.summary() {
            for (product, quantity) in purchases {
                let total = totals.entry(product).or_insert(0);
                *total = total.saturating_add(*quantity);
            }
        }

        let Some(max) = totals.values().copied().max() else {
            return Vec::new();
        };
        let mut popular: Vec<Product> = totals
            .into_iter()
            .filter(|(_, total)| *total == max)
            .map(|(product, _)| product.clone())
            .collect();
        popular.sort_by_key(|product| product.id);
        popular
    }

    /// Customers tied at the highest and at the lowest total spend.
    ///
    /// Ties are inclusive on both ends, so a single customer is both. An
    /// empty summary yields `([], [])`.
    pub fn highest_and_lowest_spenders(&mut self) -> SpendExtremes {
        let reporter = Arc::clone(self.builder.reporter());
        let spend: Vec<(&Customer, Decimal)> = self
            .summary()
            .iter()
            .filter_map(|(customer, purchases)| {
                spend_or_report(reporter.as_ref(), customer, purchases)
                    .map(|total| (customer, total))
            })
            .collect();

        let (Some(max), Some(min)) = (
            spend.iter().map(|(_, total)| *total).max(),
            spend.iter().map(|(_, total)| *total).min(),
        ) else {
            return (Vec::new(), Vec::new());
        };

        let tied_at = |target: Decimal| {
            let mut customers: Vec<Customer> = spend
                .iter()
                .filter(|(_, total)| *total == target)
                .map(|(customer, _)| (*customer).clone())
                .collect();
            customers.sort_by_key(|customer| customer.id);
            customers
        };
        (tied_at(max), tied_at(min))
    }
}

/// Sum of price × quantity over one customer's purchases, or `None` when the
/// sum exceeds [`Decimal::MAX`]
#[must_use]
pub fn total_spent(purchases: &ProductQuantities) -> Option<Decimal> {
    purchases
        .iter()
        .try_fold(Decimal::ZERO, |total, (product, quantity)| {
            total.checked_add(product.total_price(*quantity)?)
        })
}

fn spend_or_report(
    reporter: &dyn Reporter,
    customer: &Customer,
    purchases: &ProductQuantities,
) -> Option<Decimal> {
    let spent = total_spent(purchases);
    if spent.is_none() {
        reporter.report(&Issue::SpendOverflow {
            customer_id: customer.id,
        });
    }
    spent
}
