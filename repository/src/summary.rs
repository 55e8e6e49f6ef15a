//! Purchase summary: customer → product → cumulative quantity.
//!
//! The [`PurchaseSummaryBuilder`] joins orders against the customers and
//! products its sources currently hold, by id. Orders that reference an
//! unknown customer or product are dropped and reported, never fatal.
//!
//! The built summary is memoized. Callers decide when to rebuild by passing
//! `force_refresh`; changes in the sources are not picked up otherwise.

use crate::entity::EntitySource;
use purchase_insights_core::model::{Customer, CustomerId, Order, Product, ProductId};
use purchase_insights_core::report::{Issue, Reporter};
use std::collections::HashMap;
use std::collections::hash_map;
use std::sync::Arc;

/// Cumulative quantity per product for one customer
pub type ProductQuantities = HashMap<Product, u64>;

/// Nested mapping of customer → product → cumulative quantity
///
/// Only customers and products that are the target of at least one joined
/// order appear as keys. Enumeration order is unspecified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PurchaseSummary {
    purchases: HashMap<Customer, ProductQuantities>,
}

impl PurchaseSummary {
    /// Creates an empty summary
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of `product` to `customer`'s running total,
    /// saturating at `u64::MAX`
    pub fn add(&mut self, customer: Customer, product: Product, quantity: u64) {
        let total = self
            .purchases
            .entry(customer)
            .or_default()
            .entry(product)
            .or_insert(0);
        *total = total.saturating_add(quantity);
    }

    /// Purchases of one customer
    #[must_use]
    pub fn get(&self, customer: &Customer) -> Option<&ProductQuantities> {
        self.purchases.get(customer)
    }

    /// Cumulative quantity for a (customer, product) pair; zero if absent
    #[must_use]
    pub fn quantity(&self, customer: &Customer, product: &Product) -> u64 {
        self.get(customer)
            .and_then(|purchases| purchases.get(product))
            .copied()
            .unwrap_or(0)
    }

    /// Customers present in the summary
    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.purchases.keys()
    }

    /// Iterates `(customer, purchases)` pairs
    pub fn iter(&self) -> hash_map::Iter<'_, Customer, ProductQuantities> {
        self.purchases.iter()
    }

    /// Number of customers
    #[must_use]
    pub fn len(&self) -> usize {
        self.purchases.len()
    }

    /// Whether no order was joined
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.purchases.is_empty()
    }

    /// Sum of every quantity in the summary, saturating at `u64::MAX`
    #[must_use]
    pub fn total_units(&self) -> u64 {
        self.purchases
            .values()
            .flat_map(HashMap::values)
            .fold(0, |total, quantity| total.saturating_add(*quantity))
    }

    /// Borrow the underlying map, e.g. for unordered comparison in tests
    #[must_use]
    pub const fn as_map(&self) -> &HashMap<Customer, ProductQuantities> {
        &self.purchases
    }
}

impl<'a> IntoIterator for &'a PurchaseSummary {
    type Item = (&'a Customer, &'a ProductQuantities);
    type IntoIter = hash_map::Iter<'a, Customer, ProductQuantities>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<HashMap<Customer, ProductQuantities>> for PurchaseSummary {
    fn from(purchases: HashMap<Customer, ProductQuantities>) -> Self {
        Self { purchases }
    }
}

/// Builds and memoizes the [`PurchaseSummary`] from three entity sources
///
/// # Type Parameters
///
/// - `C`: source of [`Customer`]s
/// - `P`: source of [`Product`]s
/// - `O`: source of [`Order`]s
pub struct PurchaseSummaryBuilder<C, P, O> {
    customers: C,
    products: P,
    orders: O,
    reporter: Arc<dyn Reporter>,
    cached: Option<PurchaseSummary>,
}

impl<C, P, O> PurchaseSummaryBuilder<C, P, O>
where
    C: EntitySource<Entity = Customer>,
    P: EntitySource<Entity = Product>,
    O: EntitySource<Entity = Order>,
{
    /// Create a builder; nothing is built until [`Self::summary`]
    #[must_use]
    pub fn new(customers: C, products: P, orders: O, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            customers,
            products,
            orders,
            reporter,
            cached: None,
        }
    }

    /// The purchase summary, rebuilt only when forced or not yet built.
    ///
    /// Without `force_refresh`, a cached summary is returned unchanged even
    /// if the sources have changed since it was built.
    pub fn summary(&mut self, force_refresh: bool) -> &PurchaseSummary {
        let summary = match self.cached.take() {
            Some(summary) if !force_refresh => summary,
            _ => {
                tracing::info!("Building purchase summary from repositories");
                self.build()
            },
        };
        self.cached.insert(summary)
    }

    /// Whether a summary is currently cached
    #[must_use]
    pub const fn is_cached(&self) -> bool {
        self.cached.is_some()
    }

    /// Drops the cached summary so the next call rebuilds it
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Customer source
    pub const fn customers_mut(&mut self) -> &mut C {
        &mut self.customers
    }

    /// Product source
    pub const fn products_mut(&mut self) -> &mut P {
        &mut self.products
    }

    /// Order source
    pub const fn orders_mut(&mut self) -> &mut O {
        &mut self.orders
    }

    /// Sink the builder reports issues to
    #[must_use]
    pub const fn reporter(&self) -> &Arc<dyn Reporter> {
        &self.reporter
    }

    fn build(&self) -> PurchaseSummary {
        // Duplicate ids: the last entity wins.
        let customers: HashMap<CustomerId, Customer> = self
            .customers
            .snapshot()
            .into_iter()
            .map(|customer| (customer.id, customer))
            .collect();
        let products: HashMap<ProductId, Product> = self
            .products
            .snapshot()
            .into_iter()
            .map(|product| (product.id, product))
            .collect();
        let orders = self.orders.snapshot();

        let mut summary = PurchaseSummary::new();
        let mut dropped = 0_usize;
        for order in &orders {
            let customer = customers.get(&order.customer_id);
            let product = products.get(&order.product_id);
            if let (Some(customer), Some(product)) = (customer, product) {
                summary.add(customer.clone(), product.clone(), u64::from(order.quantity));
            } else {
                dropped += 1;
                self.reporter.report(&Issue::ReferentialMiss {
                    order_id: order.id,
                    customer_id: order.customer_id,
                    product_id: order.product_id,
                    missing_customer: customer.is_none(),
                    missing_product: product.is_none(),
                });
            }
        }

        tracing::info!(
            orders = orders.len(),
            joined = orders.len() - dropped,
            dropped,
            customers = summary.len(),
            "Built purchase summary"
        );
        summary
    }
}

impl<C, P, O> std::fmt::Debug for PurchaseSummaryBuilder<C, P, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PurchaseSummaryBuilder")
            .field("cached", &self.cached.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use purchase_insights_core::model::{OrderId, ProductCategory, ShippingMethod};
    use purchase_insights_core::report::NullReporter;
    use rust_decimal::Decimal;

    fn customer(id: i64) -> Customer {
        Customer::new(
            CustomerId::new(id),
            format!("First{id}"),
            format!("Last{id}"),
            30,
            format!("c{id}@example.com"),
        )
    }

    fn product(id: i64, price: i64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Product{id}"),
            ProductCategory::Books,
            Decimal::from(price),
        )
    }

    fn order(id: i64, customer_id: i64, product_id: i64, quantity: u32) -> Order {
        Order::new(
            OrderId::new(id),
            CustomerId::new(customer_id),
            ProductId::new(product_id),
            quantity,
            Decimal::ZERO,
            ShippingMethod::Standard,
        )
    }

    fn builder(
        customers: Vec<Customer>,
        products: Vec<Product>,
        orders: Vec<Order>,
    ) -> PurchaseSummaryBuilder<Vec<Customer>, Vec<Product>, Vec<Order>> {
        PurchaseSummaryBuilder::new(customers, products, orders, Arc::new(NullReporter))
    }

    #[test]
    fn sums_quantities_per_pair() {
        let mut builder = builder(
            vec![customer(1), customer(2)],
            vec![product(101, 10), product(102, 20)],
            vec![
                order(1, 1, 101, 2),
                order(2, 1, 102, 5),
                order(3, 2, 101, 1),
                order(4, 1, 101, 3),
            ],
        );
        let summary = builder.summary(false);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary.quantity(&customer(1), &product(101, 10)), 5);
        assert_eq!(summary.quantity(&customer(1), &product(102, 20)), 5);
        assert_eq!(summary.quantity(&customer(2), &product(101, 10)), 1);
        assert_eq!(summary.total_units(), 11);
    }

    #[test]
    fn customers_without_orders_are_not_keys() {
        let mut builder = builder(
            vec![customer(1), customer(2)],
            vec![product(101, 10)],
            vec![order(1, 1, 101, 1)],
        );
        let summary = builder.summary(false);
        assert!(summary.get(&customer(2)).is_none());
        assert_eq!(summary.customers().count(), 1);
    }

    #[test]
    fn duplicate_ids_last_one_wins() {
        let renamed = Customer::new(
            CustomerId::new(1),
            "Renamed".to_string(),
            "Customer".to_string(),
            40,
            "renamed@example.com".to_string(),
        );
        let mut builder = builder(
            vec![customer(1), renamed.clone()],
            vec![product(101, 10)],
            vec![order(1, 1, 101, 1)],
        );
        let summary = builder.summary(false);
        assert_eq!(summary.customers().collect::<Vec<_>>(), vec![&renamed]);
    }

    #[test]
    fn empty_inputs_give_empty_summary() {
        assert!(builder(vec![], vec![], vec![]).summary(false).is_empty());
        assert!(
            builder(vec![customer(1)], vec![product(101, 1)], vec![])
                .summary(false)
                .is_empty()
        );
        assert!(
            builder(vec![], vec![product(101, 1)], vec![order(1, 1, 101, 1)])
                .summary(false)
                .is_empty()
        );
    }

    #[test]
    fn summary_is_memoized_until_forced() {
        let mut builder = builder(vec![customer(1)], vec![product(101, 10)], vec![order(1, 1, 101, 1)]);
        let first = builder.summary(false).clone();

        builder.orders_mut().push(order(2, 1, 101, 4));
        assert_eq!(builder.summary(false), &first);

        let refreshed = builder.summary(true);
        assert_eq!(refreshed.quantity(&customer(1), &product(101, 10)), 5);
    }

    #[test]
    fn invalidate_forces_rebuild_on_next_call() {
        let mut builder = builder(vec![customer(1)], vec![product(101, 10)], vec![]);
        assert!(builder.summary(false).is_empty());
        assert!(builder.is_cached());

        builder.orders_mut().push(order(1, 1, 101, 2));
        builder.invalidate();
        assert!(!builder.is_cached());
        assert_eq!(builder.summary(false).total_units(), 2);
    }
}
