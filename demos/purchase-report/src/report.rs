//! Printable snapshot of the analytics.

use purchase_insights_core::model::{Customer, Order, Product};
use purchase_insights_repository::{AnalyticsService, EntitySource, total_spent};
use rust_decimal::Decimal;
use std::fmt;

/// Everything the batch prints, sorted by id
#[derive(Debug)]
pub struct Report {
    purchases: Vec<(Customer, Option<Decimal>, Vec<(Product, u64)>)>,
    averages: Vec<(Customer, Decimal)>,
    most_popular: Vec<Product>,
    highest: Vec<Customer>,
    lowest: Vec<Customer>,
}

impl Report {
    /// Run every analytics query once
    pub fn collect<C, P, O>(analytics: &mut AnalyticsService<C, P, O>) -> Self
    where
        C: EntitySource<Entity = Customer>,
        P: EntitySource<Entity = Product>,
        O: EntitySource<Entity = Order>,
    {
        let mut purchases: Vec<(Customer, Option<Decimal>, Vec<(Product, u64)>)> = analytics
            .summary()
            .iter()
            .map(|(customer, products)| {
                let mut lines: Vec<(Product, u64)> = products
                    .iter()
                    .map(|(product, quantity)| (product.clone(), *quantity))
                    .collect();
                lines.sort_by_key(|(product, _)| product.id);
                (customer.clone(), total_spent(products), lines)
            })
            .collect();
        purchases.sort_by_key(|(customer, ..)| customer.id);

        let mut averages: Vec<(Customer, Decimal)> =
            analytics.average_spend_per_customer().into_iter().collect();
        averages.sort_by_key(|(customer, _)| customer.id);

        let (highest, lowest) = analytics.highest_and_lowest_spenders();
        Self {
            purchases,
            averages,
            most_popular: analytics.most_popular_products(),
            highest,
            lowest,
        }
    }
}

fn names(customers: &[Customer]) -> String {
    customers
        .iter()
        .map(Customer::full_name)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Purchases")?;
        if self.purchases.is_empty() {
            writeln!(f, "  (no joined orders)")?;
        }
        for (customer, spent, lines) in &self.purchases {
            match spent {
                Some(spent) => writeln!(f, "  {} spent {spent}", customer.full_name())?,
                None => writeln!(f, "  {} spent more than can be represented", customer.full_name())?,
            }
            for (product, quantity) in lines {
                writeln!(f, "    {quantity} x {} @ {}", product.name, product.price)?;
            }
        }

        writeln!(f, "Average spend per unit")?;
        for (customer, average) in &self.averages {
            writeln!(f, "  {}: {}", customer.full_name(), average.round_dp(2))?;
        }

        let popular: Vec<&str> = self.most_popular.iter().map(|p| p.name.as_str()).collect();
        writeln!(f, "Most popular: {}", popular.join(", "))?;
        writeln!(f, "Highest spenders: {}", names(&self.highest))?;
        write!(f, "Lowest spenders: {}", names(&self.lowest))
    }
}
