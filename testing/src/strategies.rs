//! Proptest strategies for valid entities.
//!
//! Every generated entity satisfies the default validation rules, so its
//! raw projection must be accepted and convert back to an equal entity.

use proptest::prelude::*;
use purchase_insights_core::model::{
    Customer, CustomerId, Order, OrderId, Product, ProductCategory, ProductId, ShippingMethod,
};
use rust_decimal::Decimal;

prop_compose! {
    /// A product with a strictly positive two-decimal price
    pub fn arb_product()(
        id in 1_i64..10_000,
        name in "[A-Z][a-z]{0,11}( [A-Z][a-z]{0,7})?",
        category in prop::sample::select(ProductCategory::ALL.to_vec()),
        cents in 1_i64..10_000_000,
    ) -> Product {
        Product::new(ProductId::new(id), name, category, Decimal::new(cents, 2))
    }
}

prop_compose! {
    /// A customer aged within the default `[0, 65]` range
    pub fn arb_customer()(
        id in 1_i64..10_000,
        first_name in "[A-Z][a-z]{1,10}",
        last_name in "[A-Z][a-z]{1,10}",
        age in 0_u32..=65,
        user in "[a-z]{1,8}(\\.[a-z]{1,8})?",
    ) -> Customer {
        let email = format!("{user}@example.com");
        Customer::new(CustomerId::new(id), first_name, last_name, age, email)
    }
}

prop_compose! {
    /// An order with positive quantity and a discount in `[0, 1]`
    pub fn arb_order()(
        id in 1_i64..10_000,
        customer_id in 1_i64..10_000,
        product_id in 1_i64..10_000,
        quantity in 1_u32..1_000,
        discount_hundredths in 0_i64..=100,
        shipping_method in prop::sample::select(ShippingMethod::ALL.to_vec()),
    ) -> Order {
        Order::new(
            OrderId::new(id),
            CustomerId::new(customer_id),
            ProductId::new(product_id),
            quantity,
            Decimal::new(discount_hundredths, 2),
            shipping_method,
        )
    }
}

prop_compose! {
    /// An order joining one of `customers` customer ids with one of
    /// `products` product ids
    pub fn arb_joined_order(customers: i64, products: i64)(
        id in 1_i64..10_000,
        customer_id in 1..=customers,
        product_id in 1..=products,
        quantity in 1_u32..50,
    ) -> Order {
        Order::new(
            OrderId::new(id),
            CustomerId::new(customer_id),
            ProductId::new(product_id),
            quantity,
            Decimal::ZERO,
            ShippingMethod::Standard,
        )
    }
}
