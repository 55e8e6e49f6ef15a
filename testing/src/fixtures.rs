//! Shared sample entities and raw records.
//!
//! Two customers, two products and three orders with hand-checkable totals:
//!
//! | order | customer | product          | qty |
//! |-------|----------|------------------|-----|
//! | 1     | 1 John   | 101 Laptop 1500  | 2   |
//! | 2     | 1 John   | 102 T-Shirt 20   | 5   |
//! | 3     | 2 Jane   | 101 Laptop 1500  | 1   |

use purchase_insights_core::model::{
    Customer, CustomerId, Order, OrderId, Product, ProductCategory, ProductId, ShippingMethod,
    ToRawRecord,
};
use purchase_insights_core::record::RawRecord;
use rust_decimal::Decimal;

/// John Doe, 30
#[must_use]
pub fn customer_1() -> Customer {
    Customer::new(
        CustomerId::new(1),
        "John".to_string(),
        "Doe".to_string(),
        30,
        "john.doe@example.com".to_string(),
    )
}

/// Jane Doe, 25
#[must_use]
pub fn customer_2() -> Customer {
    Customer::new(
        CustomerId::new(2),
        "Jane".to_string(),
        "Doe".to_string(),
        25,
        "jane.doe@example.com".to_string(),
    )
}

/// Laptop at 1500.00
#[must_use]
pub fn product_1() -> Product {
    Product::new(
        ProductId::new(101),
        "Laptop".to_string(),
        ProductCategory::Electronics,
        Decimal::new(150_000, 2),
    )
}

/// T-Shirt at 20.00
#[must_use]
pub fn product_2() -> Product {
    Product::new(
        ProductId::new(102),
        "T-Shirt".to_string(),
        ProductCategory::Clothing,
        Decimal::new(2_000, 2),
    )
}

/// Customer 1 buys 2 laptops
#[must_use]
pub fn order_1() -> Order {
    Order::new(
        OrderId::new(1),
        CustomerId::new(1),
        ProductId::new(101),
        2,
        Decimal::new(1, 1),
        ShippingMethod::Standard,
    )
}

/// Customer 1 buys 5 T-shirts
#[must_use]
pub fn order_2() -> Order {
    Order::new(
        OrderId::new(2),
        CustomerId::new(1),
        ProductId::new(102),
        5,
        Decimal::ZERO,
        ShippingMethod::Express,
    )
}

/// Customer 2 buys 1 laptop
#[must_use]
pub fn order_3() -> Order {
    Order::new(
        OrderId::new(3),
        CustomerId::new(2),
        ProductId::new(101),
        1,
        Decimal::new(5, 2),
        ShippingMethod::Standard,
    )
}

/// Both sample customers
#[must_use]
pub fn customers() -> Vec<Customer> {
    vec![customer_1(), customer_2()]
}

/// Both sample products
#[must_use]
pub fn products() -> Vec<Product> {
    vec![product_1(), product_2()]
}

/// All three sample orders
#[must_use]
pub fn orders() -> Vec<Order> {
    vec![order_1(), order_2(), order_3()]
}

/// Raw form of [`customers`]
#[must_use]
pub fn raw_customers() -> Vec<RawRecord> {
    customers().iter().map(ToRawRecord::to_raw_record).collect()
}

/// Raw form of [`products`]
#[must_use]
pub fn raw_products() -> Vec<RawRecord> {
    products().iter().map(ToRawRecord::to_raw_record).collect()
}

/// Raw form of [`orders`]
#[must_use]
pub fn raw_orders() -> Vec<RawRecord> {
    orders().iter().map(ToRawRecord::to_raw_record).collect()
}
