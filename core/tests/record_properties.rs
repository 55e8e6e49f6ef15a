//! Property tests for the validate → convert contract.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use proptest::prelude::*;
use purchase_insights_core::convert::{
    CustomerConverter, OrderConverter, ProductConverter, RecordConverter,
};
use purchase_insights_core::model::{
    Customer, CustomerId, Order, OrderId, Product, ProductCategory, ProductId, ShippingMethod,
    ToRawRecord,
};
use purchase_insights_core::record::RawRecord;
use purchase_insights_core::validate::{
    CustomerValidator, OrderValidator, ProductValidator, RecordValidator,
};
use purchase_insights_core::{Decimal, ValidationConfig};

const PRODUCT_FIELDS: [&str; 4] = ["id", "name", "category", "price"];
const CUSTOMER_FIELDS: [&str; 5] = ["id", "first_name", "last_name", "age", "email"];
const ORDER_FIELDS: [&str; 6] = [
    "id",
    "customer_id",
    "product_id",
    "quantity",
    "discount",
    "shipping_method",
];

prop_compose! {
    fn arb_product()(
        id in any::<i64>(),
        name in "[A-Za-z][A-Za-z0-9 -]{0,20}",
        category in prop::sample::select(ProductCategory::ALL.to_vec()),
        cents in 1_i64..100_000_000,
    ) -> Product {
        Product::new(ProductId::new(id), name, category, Decimal::new(cents, 2))
    }
}

prop_compose! {
    fn arb_customer()(
        id in any::<i64>(),
        first_name in "[A-Z][a-z]{0,12}",
        last_name in "[A-Z][a-z]{0,12}",
        age in 0_u32..=65,
        email in "[a-z]{1,10}@[a-z]{1,10}\\.(com|org)",
    ) -> Customer {
        Customer::new(CustomerId::new(id), first_name, last_name, age, email)
    }
}

prop_compose! {
    fn arb_order()(
        id in any::<i64>(),
        customer_id in any::<i64>(),
        product_id in any::<i64>(),
        quantity in 1_u32..=u32::MAX,
        discount_thousandths in 0_i64..=1_000,
        shipping_method in prop::sample::select(ShippingMethod::ALL.to_vec()),
    ) -> Order {
        Order::new(
            OrderId::new(id),
            CustomerId::new(customer_id),
            ProductId::new(product_id),
            quantity,
            Decimal::new(discount_thousandths, 3),
            shipping_method,
        )
    }
}

fn without(record: &RawRecord, field: &str) -> RawRecord {
    let mut record = record.clone();
    record.remove(field);
    record
}

proptest! {
    #[test]
    fn valid_products_convert_to_equal_fields(product in arb_product()) {
        let record = product.to_raw_record();
        prop_assert!(ProductValidator::new().is_valid(&record));
        prop_assert_eq!(ProductConverter.convert(&record).unwrap(), product);
    }

    #[test]
    fn valid_customers_convert_to_equal_fields(customer in arb_customer()) {
        let record = customer.to_raw_record();
        let validator = CustomerValidator::new(&ValidationConfig::default().with_email_check(true));
        prop_assert!(validator.is_valid(&record));
        prop_assert_eq!(CustomerConverter.convert(&record).unwrap(), customer);
    }

    #[test]
    fn valid_orders_convert_to_equal_fields(order in arb_order()) {
        let record = order.to_raw_record();
        prop_assert!(OrderValidator::default().is_valid(&record));
        prop_assert_eq!(OrderConverter.convert(&record).unwrap(), order);
    }

    #[test]
    fn product_missing_a_required_field_is_rejected(
        product in arb_product(),
        field in prop::sample::select(PRODUCT_FIELDS.to_vec()),
    ) {
        let record = without(&product.to_raw_record(), field);
        let rejection = ProductValidator::new().validate(&record).unwrap_err();
        prop_assert!(rejection.reasons[0].contains(field));
    }

    #[test]
    fn customer_missing_a_required_field_is_rejected(
        customer in arb_customer(),
        field in prop::sample::select(CUSTOMER_FIELDS.to_vec()),
    ) {
        let record = without(&customer.to_raw_record(), field);
        prop_assert!(!CustomerValidator::default().is_valid(&record));
    }

    #[test]
    fn order_missing_a_required_field_is_rejected(
        order in arb_order(),
        field in prop::sample::select(ORDER_FIELDS.to_vec()),
    ) {
        let record = without(&order.to_raw_record(), field);
        prop_assert!(!OrderValidator::default().is_valid(&record));
    }

    #[test]
    fn out_of_range_ages_are_rejected(
        customer in arb_customer(),
        age in prop_oneof![-1_000_i64..0, 66_i64..1_000],
    ) {
        let mut record = customer.to_raw_record();
        record.insert("age", age);
        prop_assert!(!CustomerValidator::default().is_valid(&record));
    }

    #[test]
    fn non_positive_prices_are_rejected(product in arb_product(), cents in -10_000_i64..=0) {
        let mut record = product.to_raw_record();
        record.insert("price", Decimal::new(cents, 2));
        prop_assert!(!ProductValidator::new().is_valid(&record));
    }
}
