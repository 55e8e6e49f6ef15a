//! Record validators.
//!
//! A validator decides whether a raw record may be converted. It is a pure
//! strategy: it never logs and never fails, it only returns a [`Rejection`]
//! listing what is wrong. The repository decides what to do with it.
//!
//! The default validators check every invariant the matching converter in
//! [`crate::convert`] relies on, so conversion of an accepted record cannot
//! fail.

pub mod rules;

use crate::config::ValidationConfig;
use crate::model::{ProductCategory, ShippingMethod};
use crate::record::RawRecord;
use rules::RuleResult;
use rust_decimal::Decimal;

/// Why a record was refused
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}", .reasons.join("; "))]
pub struct Rejection {
    /// Every broken rule, in check order
    pub reasons: Vec<String>,
}

impl Rejection {
    /// Rejection with a single reason
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reasons: vec![reason.into()],
        }
    }
}

/// Decides whether a raw record is acceptable for one entity kind
pub trait RecordValidator: Send + Sync {
    /// Checks the record
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] listing every broken rule.
    fn validate(&self, record: &RawRecord) -> Result<(), Rejection>;

    /// Boolean view of [`Self::validate`]
    fn is_valid(&self, record: &RawRecord) -> bool {
        self.validate(record).is_ok()
    }
}

/// Runs required-key presence first, then every rule, collecting failures
fn run_rules(record: &RawRecord, required: &[String], checks: &[RuleResult]) -> Result<(), Rejection> {
    rules::has_required_keys(record, required).map_err(Rejection::new)?;
    let reasons: Vec<String> = checks
        .iter()
        .filter_map(|check| check.as_ref().err().cloned())
        .collect();
    if reasons.is_empty() {
        Ok(())
    } else {
        Err(Rejection { reasons })
    }
}

fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

/// Validates product records
#[derive(Clone, Debug)]
pub struct ProductValidator {
    required_fields: Vec<String>,
}

impl ProductValidator {
    /// Validator requiring `id, name, category, price`
    #[must_use]
    pub fn new() -> Self {
        Self {
            required_fields: fields(&["id", "name", "category", "price"]),
        }
    }

    /// Replaces the required field list
    #[must_use]
    pub fn with_required_fields(mut self, required_fields: &[&str]) -> Self {
        self.required_fields = fields(required_fields);
        self
    }
}

impl Default for ProductValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordValidator for ProductValidator {
    fn validate(&self, record: &RawRecord) -> Result<(), Rejection> {
        run_rules(
            record,
            &self.required_fields,
            &[
                rules::integral(record, "id"),
                record.text("name").map(|_| ()).map_err(|e| e.to_string()),
                rules::one_of::<ProductCategory>(record, "category"),
                rules::positive(record, "price"),
            ],
        )
    }
}

/// Validates customer records
#[derive(Clone, Debug)]
pub struct CustomerValidator {
    required_fields: Vec<String>,
    min_age: i64,
    max_age: i64,
    check_email: bool,
}

impl CustomerValidator {
    /// Validator requiring `id, first_name, last_name, age, email` with
    /// limits taken from `config`
    #[must_use]
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            required_fields: fields(&["id", "first_name", "last_name", "age", "email"]),
            min_age: config.min_age,
            max_age: config.max_age,
            check_email: config.check_email,
        }
    }

    /// Replaces the required field list
    #[must_use]
    pub fn with_required_fields(mut self, required_fields: &[&str]) -> Self {
        self.required_fields = fields(required_fields);
        self
    }

    fn age_in_range(&self, record: &RawRecord) -> RuleResult {
        let age = record.integer("age").map_err(|e| e.to_string())?;
        if rules::int_in_range(age, self.min_age, self.max_age) {
            Ok(())
        } else {
            Err(format!(
                "Age {age} outside [{}, {}]",
                self.min_age, self.max_age
            ))
        }
    }

    fn email_shape(&self, record: &RawRecord) -> RuleResult {
        let email = record.text("email").map_err(|e| e.to_string())?;
        if !self.check_email || rules::is_valid_email(email) {
            Ok(())
        } else {
            Err(format!("Invalid email `{email}`"))
        }
    }
}

impl Default for CustomerValidator {
    fn default() -> Self {
        Self::new(&ValidationConfig::default())
    }
}

impl RecordValidator for CustomerValidator {
    fn validate(&self, record: &RawRecord) -> Result<(), Rejection> {
        run_rules(
            record,
            &self.required_fields,
            &[
                rules::integral(record, "id"),
                record.text("first_name").map(|_| ()).map_err(|e| e.to_string()),
                record.text("last_name").map(|_| ()).map_err(|e| e.to_string()),
                self.age_in_range(record),
                self.email_shape(record),
            ],
        )
    }
}

/// Validates order records
#[derive(Clone, Debug)]
pub struct OrderValidator {
    required_fields: Vec<String>,
    min_discount: Decimal,
    max_discount: Decimal,
}

impl OrderValidator {
    /// Validator requiring `id, customer_id, product_id, quantity, discount,
    /// shipping_method` with limits taken from `config`
    #[must_use]
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            required_fields: fields(&[
                "id",
                "customer_id",
                "product_id",
                "quantity",
                "discount",
                "shipping_method",
            ]),
            min_discount: config.min_discount,
            max_discount: config.max_discount,
        }
    }

    /// Replaces the required field list
    #[must_use]
    pub fn with_required_fields(mut self, required_fields: &[&str]) -> Self {
        self.required_fields = fields(required_fields);
        self
    }

    fn quantity(record: &RawRecord) -> RuleResult {
        rules::positive(record, "quantity")?;
        let quantity = record.integer("quantity").map_err(|e| e.to_string())?;
        if rules::int_in_range(quantity, 1, i64::from(u32::MAX)) {
            Ok(())
        } else {
            Err(format!("Quantity {quantity} is too large"))
        }
    }

    fn discount_in_range(&self, record: &RawRecord) -> RuleResult {
        let discount = record.decimal("discount").map_err(|e| e.to_string())?;
        if rules::decimal_in_range(&discount.to_string(), self.min_discount, self.max_discount) {
            Ok(())
        } else {
            Err(format!(
                "Discount {discount} outside [{}, {}]",
                self.min_discount, self.max_discount
            ))
        }
    }
}

impl Default for OrderValidator {
    fn default() -> Self {
        Self::new(&ValidationConfig::default())
    }
}

impl RecordValidator for OrderValidator {
    fn validate(&self, record: &RawRecord) -> Result<(), Rejection> {
        run_rules(
            record,
            &self.required_fields,
            &[
                rules::integral(record, "id"),
                rules::integral(record, "customer_id"),
                rules::integral(record, "product_id"),
                Self::quantity(record),
                self.discount_in_range(record),
                rules::one_of::<ShippingMethod>(record, "shipping_method"),
            ],
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    fn product(id: i64, name: &str, category: &str, price: &str) -> RawRecord {
        RawRecord::new()
            .with("id", id)
            .with("name", name)
            .with("category", category)
            .with("price", price)
    }

    #[test]
    fn product_records() {
        let validator = ProductValidator::new();
        assert!(validator.is_valid(&product(1, "AA", "Electronics", "121.12")));
        assert!(validator.is_valid(&product(12, "AA__", "Books", "1.12")));
        assert!(!validator.is_valid(&product(2, "BB", "Electronics", "-1.0")));
        assert!(!validator.is_valid(&product(3, "CC", "Clothing", "0")));
        assert!(!validator.is_valid(&product(4, "DD", "Books", "abc")));
        assert!(!validator.is_valid(&product(5, "EE", "Toys", "3.00")));
    }

    #[test]
    fn product_missing_price_is_rejected_with_key_list() {
        let mut record = product(101, "Laptop", "Electronics", "1500.00");
        record.remove("price");
        let rejection = ProductValidator::new().validate(&record).unwrap_err();
        assert_eq!(rejection.reasons, vec!["Missing keys: price".to_string()]);
    }

    #[test]
    fn product_collects_every_broken_rule() {
        let rejection = ProductValidator::new()
            .validate(&product(1, "AA", "Toys", "-3"))
            .unwrap_err();
        assert_eq!(rejection.reasons.len(), 2);
    }

    fn customer(age: i64, email: &str) -> RawRecord {
        RawRecord::new()
            .with("id", 1_i64)
            .with("first_name", "John")
            .with("last_name", "Doe")
            .with("age", age)
            .with("email", email)
    }

    #[test]
    fn customer_age_limits() {
        let validator = CustomerValidator::default();
        assert!(validator.is_valid(&customer(30, "john.doe@example.com")));
        assert!(validator.is_valid(&customer(0, "john.doe@example.com")));
        assert!(validator.is_valid(&customer(65, "john.doe@example.com")));
        assert!(!validator.is_valid(&customer(66, "john.doe@example.com")));
        assert!(!validator.is_valid(&customer(-1, "john.doe@example.com")));
    }

    #[test]
    fn customer_email_check_is_opt_in() {
        let lenient = CustomerValidator::default();
        assert!(lenient.is_valid(&customer(30, "john@localhost")));

        let strict = CustomerValidator::new(&ValidationConfig::default().with_email_check(true));
        assert!(!strict.is_valid(&customer(30, "john@localhost")));
        assert!(strict.is_valid(&customer(30, "john@example.com")));
    }

    fn order(quantity: impl Into<crate::record::FieldValue>, discount: &str, shipping: &str) -> RawRecord {
        RawRecord::new()
            .with("id", 1_i64)
            .with("customer_id", 1_i64)
            .with("product_id", 101_i64)
            .with("quantity", quantity)
            .with("discount", discount)
            .with("shipping_method", shipping)
    }

    #[test]
    fn order_discount_range() {
        let validator = OrderValidator::default();
        assert!(validator.is_valid(&order(2_i64, "0.1", "Standard")));
        assert!(validator.is_valid(&order(2_i64, "0", "Express")));
        assert!(validator.is_valid(&order(2_i64, "1.0", "Express")));
        assert!(!validator.is_valid(&order(2_i64, "1.5", "Standard")));
        assert!(!validator.is_valid(&order(2_i64, "-0.1", "Standard")));
        assert!(!validator.is_valid(&order(2_i64, "lots", "Standard")));
    }

    #[test]
    fn order_quantity_must_be_a_positive_integer() {
        let validator = OrderValidator::default();
        assert!(!validator.is_valid(&order(0_i64, "0.1", "Standard")));
        assert!(!validator.is_valid(&order(-2_i64, "0.1", "Standard")));
        assert!(!validator.is_valid(&order("2.5", "0.1", "Standard")));
        assert!(validator.is_valid(&order("3", "0.1", "Standard")));
    }

    #[test]
    fn order_shipping_method_must_be_known() {
        assert!(!OrderValidator::default().is_valid(&order(1_i64, "0.1", "Teleport")));
    }

    #[test]
    fn non_string_non_integer_values_are_rejected() {
        use crate::record::FieldValue;

        let mut float_price = product(1, "AA", "Books", "1.00");
        float_price.insert("price", FieldValue::Other(serde_json::json!(10.5)));
        let rejection = ProductValidator::new().validate(&float_price).unwrap_err();
        assert_eq!(
            rejection.reasons,
            vec!["Field `price` must be a decimal string or an integer, got 10.5".to_string()]
        );

        let mut null_category = product(1, "AA", "Books", "1.00");
        null_category.insert("category", FieldValue::Other(serde_json::Value::Null));
        assert!(!ProductValidator::new().is_valid(&null_category));

        let mut bool_age = customer(30, "john.doe@example.com");
        bool_age.insert("age", FieldValue::Other(serde_json::Value::Bool(true)));
        assert!(!CustomerValidator::default().is_valid(&bool_age));

        let huge_quantity = order(
            FieldValue::Other(serde_json::json!(u64::MAX)),
            "0.1",
            "Standard",
        );
        assert!(!OrderValidator::default().is_valid(&huge_quantity));

        let float_discount = order(2_i64, "0.1", "Standard")
            .with("discount", FieldValue::Other(serde_json::json!(0.1)));
        assert!(!OrderValidator::default().is_valid(&float_discount));
    }

    #[test]
    fn custom_required_fields() {
        let validator =
            ProductValidator::new().with_required_fields(&["id", "name", "category", "price", "sku"]);
        let rejection = validator
            .validate(&product(1, "AA", "Books", "1.00"))
            .unwrap_err();
        assert_eq!(rejection.to_string(), "Missing keys: sku");
    }
}
