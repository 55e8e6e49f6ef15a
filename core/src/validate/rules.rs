//! Reusable field rules.
//!
//! Each rule inspects one aspect of a raw record and returns
//! `Err(reason)` with a human readable message when the record breaks it.

use crate::record::{FieldValue, RawRecord};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::OnceLock;

/// Outcome of a single rule
pub type RuleResult = Result<(), String>;

/// All `fields` are present; lists every missing one at once
///
/// # Errors
///
/// Returns `Missing keys: a, b` when any field is absent.
pub fn has_required_keys(record: &RawRecord, fields: &[String]) -> RuleResult {
    let missing: Vec<&str> = fields
        .iter()
        .map(String::as_str)
        .filter(|field| !record.contains(field))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("Missing keys: {}", missing.join(", ")))
    }
}

/// Whether a value is strictly greater than zero
///
/// Integers are compared directly, text is parsed as a decimal. Any other
/// value is never positive.
#[must_use]
pub fn is_positive(value: &FieldValue) -> bool {
    match value {
        FieldValue::Integer(value) => *value > 0,
        FieldValue::Text(text) => {
            Decimal::from_str(text.trim()).is_ok_and(|decimal| decimal > Decimal::ZERO)
        },
        FieldValue::Other(_) => false,
    }
}

/// Whether `value` parses into `T`, typically one of the wire-named enums
#[must_use]
pub fn is_valid_value_of<T: FromStr>(value: &str) -> bool {
    value.parse::<T>().is_ok()
}

/// Inclusive integer range check
#[must_use]
pub fn int_in_range(value: i64, min_value: i64, max_value: i64) -> bool {
    (min_value..=max_value).contains(&value)
}

/// Inclusive decimal range check; unparsable text is out of range
#[must_use]
pub fn decimal_in_range(value: &str, min_value: Decimal, max_value: Decimal) -> bool {
    Decimal::from_str(value.trim())
        .is_ok_and(|decimal| (min_value..=max_value).contains(&decimal))
}

/// Whether the whole of `value` matches `pattern`
///
/// An invalid pattern never matches.
#[must_use]
pub fn matches_regex(value: &str, pattern: &str) -> bool {
    Regex::new(&format!("^(?:{pattern})$")).is_ok_and(|regex| regex.is_match(value))
}

/// Whether `email` has the `local@domain.tld` shape
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| {
            Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").ok()
        })
        .as_ref()
        .is_some_and(|regex| regex.is_match(email))
}

/// `field` holds an integer, or text parsing as one
///
/// # Errors
///
/// Returns the field error message otherwise.
pub fn integral(record: &RawRecord, field: &str) -> RuleResult {
    record.integer(field).map(|_| ()).map_err(|e| e.to_string())
}

/// `field` is strictly positive
///
/// # Errors
///
/// Returns a message naming the field otherwise.
pub fn positive(record: &RawRecord, field: &str) -> RuleResult {
    match record.get(field) {
        Some(value) if is_positive(value) => Ok(()),
        Some(value @ FieldValue::Other(_)) => Err(format!(
            "Field `{field}` must be a decimal string or an integer, got {value}"
        )),
        Some(value) => Err(format!("Field `{field}` must be positive, got {value}")),
        None => Err(format!("Missing field `{field}`")),
    }
}

/// `field` is text naming a variant of `T`
///
/// # Errors
///
/// Returns a message naming the field otherwise.
pub fn one_of<T: FromStr>(record: &RawRecord, field: &str) -> RuleResult {
    let value = record.text(field).map_err(|e| e.to_string())?;
    if is_valid_value_of::<T>(value) {
        Ok(())
    } else {
        Err(format!("Field `{field}` has unknown value `{value}`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProductCategory, ShippingMethod};

    #[test]
    fn positivity_of_integers_and_text() {
        let cases = [
            (FieldValue::Integer(1), true),
            (FieldValue::Integer(0), false),
            (FieldValue::Integer(-1), false),
            (FieldValue::from("1"), true),
            (FieldValue::from("0"), false),
            (FieldValue::from("-1"), false),
            (FieldValue::from("1.0"), true),
            (FieldValue::from("0.0"), false),
            (FieldValue::from("-1.0"), false),
            (FieldValue::from("abc"), false),
            (FieldValue::from("123abc"), false),
            (FieldValue::Other(serde_json::json!(10.5)), false),
            (FieldValue::Other(serde_json::Value::Null), false),
            (FieldValue::Other(serde_json::Value::Bool(true)), false),
        ];
        for (value, expected) in cases {
            assert_eq!(is_positive(&value), expected, "{value}");
        }
    }

    #[test]
    fn enum_membership_is_case_sensitive() {
        assert!(!is_valid_value_of::<ProductCategory>("Standard"));
        assert!(is_valid_value_of::<ProductCategory>("Electronics"));
        assert!(is_valid_value_of::<ShippingMethod>("Standard"));
        assert!(is_valid_value_of::<ShippingMethod>("Express"));
        assert!(!is_valid_value_of::<ShippingMethod>("EXPREs"));
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("jacek.hercog@gmail.com"));
        assert!(is_valid_email("jacek.hercog@gwp.pl"));
        assert!(!is_valid_email("jacek.hercog@gcc"));
        assert!(!is_valid_email("jacek.hercog@gmail"));
        assert!(!is_valid_email("not an email"));
    }

    #[test]
    fn integer_ranges_are_inclusive() {
        assert!(int_in_range(1, 1, 10));
        assert!(!int_in_range(0, 1, 10));
        assert!(!int_in_range(11, 1, 10));
        assert!(int_in_range(-1, -1, 10));
    }

    #[test]
    fn decimal_ranges() {
        let one = Decimal::ONE;
        let ten = Decimal::TEN;
        assert!(decimal_in_range("5.5", one, ten));
        assert!(!decimal_in_range("abc", one, ten));
        assert!(decimal_in_range("-5.5", -ten, -one));
        assert!(!decimal_in_range("-11.5", -ten, -one));
        assert!(!decimal_in_range("11.5", one, ten));
    }

    #[test]
    fn regex_must_match_whole_value() {
        assert!(matches_regex("abc123", r"^[a-zA-Z0-9]+$"));
        assert!(!matches_regex("abc 123", r"^[a-zA-Z0-9]+$"));
        assert!(!matches_regex("abc_123", r"^[a-zA-Z0-9]+$"));
        assert!(!matches_regex("abc@123", r"^[a-zA-Z0-9]+$"));
        assert!(matches_regex("ABC", r"[A-Z]+"));
        assert!(!matches_regex("ABc", r"[A-Z]+"));
    }

    #[test]
    fn missing_keys_are_listed_together() {
        let record = RawRecord::new().with("id", 1_i64);
        let fields = vec!["id".to_string(), "name".to_string(), "price".to_string()];
        assert_eq!(
            has_required_keys(&record, &fields),
            Err("Missing keys: name, price".to_string())
        );
    }
}
