//! Configuration for the record pipeline.
//!
//! Values are provided by the application; every struct has defaults that
//! match the reference data set, builder-style setters, and an
//! environment-based loader.
//!
//! # Environment variables
//!
//! | Variable                 | Default   |
//! |--------------------------|-----------|
//! | `PURCHASE_DATA_DIR`      | `./data`  |
//! | `PURCHASE_OUTPUT_DIR`    | unset     |
//! | `PURCHASE_MIN_AGE`       | `0`       |
//! | `PURCHASE_MAX_AGE`       | `65`      |
//! | `PURCHASE_MIN_DISCOUNT`  | `0.0`     |
//! | `PURCHASE_MAX_DISCOUNT`  | `1.0`     |
//! | `PURCHASE_CHECK_EMAIL`   | `false`   |

use crate::error::ConfigurationError;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Limits applied by the default validators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Youngest accepted customer age (inclusive).
    ///
    /// Default: 0
    pub min_age: i64,

    /// Oldest accepted customer age (inclusive).
    ///
    /// Default: 65
    pub max_age: i64,

    /// Smallest accepted order discount (inclusive).
    ///
    /// Default: 0.0
    pub min_discount: Decimal,

    /// Largest accepted order discount (inclusive).
    ///
    /// Default: 1.0
    pub max_discount: Decimal,

    /// Whether customer emails must look like `local@domain.tld`.
    ///
    /// Default: false
    pub check_email: bool,
}

impl ValidationConfig {
    /// Set the accepted customer age range.
    #[must_use]
    pub const fn with_age_range(mut self, min_age: i64, max_age: i64) -> Self {
        self.min_age = min_age;
        self.max_age = max_age;
        self
    }

    /// Set the accepted discount range.
    #[must_use]
    pub const fn with_discount_range(mut self, min_discount: Decimal, max_discount: Decimal) -> Self {
        self.min_discount = min_discount;
        self.max_discount = max_discount;
        self
    }

    /// Enable or disable the email shape check.
    #[must_use]
    pub const fn with_email_check(mut self, enabled: bool) -> Self {
        self.check_email = enabled;
        self
    }

    /// Checks that ranges are not inverted and stay within what the entity
    /// fields can hold: ages in `u32`, discounts within `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidSetting`] naming the first bad setting.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.min_age < 0 || self.max_age > i64::from(u32::MAX) {
            return Err(invalid(
                "age",
                format!("range [{}, {}] leaves [0, {}]", self.min_age, self.max_age, u32::MAX),
            ));
        }
        if self.min_age > self.max_age {
            return Err(invalid(
                "max_age",
                format!("{} is below min_age {}", self.max_age, self.min_age),
            ));
        }
        if self.min_discount > self.max_discount {
            return Err(invalid(
                "max_discount",
                format!("{} is below min_discount {}", self.max_discount, self.min_discount),
            ));
        }
        if self.min_discount < Decimal::ZERO || self.max_discount > Decimal::ONE {
            return Err(invalid(
                "discount",
                format!(
                    "range [{}, {}] leaves [0, 1]",
                    self.min_discount, self.max_discount
                ),
            ));
        }
        Ok(())
    }

    /// Load from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidSetting`] if a variable does not
    /// parse or the resulting ranges are invalid.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            min_age: parse_var(&lookup, "PURCHASE_MIN_AGE")?.unwrap_or(defaults.min_age),
            max_age: parse_var(&lookup, "PURCHASE_MAX_AGE")?.unwrap_or(defaults.max_age),
            min_discount: parse_var(&lookup, "PURCHASE_MIN_DISCOUNT")?
                .unwrap_or(defaults.min_discount),
            max_discount: parse_var(&lookup, "PURCHASE_MAX_DISCOUNT")?
                .unwrap_or(defaults.max_discount),
            check_email: parse_var(&lookup, "PURCHASE_CHECK_EMAIL")?
                .unwrap_or(defaults.check_email),
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_age: 0,
            max_age: 65,
            min_discount: Decimal::ZERO,
            max_discount: Decimal::ONE,
            check_email: false,
        }
    }
}

/// Locations of the three entity sources and the optional round-trip output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    /// Product source
    pub products: PathBuf,
    /// Customer source
    pub customers: PathBuf,
    /// Order source
    pub orders: PathBuf,
    /// Directory that receives `*_out.json` copies, if any
    pub output_dir: Option<PathBuf>,
}

impl DatasetConfig {
    /// Conventional file names inside one data directory.
    #[must_use]
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            products: dir.join("products.json"),
            customers: dir.join("customers.json"),
            orders: dir.join("orders.json"),
            output_dir: None,
        }
    }

    /// Set the round-trip output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Load from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("PURCHASE_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .unwrap_or_else(|| "./data".to_string());
        let config = Self::from_data_dir(data_dir);
        match lookup("PURCHASE_OUTPUT_DIR").filter(|dir| !dir.trim().is_empty()) {
            Some(dir) => config.with_output_dir(dir),
            None => config,
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self::from_data_dir("./data")
    }
}

fn invalid(name: &str, reason: String) -> ConfigurationError {
    ConfigurationError::InvalidSetting {
        name: name.to_string(),
        reason,
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>, ConfigurationError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| invalid(name, format!("`{raw}`: {e}")))
        })
        .transpose()
}
