//! Domain entities: products, customers and orders.
//!
//! Products and customers are immutable values that key the purchase
//! summary, so they derive `Eq + Hash`. Orders are plain mutable records.

use crate::record::RawRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw integer id
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw integer id
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a product
    ProductId
);
entity_id!(
    /// Unique identifier for a customer
    CustomerId
);
entity_id!(
    /// Unique identifier for an order
    OrderId
);

/// Error returned when an enum wire name is not recognised
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant `{0}`")]
pub struct UnknownVariant(pub String);

/// Product category
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    /// Electronics
    Electronics,
    /// Clothing
    Clothing,
    /// Books
    Books,
}

impl ProductCategory {
    /// Every category, in declaration order
    pub const ALL: [Self; 3] = [Self::Electronics, Self::Clothing, Self::Books];

    /// Wire name used in raw records
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Clothing => "Clothing",
            Self::Books => "Books",
        }
    }
}

impl FromStr for ProductCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an order is shipped
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShippingMethod {
    /// Standard delivery
    Standard,
    /// Express delivery
    Express,
}

impl ShippingMethod {
    /// Every shipping method, in declaration order
    pub const ALL: [Self; 2] = [Self::Standard, Self::Express];

    /// Wire name used in raw records
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Express => "Express",
        }
    }
}

impl FromStr for ShippingMethod {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Projection of an entity back into its raw form, for writing sources
pub trait ToRawRecord {
    /// Builds the raw record this entity would have been converted from
    fn to_raw_record(&self) -> RawRecord;
}

/// A product that can be ordered
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Category
    pub category: ProductCategory,
    /// Unit price
    pub price: Decimal,
}

impl Product {
    /// Creates a new product
    #[must_use]
    pub const fn new(id: ProductId, name: String, category: ProductCategory, price: Decimal) -> Self {
        Self {
            id,
            name,
            category,
            price,
        }
    }

    /// Price of `quantity` units, or `None` when it exceeds [`Decimal::MAX`]
    #[must_use]
    pub fn total_price(&self, quantity: u64) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(quantity))
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} ({}, {})", self.id, self.name, self.category, self.price)
    }
}

impl ToRawRecord for Product {
    fn to_raw_record(&self) -> RawRecord {
        RawRecord::new()
            .with("id", self.id.value())
            .with("name", self.name.as_str())
            .with("category", self.category.as_str())
            .with("price", self.price)
    }
}

/// A customer placing orders
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Customer {
    /// Customer identifier
    pub id: CustomerId,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Age in years
    pub age: u32,
    /// Contact email
    pub email: String,
}

impl Customer {
    /// Creates a new customer
    #[must_use]
    pub const fn new(
        id: CustomerId,
        first_name: String,
        last_name: String,
        age: u32,
        email: String,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            age,
            email,
        }
    }

    /// First and last name joined by a space
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} <{}>", self.id, self.full_name(), self.email)
    }
}

impl ToRawRecord for Customer {
    fn to_raw_record(&self) -> RawRecord {
        RawRecord::new()
            .with("id", self.id.value())
            .with("first_name", self.first_name.as_str())
            .with("last_name", self.last_name.as_str())
            .with("age", self.age)
            .with("email", self.email.as_str())
    }
}

/// A single order line: one product bought by one customer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier
    pub id: OrderId,
    /// Customer who placed the order
    pub customer_id: CustomerId,
    /// Product ordered
    pub product_id: ProductId,
    /// Units ordered, always positive once validated
    pub quantity: u32,
    /// Discount fraction in `[0, 1]`
    pub discount: Decimal,
    /// Shipping method
    pub shipping_method: ShippingMethod,
}

impl Order {
    /// Creates a new order
    #[must_use]
    pub const fn new(
        id: OrderId,
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: u32,
        discount: Decimal,
        shipping_method: ShippingMethod,
    ) -> Self {
        Self {
            id,
            customer_id,
            product_id,
            quantity,
            discount,
            shipping_method,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} customer {} x{} of product {} ({}, discount {})",
            self.id,
            self.customer_id,
            self.quantity,
            self.product_id,
            self.shipping_method,
            self.discount
        )
    }
}

impl ToRawRecord for Order {
    fn to_raw_record(&self) -> RawRecord {
        RawRecord::new()
            .with("id", self.id.value())
            .with("customer_id", self.customer_id.value())
            .with("product_id", self.product_id.value())
            .with("quantity", self.quantity)
            .with("discount", self.discount)
            .with("shipping_method", self.shipping_method.as_str())
    }
}
