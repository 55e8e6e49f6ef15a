//! Record converters: raw record in, typed entity out.
//!
//! Converters assume their input passed the matching validator. They still
//! return a [`ConversionError`] rather than panicking, and the repository
//! treats any such error as a fatal defect for the load.

use crate::error::ConversionError;
use crate::model::{
    Customer, CustomerId, Order, OrderId, Product, ProductCategory, ProductId, ShippingMethod,
};
use crate::record::RawRecord;

/// Maps a validated raw record into one entity kind
pub trait RecordConverter: Send + Sync {
    /// The entity produced
    type Entity;

    /// Converts the record
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError`] if the record breaks an invariant the
    /// validator should have enforced.
    fn convert(&self, record: &RawRecord) -> Result<Self::Entity, ConversionError>;
}

fn unsigned(record: &RawRecord, field: &str) -> Result<u32, ConversionError> {
    let value = record.integer(field)?;
    u32::try_from(value).map_err(|_| ConversionError::OutOfRange {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Builds [`Product`]s
#[derive(Clone, Copy, Debug, Default)]
pub struct ProductConverter;

impl RecordConverter for ProductConverter {
    type Entity = Product;

    fn convert(&self, record: &RawRecord) -> Result<Product, ConversionError> {
        let category = record.text("category")?;
        Ok(Product::new(
            ProductId::new(record.integer("id")?),
            record.text("name")?.to_string(),
            category
                .parse::<ProductCategory>()
                .map_err(|_| ConversionError::UnknownCategory(category.to_string()))?,
            record.decimal("price")?,
        ))
    }
}

/// Builds [`Customer`]s
#[derive(Clone, Copy, Debug, Default)]
pub struct CustomerConverter;

impl RecordConverter for CustomerConverter {
    type Entity = Customer;

    fn convert(&self, record: &RawRecord) -> Result<Customer, ConversionError> {
        Ok(Customer::new(
            CustomerId::new(record.integer("id")?),
            record.text("first_name")?.to_string(),
            record.text("last_name")?.to_string(),
            unsigned(record, "age")?,
            record.text("email")?.to_string(),
        ))
    }
}

/// Builds [`Order`]s
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderConverter;

impl RecordConverter for OrderConverter {
    type Entity = Order;

    fn convert(&self, record: &RawRecord) -> Result<Order, ConversionError> {
        let shipping_method = record.text("shipping_method")?;
        Ok(Order::new(
            OrderId::new(record.integer("id")?),
            CustomerId::new(record.integer("customer_id")?),
            ProductId::new(record.integer("product_id")?),
            unsigned(record, "quantity")?,
            record.decimal("discount")?,
            shipping_method
                .parse::<ShippingMethod>()
                .map_err(|_| ConversionError::UnknownShippingMethod(shipping_method.to_string()))?,
        ))
    }
}
