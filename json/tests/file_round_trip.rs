//! Reader and writer against real files.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use purchase_insights_core::convert::{OrderConverter, RecordConverter};
use purchase_insights_core::error::SourceError;
use purchase_insights_core::io::{RecordReader, RecordWriter, write_entities};
use purchase_insights_core::model::{
    CustomerId, Order, OrderId, Product, ProductCategory, ProductId, ShippingMethod,
};
use purchase_insights_core::report::Issue;
use purchase_insights_core::validate::{OrderValidator, RecordValidator};
use purchase_insights_core::{Decimal, RawRecord};
use purchase_insights_json::{JsonFileReader, JsonFileWriter};
use purchase_insights_repository::EntityRepository;
use purchase_insights_testing::RecordingReporter;
use std::fs;
use std::sync::Arc;

fn sample_orders() -> Vec<Order> {
    vec![
        Order::new(
            OrderId::new(1),
            CustomerId::new(1),
            ProductId::new(101),
            2,
            Decimal::new(1, 1),
            ShippingMethod::Standard,
        ),
        Order::new(
            OrderId::new(2),
            CustomerId::new(1),
            ProductId::new(102),
            5,
            Decimal::ZERO,
            ShippingMethod::Express,
        ),
    ]
}

#[test]
fn written_entities_read_back_as_equal_entities() {
    let dir = tempfile::tempdir().unwrap();
    let writer = JsonFileWriter::new().with_base_dir(dir.path());
    write_entities(&writer, "out/orders_out.json", &sample_orders()).unwrap();

    let reader = JsonFileReader::new().with_base_dir(dir.path());
    let records = reader.read("out/orders_out.json").unwrap();
    let validator = OrderValidator::default();
    let orders: Vec<Order> = records
        .iter()
        .inspect(|record| assert!(validator.is_valid(record)))
        .map(|record| OrderConverter.convert(record).unwrap())
        .collect();
    assert_eq!(orders, sample_orders());
}

#[test]
fn writer_creates_parent_directories_and_replaces_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a/b/products_out.json");
    let writer = JsonFileWriter::new();
    let target = path.to_str().unwrap();

    writer
        .write(target, &[RawRecord::new().with("id", 1_i64)])
        .unwrap();
    writer.write(target, &[]).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "[]\n");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let reader = JsonFileReader::new().with_base_dir(dir.path());
    match reader.read("customers.json") {
        Err(SourceError::Io { source_id, error }) => {
            assert_eq!(source_id, "customers.json");
            assert_eq!(error.kind(), std::io::ErrorKind::NotFound);
        },
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("products.json"), r#"[{"id": 1, "price": "12.50"}"#).unwrap();

    let reader = JsonFileReader::new().with_base_dir(dir.path());
    let error = reader.read("products.json").unwrap_err();
    assert!(matches!(error, SourceError::Parse { .. }));
    assert_eq!(error.source_id(), "products.json");
}

#[test]
fn float_price_rejects_only_its_record() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("products.json"),
        r#"[
            {"id": 101, "name": "Laptop", "category": "Electronics", "price": "1500.00"},
            {"id": 102, "name": "T-Shirt", "category": "Clothing", "price": 10.5},
            {"id": 103, "name": "Novel", "category": "Books", "price": null},
            {"id": 104, "name": "Atlas", "category": "Books", "price": "35.00"}
        ]"#,
    )
    .unwrap();

    let reporter = RecordingReporter::new();
    let mut repository = EntityRepository::products(
        "products.json",
        Arc::new(JsonFileReader::new().with_base_dir(dir.path())),
        Arc::new(reporter.clone()),
    )
    .unwrap();

    let loaded: Vec<ProductId> = repository
        .load()
        .unwrap()
        .iter()
        .map(|product: &Product| product.id)
        .collect();
    assert_eq!(loaded, vec![ProductId::new(101), ProductId::new(104)]);
    assert_eq!(repository.current_data()[1].category, ProductCategory::Books);

    let rejected: Vec<(usize, Vec<String>)> = reporter
        .rejections()
        .into_iter()
        .map(|issue| match issue {
            Issue::RecordRejected { index, reasons, .. } => (index, reasons),
            other => panic!("unexpected issue {other:?}"),
        })
        .collect();
    assert_eq!(
        rejected,
        vec![
            (
                1,
                vec!["Field `price` must be a decimal string or an integer, got 10.5".to_string()]
            ),
            (
                2,
                vec!["Field `price` must be a decimal string or an integer, got null".to_string()]
            ),
        ]
    );
}
