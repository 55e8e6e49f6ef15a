//! Purchase report batch.
//!
//! Loads products, customers and orders from JSON files, optionally writes
//! the accepted entities back out, and prints the purchase summary with its
//! spend analytics.
//!
//! # Usage
//!
//! ```bash
//! PURCHASE_DATA_DIR=demos/purchase-report/data \
//! PURCHASE_OUTPUT_DIR=./data_out \
//!   cargo run --bin purchase-report
//! ```
//!
//! Validation limits can be tuned with `PURCHASE_MIN_AGE`,
//! `PURCHASE_MAX_AGE`, `PURCHASE_MIN_DISCOUNT`, `PURCHASE_MAX_DISCOUNT` and
//! `PURCHASE_CHECK_EMAIL`. Log verbosity follows `RUST_LOG`.

mod report;

use anyhow::Context;
use purchase_insights_core::io::{RecordReader, write_entities};
use purchase_insights_core::report::{Reporter, TracingReporter};
use purchase_insights_core::{DatasetConfig, ValidationConfig};
use purchase_insights_json::{JsonFileReader, JsonFileWriter};
use purchase_insights_repository::{AnalyticsService, EntityRepository, PurchaseSummaryBuilder};
use report::Report;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn source_id(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let dataset = DatasetConfig::from_env();
    let validation = ValidationConfig::from_env().context("Invalid validation settings")?;
    tracing::info!(?dataset, ?validation, "Starting purchase report");

    let reader: Arc<dyn RecordReader> = Arc::new(JsonFileReader::new());
    let reporter: Arc<dyn Reporter> = Arc::new(TracingReporter);

    let mut products = EntityRepository::products(
        source_id(&dataset.products),
        Arc::clone(&reader),
        Arc::clone(&reporter),
    )?;
    let mut customers = EntityRepository::customers(
        source_id(&dataset.customers),
        Arc::clone(&reader),
        &validation,
        Arc::clone(&reporter),
    )?;
    let mut orders = EntityRepository::orders(
        source_id(&dataset.orders),
        reader,
        &validation,
        Arc::clone(&reporter),
    )?;

    products.load().context("Failed to load products")?;
    customers.load().context("Failed to load customers")?;
    orders.load().context("Failed to load orders")?;

    for load in [
        products.last_report(),
        customers.last_report(),
        orders.last_report(),
    ]
    .into_iter()
    .flatten()
    {
        println!("{load}");
    }

    if let Some(output_dir) = &dataset.output_dir {
        let writer = JsonFileWriter::new().with_base_dir(output_dir);
        write_entities(&writer, "products_out.json", products.current_data())?;
        write_entities(&writer, "customers_out.json", customers.current_data())?;
        write_entities(&writer, "orders_out.json", orders.current_data())?;
        tracing::info!(output_dir = %output_dir.display(), "Wrote round-trip copies");
    }

    let builder = PurchaseSummaryBuilder::new(&customers, &products, &orders, reporter);
    let mut analytics = AnalyticsService::new(builder);
    println!("\n{}", Report::collect(&mut analytics));

    Ok(())
}
