//! # Purchase Insights JSON
//!
//! Flat-file collaborators for the record pipeline. A source is a UTF-8
//! JSON file holding an array of flat objects whose values are strings or
//! integers:
//!
//! ```json
//! [
//!     {
//!         "category": "Electronics",
//!         "id": 101,
//!         "name": "Laptop",
//!         "price": "1500.00"
//!     }
//! ]
//! ```
//!
//! Decimals are carried as strings so no precision is lost. Any other JSON
//! value (floats, booleans, null, nested values, integers beyond `i64`) is
//! read as [`FieldValue::Other`](purchase_insights_core::FieldValue::Other),
//! which every validator refuses: only the record carrying it is rejected.
//! A file that is not valid JSON, or not an array of objects, is a
//! [`SourceError::Parse`](purchase_insights_core::SourceError::Parse).

mod reader;
mod writer;

pub use reader::JsonFileReader;
pub use writer::JsonFileWriter;

use std::path::{Path, PathBuf};

/// Resolves a source id against an optional base directory
fn resolve(base_dir: Option<&Path>, source_id: &str) -> PathBuf {
    match base_dir {
        Some(dir) => dir.join(source_id),
        None => PathBuf::from(source_id),
    }
}
