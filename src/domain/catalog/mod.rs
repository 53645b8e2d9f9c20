//! Catalog
//!
//! Read-only reference data: products and their categories are managed
//! elsewhere and only read here.

mod reader;
pub mod records;

pub use reader::*;
