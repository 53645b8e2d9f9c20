//! Catalog Records

use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<CatalogProductRecord>;

/// Category Record marker
#[derive(Debug, Clone, Copy)]
pub struct CategoryRecord;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Catalog Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub sku: String,
    pub category_uuid: CategoryUuid,
    pub base_price: Decimal,
    pub stock: u64,
}
