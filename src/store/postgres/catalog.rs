//! Catalog products table

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{query, query_scalar};

use crate::{
    domain::catalog::{
        CatalogReader,
        records::{CatalogProductRecord, ProductUuid},
    },
    store::{
        StoreError,
        postgres::{PgStore, column_decode, to_i64},
    },
};

const GET_PRODUCT_STOCK_SQL: &str = include_str!("sql/get_product_stock.sql");
const GET_PRODUCT_PRICE_SQL: &str = include_str!("sql/get_product_price.sql");
const UPSERT_PRODUCT_SQL: &str = include_str!("sql/upsert_product.sql");

impl PgStore {
    /// Add or replace a catalog product.
    ///
    /// # Errors
    ///
    /// Returns an error when the write fails.
    pub async fn put_product(&self, product: &CatalogProductRecord) -> Result<(), StoreError> {
        query(UPSERT_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(&product.sku)
            .bind(product.category_uuid.into_uuid())
            .bind(product.base_price)
            .bind(to_i64(product.stock, "stock")?)
            .execute(self.pool())
            .await?;

        Ok(())
    }
}

#[async_trait]
impl CatalogReader for PgStore {
    async fn current_stock(&self, product: ProductUuid) -> Result<Option<u64>, StoreError> {
        let stock: Option<i64> = query_scalar(GET_PRODUCT_STOCK_SQL)
            .bind(product.into_uuid())
            .fetch_optional(self.pool())
            .await?;

        stock
            .map(|stock| u64::try_from(stock).map_err(column_decode("stock")))
            .transpose()
            .map_err(StoreError::from)
    }

    async fn base_price(&self, product: ProductUuid) -> Result<Option<Decimal>, StoreError> {
        let price = query_scalar(GET_PRODUCT_PRICE_SQL)
            .bind(product.into_uuid())
            .fetch_optional(self.pool())
            .await?;

        Ok(price)
    }
}
