//! Catalog Reader

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;

use crate::{domain::catalog::records::ProductUuid, store::StoreError};

/// Read access to catalog stock and pricing.
#[automock]
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Units currently in stock, or `None` for an unknown product.
    async fn current_stock(&self, product: ProductUuid) -> Result<Option<u64>, StoreError>;

    /// Undiscounted unit price, or `None` for an unknown product.
    async fn base_price(&self, product: ProductUuid) -> Result<Option<Decimal>, StoreError>;
}
