//! Promotions Repository

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::promotions::records::{PromotionRecord, PromotionUuid},
    store::StoreError,
};

/// Persistence for promotion records. Each call is applied atomically.
#[automock]
#[async_trait]
pub trait PromotionRepository: Send + Sync {
    /// Fetch a promotion, live or deleted.
    async fn get(&self, uuid: PromotionUuid) -> Result<Option<PromotionRecord>, StoreError>;

    /// Every stored promotion, newest first.
    async fn list(&self) -> Result<Vec<PromotionRecord>, StoreError>;

    /// Insert or fully replace a promotion.
    async fn save(&self, promotion: PromotionRecord) -> Result<(), StoreError>;

    /// Permanently remove a promotion along with every metric sample it owns.
    /// Removing an unknown promotion is not an error.
    async fn delete(&self, uuid: PromotionUuid) -> Result<(), StoreError>;
}
