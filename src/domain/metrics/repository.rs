//! Metric sample repository.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::{
        catalog::records::ProductUuid, metrics::records::ProductMetricSample,
        promotions::records::PromotionUuid,
    },
    store::StoreError,
};

#[automock]
#[async_trait]
pub trait ProductMetricSampleRepository: Send + Sync {
    /// Every sample recorded for a promotion, in no particular order.
    async fn get_all(
        &self,
        promotion: PromotionUuid,
    ) -> Result<Vec<ProductMetricSample>, StoreError>;

    async fn get(
        &self,
        promotion: PromotionUuid,
        product: ProductUuid,
    ) -> Result<Option<ProductMetricSample>, StoreError>;

    /// Store the baseline sample set for a promotion in one step. Fails with
    /// [`StoreError::AlreadyExists`] and writes nothing if the promotion has
    /// any samples already.
    async fn insert_all(&self, samples: Vec<ProductMetricSample>) -> Result<(), StoreError>;

    /// Overwrite an existing sample. Fails with [`StoreError::NotFound`] if
    /// it was never inserted.
    async fn save(&self, sample: ProductMetricSample) -> Result<(), StoreError>;

    async fn delete_all(&self, promotion: PromotionUuid) -> Result<(), StoreError>;
}
