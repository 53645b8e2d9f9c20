//! In-process store.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::{
    domain::{
        catalog::{
            CatalogReader,
            records::{CatalogProductRecord, CategoryUuid, ProductUuid},
        },
        metrics::{ProductMetricSampleRepository, records::ProductMetricSample},
        promotions::{
            PromotionRepository,
            records::{PromotionRecord, PromotionUuid},
        },
    },
    store::StoreError,
};

#[derive(Debug, Default)]
struct State {
    promotions: FxHashMap<PromotionUuid, PromotionRecord>,
    samples: FxHashMap<PromotionUuid, Vec<ProductMetricSample>>,
    products: FxHashMap<ProductUuid, CatalogProductRecord>,
}

/// Promotions, samples and catalog held in memory behind one lock. Every
/// operation takes the lock exactly once, so readers never observe a
/// half-applied write.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add or replace a catalog product.
    pub fn put_product(&self, product: CatalogProductRecord) {
        self.write().products.insert(product.uuid, product);
    }

    /// Add an anonymous catalog product and return its id.
    pub fn insert_product(&self, base_price: Decimal, stock: u64) -> ProductUuid {
        let uuid = ProductUuid::new();

        self.put_product(CatalogProductRecord {
            uuid,
            name: format!("Product {uuid}"),
            sku: uuid.to_string(),
            category_uuid: CategoryUuid::new(),
            base_price,
            stock,
        });

        uuid
    }

    /// Change a product's catalog stock. Does not affect captured samples.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown product.
    pub fn set_stock(&self, product: ProductUuid, stock: u64) -> Result<(), StoreError> {
        self.write()
            .products
            .get_mut(&product)
            .map(|record| record.stock = stock)
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl PromotionRepository for MemoryStore {
    async fn get(&self, uuid: PromotionUuid) -> Result<Option<PromotionRecord>, StoreError> {
        Ok(self.read().promotions.get(&uuid).cloned())
    }

    async fn list(&self) -> Result<Vec<PromotionRecord>, StoreError> {
        let mut promotions: Vec<PromotionRecord> =
            self.read().promotions.values().cloned().collect();

        promotions.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.uuid.cmp(&a.uuid))
        });

        Ok(promotions)
    }

    async fn save(&self, promotion: PromotionRecord) -> Result<(), StoreError> {
        self.write().promotions.insert(promotion.uuid, promotion);

        Ok(())
    }

    async fn delete(&self, uuid: PromotionUuid) -> Result<(), StoreError> {
        let mut state = self.write();

        state.samples.remove(&uuid);
        state.promotions.remove(&uuid);

        Ok(())
    }
}

#[async_trait]
impl ProductMetricSampleRepository for MemoryStore {
    async fn get_all(
        &self,
        promotion: PromotionUuid,
    ) -> Result<Vec<ProductMetricSample>, StoreError> {
        Ok(self
            .read()
            .samples
            .get(&promotion)
            .cloned()
            .unwrap_or_default())
    }

    async fn get(
        &self,
        promotion: PromotionUuid,
        product: ProductUuid,
    ) -> Result<Option<ProductMetricSample>, StoreError> {
        Ok(self.read().samples.get(&promotion).and_then(|samples| {
            samples
                .iter()
                .find(|sample| sample.product_uuid == product)
                .cloned()
        }))
    }

    async fn insert_all(&self, samples: Vec<ProductMetricSample>) -> Result<(), StoreError> {
        let mut state = self.write();

        for sample in &samples {
            if !state.promotions.contains_key(&sample.promotion_uuid) {
                return Err(StoreError::InvalidReference);
            }

            if state
                .samples
                .get(&sample.promotion_uuid)
                .is_some_and(|existing| !existing.is_empty())
            {
                return Err(StoreError::AlreadyExists);
            }
        }

        let mut grouped: FxHashMap<PromotionUuid, Vec<ProductMetricSample>> = FxHashMap::default();

        for sample in samples {
            let group = grouped.entry(sample.promotion_uuid).or_default();

            if group
                .iter()
                .any(|other| other.product_uuid == sample.product_uuid)
            {
                return Err(StoreError::AlreadyExists);
            }

            group.push(sample);
        }

        state.samples.extend(grouped);

        Ok(())
    }

    async fn save(&self, sample: ProductMetricSample) -> Result<(), StoreError> {
        let mut state = self.write();

        let existing = state
            .samples
            .get_mut(&sample.promotion_uuid)
            .and_then(|samples| {
                samples
                    .iter_mut()
                    .find(|existing| existing.product_uuid == sample.product_uuid)
            })
            .ok_or(StoreError::NotFound)?;

        *existing = sample;

        Ok(())
    }

    async fn delete_all(&self, promotion: PromotionUuid) -> Result<(), StoreError> {
        self.write().samples.remove(&promotion);

        Ok(())
    }
}

#[async_trait]
impl CatalogReader for MemoryStore {
    async fn current_stock(&self, product: ProductUuid) -> Result<Option<u64>, StoreError> {
        Ok(self.read().products.get(&product).map(|record| record.stock))
    }

    async fn base_price(&self, product: ProductUuid) -> Result<Option<Decimal>, StoreError> {
        Ok(self
            .read()
            .products
            .get(&product)
            .map(|record| record.base_price))
    }
}
