//! Test context for service-level tests against the in-memory store.

use std::sync::Arc;

use jiff::civil::Date;
use rust_decimal::Decimal;

use crate::{
    clock::{Clock, FixedClock},
    domain::{
        catalog::{
            CatalogReader,
            records::{CatalogProductRecord, ProductUuid},
        },
        metrics::{
            RepositoryMetricsService,
            simulator::{MetricsSimulator, ScriptedSimulator},
        },
        promotions::{
            PromotionRepository, RepositoryPromotionsService,
            records::{PromotionRecord, PromotionUuid},
            status::StatusResolver,
        },
        users::UserUuid,
    },
    locks::PromotionLocks,
    store::{MemoryStore, StoreError},
    test::helpers::now,
};

/// Stock given to products a test promotion names without seeding them.
const DEFAULT_STOCK: u64 = 100;

pub(crate) struct TestContext {
    pub store: MemoryStore,
    pub clock: Arc<FixedClock>,
    pub simulator: Arc<dyn MetricsSimulator>,
    pub promotions: RepositoryPromotionsService,
    pub metrics: RepositoryMetricsService,
    pub actor: UserUuid,
}

impl TestContext {
    /// Services over an empty store, a clock frozen at [`now`] and a
    /// simulator that never sells anything.
    pub(crate) fn new() -> Self {
        Self::with_simulator(Arc::new(ScriptedSimulator::default()))
    }

    /// As [`TestContext::new`], with a simulator replaying `script`.
    pub(crate) fn with_script(script: impl IntoIterator<Item = u64>) -> Self {
        Self::with_simulator(Arc::new(ScriptedSimulator::new(script)))
    }

    fn with_simulator(simulator: Arc<dyn MetricsSimulator>) -> Self {
        let store = MemoryStore::new();
        let clock = Arc::new(FixedClock::new(now()));
        let locks = PromotionLocks::new();
        let shared = Arc::new(store.clone());

        let promotions = RepositoryPromotionsService::new(shared.clone(), clock.clone())
            .with_locks(locks.clone());

        let metrics = RepositoryMetricsService::new(
            shared.clone(),
            shared.clone(),
            shared,
            simulator.clone(),
            clock.clone(),
        )
        .with_locks(locks);

        Self {
            store,
            clock,
            simulator,
            promotions,
            metrics,
            actor: UserUuid::new(),
        }
    }

    pub(crate) fn today(&self) -> Date {
        StatusResolver::utc().today(self.clock.now())
    }

    /// Add a catalog product.
    pub(crate) fn insert_product(&self, base_price: Decimal, stock: u64) -> ProductUuid {
        self.store.insert_product(base_price, stock)
    }

    /// Store a promotion as-is, bypassing validation so past dates are
    /// allowed. Products missing from the catalog are added.
    pub(crate) async fn insert_promotion(
        &self,
        promotion: PromotionRecord,
    ) -> Result<PromotionUuid, StoreError> {
        for product in &promotion.product_uuids {
            if self.store.current_stock(*product).await?.is_none() {
                self.store.put_product(CatalogProductRecord {
                    uuid: *product,
                    name: format!("Product {product}"),
                    sku: product.to_string(),
                    category_uuid: promotion.category_uuid,
                    base_price: Decimal::TEN,
                    stock: DEFAULT_STOCK,
                });
            }
        }

        let uuid = promotion.uuid;

        self.store.save(promotion).await?;

        Ok(uuid)
    }
}
