//! Metrics Service

use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, debug, info};

use crate::{
    clock::Clock,
    domain::{
        catalog::{CatalogReader, records::ProductUuid},
        metrics::{
            MetricsServiceError, ProductMetricSampleRepository,
            aggregator::{self, PromotionPerformance},
            records::ProductMetricSample,
            simulator::MetricsSimulator,
        },
        promotions::{
            PromotionRepository,
            records::{PromotionRecord, PromotionUuid},
            status::{PromotionStatus, StatusResolver},
        },
    },
    locks::PromotionLocks,
};

pub struct RepositoryMetricsService {
    promotions: Arc<dyn PromotionRepository>,
    samples: Arc<dyn ProductMetricSampleRepository>,
    catalog: Arc<dyn CatalogReader>,
    simulator: Arc<dyn MetricsSimulator>,
    clock: Arc<dyn Clock>,
    resolver: StatusResolver,
    locks: PromotionLocks,
}

impl RepositoryMetricsService {
    #[must_use]
    pub fn new(
        promotions: Arc<dyn PromotionRepository>,
        samples: Arc<dyn ProductMetricSampleRepository>,
        catalog: Arc<dyn CatalogReader>,
        simulator: Arc<dyn MetricsSimulator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            promotions,
            samples,
            catalog,
            simulator,
            clock,
            resolver: StatusResolver::default(),
            locks: PromotionLocks::default(),
        }
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: StatusResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Share write locks with other services touching the same promotions.
    #[must_use]
    pub fn with_locks(mut self, locks: PromotionLocks) -> Self {
        self.locks = locks;
        self
    }

    async fn fetch_promotion(
        &self,
        uuid: PromotionUuid,
    ) -> Result<PromotionRecord, MetricsServiceError> {
        self.promotions
            .get(uuid)
            .await?
            .ok_or(MetricsServiceError::PromotionNotFound)
    }

    async fn snapshot_product(
        &self,
        promotion: &PromotionRecord,
        product: ProductUuid,
    ) -> Result<ProductMetricSample, MetricsServiceError> {
        let stock = self
            .catalog
            .current_stock(product)
            .await?
            .ok_or(MetricsServiceError::UnknownProduct(product))?;

        let base_price = self
            .catalog
            .base_price(product)
            .await?
            .ok_or(MetricsServiceError::UnknownProduct(product))?;

        Ok(ProductMetricSample::new(
            promotion.uuid,
            product,
            base_price,
            promotion.discount_percentage,
            stock,
            self.clock.now(),
        ))
    }

    /// Apply a sale to an already-loaded sample. Caller holds the promotion's lock.
    async fn record_sale_locked(
        &self,
        mut sample: ProductMetricSample,
        units: u64,
    ) -> Result<ProductMetricSample, MetricsServiceError> {
        let available = sample.current_inventory;

        if !sample.record_sale(units, self.clock.now()) {
            return Err(MetricsServiceError::InsufficientInventory {
                requested: units,
                available,
            });
        }

        self.samples.save(sample.clone()).await?;

        Ok(sample)
    }

    async fn performance(
        &self,
        uuid: PromotionUuid,
    ) -> Result<PromotionPerformance, MetricsServiceError> {
        let promotion = self.fetch_promotion(uuid).await?;
        let samples = self.samples.get_all(uuid).await?;

        let is_active =
            self.resolver.resolve(&promotion, self.clock.now()) == PromotionStatus::Active;

        aggregator::aggregate(uuid, &samples, is_active).ok_or(MetricsServiceError::NotInitialized)
    }
}

impl Debug for RepositoryMetricsService {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepositoryMetricsService")
            .field("simulator", &self.simulator)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MetricsService for RepositoryMetricsService {
    #[tracing::instrument(
        name = "metrics.service.initialize",
        skip(self),
        fields(promotion_uuid = %promotion, product_count = tracing::field::Empty),
        err
    )]
    async fn initialize(
        &self,
        promotion: PromotionUuid,
    ) -> Result<Vec<ProductMetricSample>, MetricsServiceError> {
        let _guard = self.locks.acquire(promotion).await;

        let record = self.fetch_promotion(promotion).await?;

        if record.product_uuids.is_empty() {
            return Err(MetricsServiceError::NoProducts);
        }

        if !self.samples.get_all(promotion).await?.is_empty() {
            return Err(MetricsServiceError::AlreadyInitialized);
        }

        let mut samples = Vec::with_capacity(record.product_uuids.len());

        for product in &record.product_uuids {
            samples.push(self.snapshot_product(&record, *product).await?);
        }

        self.samples.insert_all(samples.clone()).await?;

        Span::current().record("product_count", samples.len());

        info!(promotion_uuid = %promotion, products = samples.len(), "initialised metrics");

        Ok(samples)
    }

    #[tracing::instrument(
        name = "metrics.service.apply_sale",
        skip(self),
        fields(promotion_uuid = %promotion, product_uuid = %product),
        err
    )]
    async fn apply_sale(
        &self,
        promotion: PromotionUuid,
        product: ProductUuid,
        units: u64,
    ) -> Result<ProductMetricSample, MetricsServiceError> {
        let _guard = self.locks.acquire(promotion).await;

        let Some(sample) = self.samples.get(promotion, product).await? else {
            return Err(if self.samples.get_all(promotion).await?.is_empty() {
                MetricsServiceError::NotInitialized
            } else {
                MetricsServiceError::UnknownProduct(product)
            });
        };

        let sample = self.record_sale_locked(sample, units).await?;

        info!(
            promotion_uuid = %promotion,
            product_uuid = %product,
            remaining = sample.current_inventory,
            "applied sale"
        );

        Ok(sample)
    }

    #[tracing::instrument(
        name = "metrics.service.aggregate",
        skip(self),
        fields(promotion_uuid = %promotion),
        err
    )]
    async fn aggregate(
        &self,
        promotion: PromotionUuid,
    ) -> Result<PromotionPerformance, MetricsServiceError> {
        let performance = self.performance(promotion).await?;

        debug!(
            promotion_uuid = %promotion,
            units_sold = performance.total_units_sold,
            "aggregated metrics"
        );

        Ok(performance)
    }

    #[tracing::instrument(
        name = "metrics.service.has_metrics",
        skip(self),
        fields(promotion_uuid = %promotion),
        err
    )]
    async fn has_metrics(&self, promotion: PromotionUuid) -> Result<bool, MetricsServiceError> {
        Ok(!self.samples.get_all(promotion).await?.is_empty())
    }

    #[tracing::instrument(
        name = "metrics.service.simulate_sales",
        skip(self),
        fields(promotion_uuid = %promotion, sales = tracing::field::Empty),
        err
    )]
    async fn simulate_sales(
        &self,
        promotion: PromotionUuid,
    ) -> Result<PromotionPerformance, MetricsServiceError> {
        let guard = self.locks.acquire(promotion).await;

        let samples = self.samples.get_all(promotion).await?;

        if samples.is_empty() {
            return Err(MetricsServiceError::NotInitialized);
        }

        let mut sales = 0_usize;

        for sample in samples.into_iter().filter(ProductMetricSample::has_stock) {
            let sale = self.simulator.generate_sale(&sample, self.clock.now());

            if sale.units_sold == 0 {
                continue;
            }

            self.record_sale_locked(sample, sale.units_sold).await?;

            sales += 1;
        }

        drop(guard);

        Span::current().record("sales", sales);

        let performance = self.performance(promotion).await?;

        info!(promotion_uuid = %promotion, sales, "simulated sales");

        Ok(performance)
    }
}

#[automock]
#[async_trait]
pub trait MetricsService: Send + Sync {
    /// Capture a baseline sample for every product on the promotion. Runs
    /// once per promotion.
    async fn initialize(
        &self,
        promotion: PromotionUuid,
    ) -> Result<Vec<ProductMetricSample>, MetricsServiceError>;

    /// Take `units` off one product's remaining stock.
    async fn apply_sale(
        &self,
        promotion: PromotionUuid,
        product: ProductUuid,
        units: u64,
    ) -> Result<ProductMetricSample, MetricsServiceError>;

    /// Current performance snapshot.
    async fn aggregate(
        &self,
        promotion: PromotionUuid,
    ) -> Result<PromotionPerformance, MetricsServiceError>;

    async fn has_metrics(&self, promotion: PromotionUuid) -> Result<bool, MetricsServiceError>;

    /// Apply one simulated sale to each product that still has stock, then
    /// report the refreshed performance.
    ///
    /// Each sale is saved on its own. When a save fails part-way through a
    /// round the error is returned and the sales saved before it stay applied.
    async fn simulate_sales(
        &self,
        promotion: PromotionUuid,
    ) -> Result<PromotionPerformance, MetricsServiceError>;
}
