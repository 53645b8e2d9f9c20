//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    clock::{Clock, SystemClock},
    config::PolicyConfig,
    database,
    domain::{
        catalog::CatalogReader,
        metrics::{MetricsService, ProductMetricSampleRepository, RepositoryMetricsService},
        promotions::{
            PromotionRepository, PromotionsService, RepositoryPromotionsService,
            status::StatusResolver,
        },
    },
    locks::PromotionLocks,
    store::{MemoryStore, PgStore},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("unknown time zone")]
    TimeZone(#[source] jiff::Error),
}

/// Services wired to one store, one clock and one set of write locks.
#[derive(Clone)]
pub struct AppContext {
    pub promotions: Arc<dyn PromotionsService>,
    pub metrics: Arc<dyn MetricsService>,
}

impl AppContext {
    /// Build application context against `PostgreSQL`.
    ///
    /// # Errors
    ///
    /// Returns an error when the database is unreachable or the configured
    /// time zone is unknown.
    pub async fn from_database_url(url: &str, policy: &PolicyConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let store = Arc::new(PgStore::new(pool));

        Self::build(store.clone(), store.clone(), store, Arc::new(SystemClock), policy)
    }

    /// Build application context over a fresh in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured time zone is unknown.
    pub fn in_memory(
        store: MemoryStore,
        clock: Arc<dyn Clock>,
        policy: &PolicyConfig,
    ) -> Result<Self, AppInitError> {
        let store = Arc::new(store);

        Self::build(store.clone(), store.clone(), store, clock, policy)
    }

    fn build(
        promotions: Arc<dyn PromotionRepository>,
        samples: Arc<dyn ProductMetricSampleRepository>,
        catalog: Arc<dyn CatalogReader>,
        clock: Arc<dyn Clock>,
        policy: &PolicyConfig,
    ) -> Result<Self, AppInitError> {
        let resolver = StatusResolver::new(policy.time_zone().map_err(AppInitError::TimeZone)?);
        let locks = PromotionLocks::new();

        let promotions_service = RepositoryPromotionsService::new(promotions.clone(), clock.clone())
            .with_resolver(resolver.clone())
            .with_retention(policy.retention())
            .with_locks(locks.clone());

        let metrics_service = RepositoryMetricsService::new(
            promotions,
            samples,
            catalog,
            Arc::new(policy.simulator()),
            clock,
        )
        .with_resolver(resolver)
        .with_locks(locks);

        Ok(Self {
            promotions: Arc::new(promotions_service),
            metrics: Arc::new(metrics_service),
        })
    }
}
