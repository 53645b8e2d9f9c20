//! Promotions Service

use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use tracing::{Span, info};

use crate::{
    clock::Clock,
    domain::{
        promotions::{
            LifecycleError, PromotionRepository, PromotionsServiceError,
            data::{NewPromotion, PromotionUpdate},
            lifecycle::{self, RetentionPolicy},
            records::{Lifecycle, PromotionRecord, PromotionUuid},
            status::{PromotionStatus, StatusFilter, StatusResolver},
            validation,
        },
        users::UserUuid,
    },
    locks::PromotionLocks,
};

/// A promotion together with what it means right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPromotion {
    pub promotion: PromotionRecord,
    pub status: PromotionStatus,
    pub days_until_purge: Option<u32>,
}

pub struct RepositoryPromotionsService {
    promotions: Arc<dyn PromotionRepository>,
    clock: Arc<dyn Clock>,
    resolver: StatusResolver,
    retention: RetentionPolicy,
    locks: PromotionLocks,
}

impl RepositoryPromotionsService {
    #[must_use]
    pub fn new(promotions: Arc<dyn PromotionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            promotions,
            clock,
            resolver: StatusResolver::default(),
            retention: RetentionPolicy::default(),
            locks: PromotionLocks::default(),
        }
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: StatusResolver) -> Self {
        self.resolver = resolver;
        self
    }

    #[must_use]
    pub const fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    /// Share write locks with other services touching the same promotions.
    #[must_use]
    pub fn with_locks(mut self, locks: PromotionLocks) -> Self {
        self.locks = locks;
        self
    }

    fn resolve(&self, promotion: PromotionRecord) -> ResolvedPromotion {
        let now = self.clock.now();

        ResolvedPromotion {
            status: self.resolver.resolve(&promotion, now),
            days_until_purge: lifecycle::days_until_purge(&promotion, now, self.retention),
            promotion,
        }
    }

    async fn fetch(&self, uuid: PromotionUuid) -> Result<PromotionRecord, PromotionsServiceError> {
        self.promotions
            .get(uuid)
            .await?
            .ok_or(PromotionsServiceError::NotFound)
    }

    /// Remove a promotion; the repository drops its samples in the same
    /// write. Caller holds the promotion's lock.
    async fn purge_locked(&self, promotion: &PromotionRecord) -> Result<(), PromotionsServiceError> {
        lifecycle::ensure_purgeable(promotion)?;

        self.promotions.delete(promotion.uuid).await?;

        Ok(())
    }
}

impl Debug for RepositoryPromotionsService {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepositoryPromotionsService")
            .field("resolver", &self.resolver)
            .field("retention", &self.retention)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PromotionsService for RepositoryPromotionsService {
    #[tracing::instrument(
        name = "promotions.service.create_promotion",
        skip(self, promotion),
        fields(promotion_uuid = %promotion.uuid, actor_uuid = %actor),
        err
    )]
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
        actor: UserUuid,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let now = self.clock.now();

        validation::validate_new(&promotion, self.resolver.today(now))?;

        let _guard = self.locks.acquire(promotion.uuid).await;

        if self.promotions.get(promotion.uuid).await?.is_some() {
            return Err(PromotionsServiceError::AlreadyExists);
        }

        let record = PromotionRecord {
            uuid: promotion.uuid,
            name: promotion.name,
            description: promotion.description,
            start_date: promotion.start_date,
            end_date: promotion.end_date,
            discount_percentage: promotion.discount_percentage,
            category_uuid: promotion.category_uuid,
            product_uuids: promotion.product_uuids,
            lifecycle: Lifecycle::Live,
            created_by: actor,
            created_at: now,
            updated_at: now,
        };

        self.promotions.save(record.clone()).await?;

        info!(promotion_uuid = %record.uuid, "created promotion");

        Ok(record)
    }

    #[tracing::instrument(
        name = "promotions.service.update_promotion",
        skip(self, update),
        fields(promotion_uuid = %uuid, product_count = update.product_uuids.len()),
        err
    )]
    async fn update_promotion(
        &self,
        uuid: PromotionUuid,
        update: PromotionUpdate,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        validation::validate_update(&update)?;

        let _guard = self.locks.acquire(uuid).await;

        let mut promotion = self.fetch(uuid).await?;

        if promotion.is_deleted() {
            return Err(LifecycleError::AlreadyDeleted.into());
        }

        promotion.name = update.name;
        promotion.description = update.description;
        promotion.start_date = update.start_date;
        promotion.end_date = update.end_date;
        promotion.discount_percentage = update.discount_percentage;
        promotion.category_uuid = update.category_uuid;
        promotion.product_uuids = update.product_uuids;
        promotion.updated_at = self.clock.now();

        self.promotions.save(promotion.clone()).await?;

        info!(promotion_uuid = %uuid, "updated promotion");

        Ok(promotion)
    }

    #[tracing::instrument(
        name = "promotions.service.get_promotion",
        skip(self),
        fields(promotion_uuid = %uuid),
        err
    )]
    async fn get_promotion(
        &self,
        uuid: PromotionUuid,
    ) -> Result<ResolvedPromotion, PromotionsServiceError> {
        let promotion = self.fetch(uuid).await?;

        Ok(self.resolve(promotion))
    }

    #[tracing::instrument(
        name = "promotions.service.list_promotions",
        skip(self),
        fields(result_count = tracing::field::Empty),
        err
    )]
    async fn list_promotions(
        &self,
        filter: StatusFilter,
    ) -> Result<Vec<ResolvedPromotion>, PromotionsServiceError> {
        let promotions: Vec<ResolvedPromotion> = self
            .promotions
            .list()
            .await?
            .into_iter()
            .map(|promotion| self.resolve(promotion))
            .filter(|resolved| filter.matches(resolved.status))
            .collect();

        Span::current().record("result_count", promotions.len());

        Ok(promotions)
    }

    #[tracing::instrument(
        name = "promotions.service.soft_delete",
        skip(self),
        fields(promotion_uuid = %uuid, actor_uuid = %actor),
        err
    )]
    async fn soft_delete(
        &self,
        uuid: PromotionUuid,
        actor: UserUuid,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let _guard = self.locks.acquire(uuid).await;

        let mut promotion = self.fetch(uuid).await?;

        lifecycle::soft_delete(&mut promotion, actor, self.clock.now())?;

        self.promotions.save(promotion.clone()).await?;

        info!(promotion_uuid = %uuid, "moved promotion to trash");

        Ok(promotion)
    }

    #[tracing::instrument(
        name = "promotions.service.restore",
        skip(self),
        fields(promotion_uuid = %uuid, actor_uuid = %actor, status = tracing::field::Empty),
        err
    )]
    async fn restore(
        &self,
        uuid: PromotionUuid,
        actor: UserUuid,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let _guard = self.locks.acquire(uuid).await;

        let mut promotion = self.fetch(uuid).await?;
        let now = self.clock.now();

        lifecycle::restore(&mut promotion, now)?;

        self.promotions.save(promotion.clone()).await?;

        let status = self.resolver.resolve(&promotion, now);

        Span::current().record("status", tracing::field::display(status));

        info!(promotion_uuid = %uuid, %status, "restored promotion");

        Ok(promotion)
    }

    #[tracing::instrument(
        name = "promotions.service.purge",
        skip(self),
        fields(promotion_uuid = %uuid, actor_uuid = %actor),
        err
    )]
    async fn purge(&self, uuid: PromotionUuid, actor: UserUuid) -> Result<(), PromotionsServiceError> {
        let guard = self.locks.acquire(uuid).await;

        let promotion = self.fetch(uuid).await?;

        self.purge_locked(&promotion).await?;

        self.locks.forget(uuid, guard);

        info!(promotion_uuid = %uuid, "purged promotion");

        Ok(())
    }

    #[tracing::instrument(
        name = "promotions.service.days_until_purge",
        skip(self),
        fields(promotion_uuid = %uuid),
        err
    )]
    async fn days_until_purge(
        &self,
        uuid: PromotionUuid,
    ) -> Result<Option<u32>, PromotionsServiceError> {
        let promotion = self.fetch(uuid).await?;

        Ok(lifecycle::days_until_purge(
            &promotion,
            self.clock.now(),
            self.retention,
        ))
    }

    #[tracing::instrument(
        name = "promotions.service.sweep_trash",
        skip(self),
        fields(actor_uuid = %actor, retention_days = self.retention.days(), purged = tracing::field::Empty),
        err
    )]
    async fn sweep_trash(&self, actor: UserUuid) -> Result<Vec<PromotionUuid>, PromotionsServiceError> {
        let now = self.clock.now();

        let due: Vec<PromotionUuid> = self
            .promotions
            .list()
            .await?
            .into_iter()
            .filter(|promotion| lifecycle::is_purge_due(promotion, now, self.retention))
            .map(|promotion| promotion.uuid)
            .collect();

        let mut purged = Vec::with_capacity(due.len());

        for uuid in due {
            let guard = self.locks.acquire(uuid).await;

            // Re-read under the lock: it may have been restored or purged meanwhile.
            let Some(promotion) = self.promotions.get(uuid).await? else {
                continue;
            };

            if !lifecycle::is_purge_due(&promotion, self.clock.now(), self.retention) {
                continue;
            }

            self.purge_locked(&promotion).await?;

            self.locks.forget(uuid, guard);

            purged.push(uuid);
        }

        Span::current().record("purged", purged.len());

        info!(purged = purged.len(), "swept trash");

        Ok(purged)
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// Validate and store a new, live promotion.
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
        actor: UserUuid,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Replace the editable fields of a live promotion.
    async fn update_promotion(
        &self,
        uuid: PromotionUuid,
        update: PromotionUpdate,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Retrieve a single promotion with its current status.
    async fn get_promotion(
        &self,
        uuid: PromotionUuid,
    ) -> Result<ResolvedPromotion, PromotionsServiceError>;

    /// Retrieve the promotions whose current status matches `filter`, newest first.
    async fn list_promotions(
        &self,
        filter: StatusFilter,
    ) -> Result<Vec<ResolvedPromotion>, PromotionsServiceError>;

    /// Move a live promotion to the trash.
    async fn soft_delete(
        &self,
        uuid: PromotionUuid,
        actor: UserUuid,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Bring a promotion back from the trash.
    async fn restore(
        &self,
        uuid: PromotionUuid,
        actor: UserUuid,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Permanently remove a trashed promotion and its metrics.
    async fn purge(&self, uuid: PromotionUuid, actor: UserUuid) -> Result<(), PromotionsServiceError>;

    /// Days until a trashed promotion becomes eligible for purge; `None` when live.
    async fn days_until_purge(
        &self,
        uuid: PromotionUuid,
    ) -> Result<Option<u32>, PromotionsServiceError>;

    /// Purge every trashed promotion whose retention window has run out.
    async fn sweep_trash(&self, actor: UserUuid) -> Result<Vec<PromotionUuid>, PromotionsServiceError>;
}
