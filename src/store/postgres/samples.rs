//! Metric samples table

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    domain::{
        catalog::records::ProductUuid,
        metrics::{
            ProductMetricSampleRepository,
            records::{ProductMetricSample, SampleUuid},
        },
        promotions::records::PromotionUuid,
    },
    store::{
        StoreError,
        postgres::{PgStore, get_u64, to_i64},
    },
};

const LIST_SAMPLES_SQL: &str = include_str!("sql/list_samples.sql");
const GET_SAMPLE_SQL: &str = include_str!("sql/get_sample.sql");
const LOCK_PROMOTION_SQL: &str = include_str!("sql/lock_promotion.sql");
const COUNT_SAMPLES_SQL: &str = include_str!("sql/count_samples.sql");
const INSERT_SAMPLE_SQL: &str = include_str!("sql/insert_sample.sql");
const UPDATE_SAMPLE_SQL: &str = include_str!("sql/update_sample.sql");
const DELETE_SAMPLES_SQL: &str = include_str!("sql/delete_samples.sql");

#[async_trait]
impl ProductMetricSampleRepository for PgStore {
    async fn get_all(
        &self,
        promotion: PromotionUuid,
    ) -> Result<Vec<ProductMetricSample>, StoreError> {
        let samples = query_as::<Postgres, ProductMetricSample>(LIST_SAMPLES_SQL)
            .bind(promotion.into_uuid())
            .fetch_all(self.pool())
            .await?;

        Ok(samples)
    }

    async fn get(
        &self,
        promotion: PromotionUuid,
        product: ProductUuid,
    ) -> Result<Option<ProductMetricSample>, StoreError> {
        let sample = query_as::<Postgres, ProductMetricSample>(GET_SAMPLE_SQL)
            .bind(promotion.into_uuid())
            .bind(product.into_uuid())
            .fetch_optional(self.pool())
            .await?;

        Ok(sample)
    }

    async fn insert_all(&self, samples: Vec<ProductMetricSample>) -> Result<(), StoreError> {
        let mut tx = self.pool().begin().await?;

        let mut promotions: Vec<PromotionUuid> =
            samples.iter().map(|sample| sample.promotion_uuid).collect();

        promotions.sort_unstable();
        promotions.dedup();

        for promotion in promotions {
            let locked: Option<Uuid> = query_scalar(LOCK_PROMOTION_SQL)
                .bind(promotion.into_uuid())
                .fetch_optional(&mut *tx)
                .await?;

            if locked.is_none() {
                return Err(StoreError::InvalidReference);
            }

            let existing: i64 = query_scalar(COUNT_SAMPLES_SQL)
                .bind(promotion.into_uuid())
                .fetch_one(&mut *tx)
                .await?;

            if existing > 0 {
                return Err(StoreError::AlreadyExists);
            }
        }

        for sample in &samples {
            query(INSERT_SAMPLE_SQL)
                .bind(sample.uuid.into_uuid())
                .bind(sample.promotion_uuid.into_uuid())
                .bind(sample.product_uuid.into_uuid())
                .bind(sample.base_price)
                .bind(sample.discounted_price)
                .bind(to_i64(sample.initial_inventory, "initial_inventory")?)
                .bind(to_i64(sample.current_inventory, "current_inventory")?)
                .bind(SqlxTimestamp::from(sample.last_updated))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn save(&self, sample: ProductMetricSample) -> Result<(), StoreError> {
        let rows_affected = query(UPDATE_SAMPLE_SQL)
            .bind(sample.promotion_uuid.into_uuid())
            .bind(sample.product_uuid.into_uuid())
            .bind(to_i64(sample.current_inventory, "current_inventory")?)
            .bind(SqlxTimestamp::from(sample.last_updated))
            .execute(self.pool())
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn delete_all(&self, promotion: PromotionUuid) -> Result<(), StoreError> {
        query(DELETE_SAMPLES_SQL)
            .bind(promotion.into_uuid())
            .execute(self.pool())
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for ProductMetricSample {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SampleUuid::from_uuid(row.try_get("uuid")?),
            promotion_uuid: PromotionUuid::from_uuid(row.try_get("promotion_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            base_price: row.try_get("base_price")?,
            discounted_price: row.try_get("discounted_price")?,
            initial_inventory: get_u64(row, "initial_inventory")?,
            current_inventory: get_u64(row, "current_inventory")?,
            last_updated: row.try_get::<SqlxTimestamp, _>("last_updated")?.to_jiff(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::{
        domain::promotions::PromotionRepository,
        test::{
            db::TestDb,
            helpers::{now, promotion_between, today},
        },
    };

    use super::*;

    fn sample_for(promotion: PromotionUuid, product: ProductUuid) -> ProductMetricSample {
        ProductMetricSample::new(promotion, product, dec!(4.00), 25, 10, now())
    }

    #[tokio::test]
    #[ignore = "requires a running docker daemon"]
    async fn insert_all_then_save() -> TestResult {
        let db = TestDb::new().await?;
        let store = PgStore::new(db.pool().clone());
        let today = today();
        let promotion = promotion_between(today, today);
        let uuid = promotion.uuid;
        let product = ProductUuid::new();

        PromotionRepository::save(&store, promotion).await?;
        store.insert_all(vec![sample_for(uuid, product)]).await?;

        let mut sample = ProductMetricSampleRepository::get(&store, uuid, product)
            .await?
            .ok_or("expected sample")?;

        assert_eq!(sample.discounted_price, dec!(3.00));

        sample.current_inventory = 4;

        ProductMetricSampleRepository::save(&store, sample.clone()).await?;

        assert_eq!(store.get_all(uuid).await?, vec![sample]);

        let again = store
            .insert_all(vec![sample_for(uuid, ProductUuid::new())])
            .await;

        assert!(matches!(again, Err(StoreError::AlreadyExists)));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running docker daemon"]
    async fn deleting_promotion_cascades() -> TestResult {
        let db = TestDb::new().await?;
        let store = PgStore::new(db.pool().clone());
        let today = today();
        let promotion = promotion_between(today, today);
        let uuid = promotion.uuid;

        PromotionRepository::save(&store, promotion).await?;
        store
            .insert_all(vec![sample_for(uuid, ProductUuid::new())])
            .await?;

        PromotionRepository::delete(&store, uuid).await?;

        assert!(store.get_all(uuid).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running docker daemon"]
    async fn inventory_cannot_grow_past_initial() -> TestResult {
        let db = TestDb::new().await?;
        let store = PgStore::new(db.pool().clone());
        let today = today();
        let promotion = promotion_between(today, today);
        let uuid = promotion.uuid;
        let product = ProductUuid::new();

        PromotionRepository::save(&store, promotion).await?;
        store.insert_all(vec![sample_for(uuid, product)]).await?;

        let mut sample = sample_for(uuid, product);

        sample.current_inventory = 11;

        let result = ProductMetricSampleRepository::save(&store, sample).await;

        assert!(result.is_err(), "check constraint should reject");

        Ok(())
    }
}
