//! Promotions table

use async_trait::async_trait;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    domain::{
        catalog::records::{CategoryUuid, ProductUuid},
        promotions::{
            PromotionRepository,
            records::{Lifecycle, PromotionRecord, PromotionUuid},
        },
        users::UserUuid,
    },
    store::{
        StoreError,
        postgres::{PgStore, column_decode},
    },
};

const GET_PROMOTION_SQL: &str = include_str!("sql/get_promotion.sql");
const LIST_PROMOTIONS_SQL: &str = include_str!("sql/list_promotions.sql");
const SAVE_PROMOTION_SQL: &str = include_str!("sql/save_promotion.sql");
const DELETE_PROMOTION_SQL: &str = include_str!("sql/delete_promotion.sql");

#[async_trait]
impl PromotionRepository for PgStore {
    async fn get(&self, uuid: PromotionUuid) -> Result<Option<PromotionRecord>, StoreError> {
        let promotion = query_as::<Postgres, PromotionRecord>(GET_PROMOTION_SQL)
            .bind(uuid.into_uuid())
            .fetch_optional(self.pool())
            .await?;

        Ok(promotion)
    }

    async fn list(&self) -> Result<Vec<PromotionRecord>, StoreError> {
        let promotions = query_as::<Postgres, PromotionRecord>(LIST_PROMOTIONS_SQL)
            .fetch_all(self.pool())
            .await?;

        Ok(promotions)
    }

    async fn save(&self, promotion: PromotionRecord) -> Result<(), StoreError> {
        let product_uuids: Vec<Uuid> = promotion
            .product_uuids
            .iter()
            .copied()
            .map(ProductUuid::into_uuid)
            .collect();

        query(SAVE_PROMOTION_SQL)
            .bind(promotion.uuid.into_uuid())
            .bind(&promotion.name)
            .bind(&promotion.description)
            .bind(SqlxDate::from(promotion.start_date))
            .bind(SqlxDate::from(promotion.end_date))
            .bind(i16::from(promotion.discount_percentage))
            .bind(promotion.category_uuid.into_uuid())
            .bind(product_uuids)
            .bind(promotion.deleted_at().map(SqlxTimestamp::from))
            .bind(promotion.deleted_by().map(UserUuid::into_uuid))
            .bind(promotion.created_by.into_uuid())
            .bind(SqlxTimestamp::from(promotion.created_at))
            .bind(SqlxTimestamp::from(promotion.updated_at))
            .execute(self.pool())
            .await?;

        Ok(())
    }

    async fn delete(&self, uuid: PromotionUuid) -> Result<(), StoreError> {
        query(DELETE_PROMOTION_SQL)
            .bind(uuid.into_uuid())
            .execute(self.pool())
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for PromotionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let discount: i16 = row.try_get("discount_percentage")?;

        let deleted_at = row
            .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
            .map(SqlxTimestamp::to_jiff);

        let deleted_by = row
            .try_get::<Option<Uuid>, _>("deleted_by")?
            .map(UserUuid::from_uuid);

        let lifecycle = match (deleted_at, deleted_by) {
            (None, None) => Lifecycle::Live,
            (Some(deleted_at), Some(deleted_by)) => Lifecycle::Deleted {
                deleted_at,
                deleted_by,
            },
            _ => {
                return Err(sqlx::Error::Decode(
                    "deleted_at and deleted_by must be set together".into(),
                ));
            }
        };

        Ok(Self {
            uuid: PromotionUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            start_date: row.try_get::<SqlxDate, _>("start_date")?.to_jiff(),
            end_date: row.try_get::<SqlxDate, _>("end_date")?.to_jiff(),
            discount_percentage: u8::try_from(discount)
                .map_err(column_decode("discount_percentage"))?,
            category_uuid: CategoryUuid::from_uuid(row.try_get("category_uuid")?),
            product_uuids: row
                .try_get::<Vec<Uuid>, _>("product_uuids")?
                .into_iter()
                .map(ProductUuid::from_uuid)
                .collect(),
            lifecycle,
            created_by: UserUuid::from_uuid(row.try_get("created_by")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
