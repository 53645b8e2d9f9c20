//! `PostgreSQL` store.

use std::error::Error as StdError;

use sqlx::{PgPool, Row, postgres::PgRow};

mod catalog;
mod promotions;
mod samples;

/// Promotions, samples and catalog in `PostgreSQL`. Each mutating call runs
/// in its own transaction.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn column_decode<E>(column: &str) -> impl FnOnce(E) -> sqlx::Error
where
    E: StdError + Send + Sync + 'static,
{
    let index = column.to_string();

    move |error| sqlx::Error::ColumnDecode {
        index,
        source: Box::new(error),
    }
}

fn column_encode<E>(column: &str) -> impl FnOnce(E) -> sqlx::Error
where
    E: StdError + Send + Sync + 'static,
{
    let column = column.to_string();

    move |error| sqlx::Error::Encode(format!("{column}: {error}").into())
}

/// Non-negative counts are stored as `BIGINT`.
fn get_u64(row: &PgRow, column: &str) -> sqlx::Result<u64> {
    let value: i64 = row.try_get(column)?;

    u64::try_from(value).map_err(column_decode(column))
}

fn to_i64(value: u64, column: &str) -> sqlx::Result<i64> {
    i64::try_from(value).map_err(column_encode(column))
}
