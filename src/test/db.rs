//! Per-test `PostgreSQL` databases inside one shared container.

use std::{
    error::Error,
    sync::atomic::{AtomicU64, Ordering},
};

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool, query};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};

use crate::database;

type BoxError = Box<dyn Error + Send + Sync>;

const USER: &str = "campaigns_test";
const PASSWORD: &str = "campaigns_test_password";

static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

/// Databases waiting to be dropped by the background cleanup task.
static CLEANUP_SENDER: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

static NEXT_DATABASE: AtomicU64 = AtomicU64::new(0);

async fn start_container() -> Result<ContainerAsync<PostgresImage>, BoxError> {
    let container = PostgresImage::default()
        .with_user(USER)
        .with_password(PASSWORD)
        .with_db_name("campaigns_test")
        .start()
        .await?;

    Ok(container)
}

async fn server_url(database: &str) -> Result<String, BoxError> {
    let container = POSTGRES_CONTAINER
        .get_or_try_init(start_container)
        .await?;

    let port = container.get_host_port_ipv4(5432).await?;

    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    Ok(format!("postgresql://{USER}:{PASSWORD}@{host}:{port}/{database}"))
}

async fn start_cleanup_task() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(name) = receiver.recv().await {
            if let Err(error) = drop_database(&name).await {
                tracing::warn!(database = %name, %error, "failed to drop test database");
            }
        }
    });

    sender
}

async fn drop_database(name: &str) -> Result<(), BoxError> {
    let mut conn = PgConnection::connect(&server_url("postgres").await?).await?;

    query(&format!("DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE)"))
        .execute(&mut conn)
        .await?;

    conn.close().await?;

    Ok(())
}

/// A freshly migrated database that is dropped when this value is.
///
/// Names are generated from the process id and a counter, so they are always
/// valid identifiers and never collide between concurrently running tests.
#[derive(Debug)]
pub(crate) struct TestDb {
    pool: PgPool,
    name: String,
}

impl TestDb {
    pub(crate) async fn new() -> Result<Self, BoxError> {
        CLEANUP_SENDER.get_or_init(start_cleanup_task).await;

        let name = format!(
            "campaigns_test_{}_{}",
            std::process::id(),
            NEXT_DATABASE.fetch_add(1, Ordering::Relaxed)
        );

        let mut conn = PgConnection::connect(&server_url("postgres").await?).await?;

        query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut conn)
            .await?;

        conn.close().await?;

        let pool = database::connect(&server_url(&name).await?).await?;

        database::migrate(&pool).await?;

        Ok(Self { pool, name })
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(sender) = CLEANUP_SENDER.get()
            && sender.send(self.name.clone()).is_err()
        {
            tracing::debug!(database = %self.name, "cleanup task already stopped");
        }
    }
}
