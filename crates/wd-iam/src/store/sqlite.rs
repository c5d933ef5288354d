//! SQLite Store
//!
//! Pool-backed implementation of [`Reader`] and [`Writer`]. Each write runs
//! in its own transaction; use [`Store::begin`] to group writes.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;
use wd_config::DatabaseConfig;

use super::unit_of_work::UnitOfWork;
use super::{schema, Reader, Resource, Value, Writer};
use crate::shared::error::Result;

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Wrap an existing pool. Foreign keys must be enabled on its connections.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the database described by `config`, applying the schema when
    /// `create_schema` is set.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .foreign_keys(true)
            .create_if_missing(true);

        // An in-memory database lives and dies with its connection.
        let pool = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .connect_with(options)
                .await?
        };

        info!(url = %config.url, in_memory = config.is_in_memory(), "Connected to identity store");

        let store = Self::new(pool);
        if config.create_schema {
            store.init_schema().await?;
        }
        Ok(store)
    }

    /// Fresh in-memory store with the schema applied.
    pub async fn in_memory() -> Result<Self> {
        Self::connect(&DatabaseConfig::in_memory()).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables and indexes if they do not exist.
    pub async fn init_schema(&self) -> Result<()> {
        for statement in schema::STATEMENTS {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!(statements = schema::STATEMENTS.len(), "IAM schema initialized");
        Ok(())
    }

    /// Start a unit of work. Nothing it writes is visible until `commit`.
    pub async fn begin(&self) -> Result<UnitOfWork> {
        let tx = self.pool.begin().await?;
        Ok(UnitOfWork::new(tx))
    }
}

#[async_trait]
impl Reader for Store {
    async fn query<R: Resource>(&mut self, sql: &str, args: Vec<Value>) -> Result<Vec<R>> {
        let mut conn = self.pool.acquire().await?;
        super::fetch_all(&mut conn, sql, args).await
    }
}

#[async_trait]
impl Writer for Store {
    async fn create<R: Resource>(&mut self, resource: &mut R) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        super::insert(&mut tx, resource).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn update<R: Resource>(&mut self, resource: &mut R, field_mask: &[&str]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let rows = super::update(&mut tx, resource, field_mask).await?;
        tx.commit().await?;
        Ok(rows)
    }

    async fn delete<R: Resource>(&mut self, resource: &R) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let rows = super::delete(&mut tx, resource).await?;
        tx.commit().await?;
        Ok(rows)
    }
}
