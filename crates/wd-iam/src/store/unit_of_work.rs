//! Unit of Work
//!
//! Groups several reads and writes into one SQLite transaction.

use async_trait::async_trait;
use sqlx::{Sqlite, Transaction};
use tracing::debug;

use super::{Reader, Resource, Value, Writer};
use crate::shared::error::Result;

/// A transaction acquired from a [`Store`](super::Store).
///
/// Writes made through it are visible to its own reads immediately and to
/// everyone else only after [`commit`](Self::commit). Dropping it without
/// committing rolls everything back, so an early `?` return leaves no partial
/// state behind.
///
/// # Usage
///
/// ```ignore
/// let mut uow = store.begin().await?;
/// uow.create(&mut organization).await?;
/// let mut root = User::new(&organization, UserOptions::new().as_root_user(true))?;
/// uow.create(&mut root).await?;
/// uow.commit().await?;
/// ```
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
    writes: usize,
}

impl UnitOfWork {
    pub(crate) fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self { tx, writes: 0 }
    }

    /// Number of writes issued so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub async fn commit(self) -> Result<()> {
        let writes = self.writes;
        self.tx.commit().await?;
        debug!(writes, "Committed unit of work");
        Ok(())
    }

    pub async fn rollback(self) -> Result<()> {
        let writes = self.writes;
        self.tx.rollback().await?;
        debug!(writes, "Rolled back unit of work");
        Ok(())
    }
}

#[async_trait]
impl Reader for UnitOfWork {
    async fn query<R: Resource>(&mut self, sql: &str, args: Vec<Value>) -> Result<Vec<R>> {
        super::fetch_all(&mut self.tx, sql, args).await
    }
}

#[async_trait]
impl Writer for UnitOfWork {
    async fn create<R: Resource>(&mut self, resource: &mut R) -> Result<()> {
        super::insert(&mut self.tx, resource).await?;
        self.writes += 1;
        Ok(())
    }

    async fn update<R: Resource>(&mut self, resource: &mut R, field_mask: &[&str]) -> Result<u64> {
        let rows = super::update(&mut self.tx, resource, field_mask).await?;
        self.writes += 1;
        Ok(rows)
    }

    async fn delete<R: Resource>(&mut self, resource: &R) -> Result<u64> {
        let rows = super::delete(&mut self.tx, resource).await?;
        self.writes += 1;
        Ok(rows)
    }
}
