//! Persistence Collaborator
//!
//! The IAM core only talks to storage through [`Reader`] and [`Writer`]:
//! - `Writer::create` persists one resource and assigns its id
//! - `Writer::update` persists only the fields named in a field mask
//! - `Reader::query` returns zero or more rows for a foreign-key lookup
//!
//! [`Store`] implements both with one transaction per write.
//! [`UnitOfWork`] implements both inside a caller-managed transaction.
//! Referential integrity is left to the storage layer: a write that names a
//! missing owner or scope fails with `IamError::Constraint`.

pub mod schema;
pub mod sqlite;
pub mod unit_of_work;

pub use sqlite::Store;
pub use unit_of_work::UnitOfWork;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, Sqlite, SqliteConnection};
use tracing::{debug, warn};

use crate::shared::error::{IamError, Result};

/// A column value bound into a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Identifier of another resource; 0 is written as NULL.
    Ref(u32),
    Int(i64),
    Bool(bool),
    Text(String),
    OptionalText(Option<String>),
    Time(DateTime<Utc>),
}

/// Bind each [`Value`] of `$values` onto `$query` in order.
macro_rules! bind_values {
    ($query:expr, $values:expr) => {{
        let mut query = $query;
        for value in $values {
            query = match value {
                Value::Ref(0) => query.bind(None::<u32>),
                Value::Ref(id) => query.bind(Some(id)),
                Value::Int(v) => query.bind(v),
                Value::Bool(v) => query.bind(v),
                Value::Text(v) => query.bind(v),
                Value::OptionalText(v) => query.bind(v),
                Value::Time(v) => query.bind(v),
            };
        }
        query
    }};
}

/// A row type the store can create, update, delete and read.
pub trait Resource: for<'r> FromRow<'r, SqliteRow> + Send + Sync + Unpin + 'static {
    const TABLE: &'static str;
    /// Name used in errors and logs.
    const RESOURCE_TYPE: &'static str;
    /// Whether the store assigns an integer `id` on create.
    const GENERATED_ID: bool = true;

    /// Storage id, 0 until persisted.
    fn id(&self) -> u32 {
        0
    }

    fn assign_id(&mut self, _id: u32) {}

    /// Columns written on create, excluding a generated id.
    fn insert_values(&self) -> Vec<(&'static str, Value)>;

    /// Columns identifying the persisted row.
    fn primary_key(&self) -> Vec<(&'static str, Value)> {
        vec![("id", Value::Ref(self.id()))]
    }

    /// Column and current value for an updatable field, `None` if the field
    /// is unknown or immutable.
    fn update_value(&self, _field: &str) -> Option<(&'static str, Value)> {
        None
    }

    /// Refresh the modification time and return its column, if tracked.
    fn touch(&mut self) -> Option<(&'static str, Value)> {
        None
    }
}

/// Read-capable collaborator.
#[async_trait]
pub trait Reader: Send {
    /// Run `sql` with positional `args` and decode every row.
    async fn query<R: Resource>(&mut self, sql: &str, args: Vec<Value>) -> Result<Vec<R>>;

    async fn lookup_by_id<R: Resource>(&mut self, id: u32) -> Result<Option<R>> {
        if id == 0 {
            return Ok(None);
        }
        let sql = format!("SELECT * FROM {} WHERE id = ?", R::TABLE);
        let mut rows = self.query::<R>(&sql, vec![Value::Ref(id)]).await?;
        Ok(rows.pop())
    }

    /// Rows whose `column` references `id`, ordered by key.
    async fn search_by<R: Resource>(&mut self, column: &'static str, id: u32) -> Result<Vec<R>> {
        let sql = format!("SELECT * FROM {} WHERE {} = ? ORDER BY rowid", R::TABLE, column);
        self.query::<R>(&sql, vec![Value::Ref(id)]).await
    }
}

/// Write-capable collaborator.
#[async_trait]
pub trait Writer: Send {
    async fn create<R: Resource>(&mut self, resource: &mut R) -> Result<()>;

    /// Returns the number of rows updated. A resource with a generated id
    /// whose row is gone fails with `NotFound`.
    async fn update<R: Resource>(&mut self, resource: &mut R, field_mask: &[&str]) -> Result<u64>;

    /// Returns the number of rows deleted. A resource with a generated id
    /// whose row is gone fails with `NotFound`; a missing join row yields 0.
    async fn delete<R: Resource>(&mut self, resource: &R) -> Result<u64>;
}

/// Read `column` as a reference id where NULL means 0.
pub(crate) fn ref_column(row: &SqliteRow, column: &str) -> std::result::Result<u32, sqlx::Error> {
    Ok(row.try_get::<Option<u32>, _>(column)?.unwrap_or_default())
}

pub(crate) async fn fetch_all<R: Resource>(
    conn: &mut SqliteConnection,
    sql: &str,
    args: Vec<Value>,
) -> Result<Vec<R>> {
    let rows = bind_values!(sqlx::query_as::<Sqlite, R>(sql), args)
        .fetch_all(&mut *conn)
        .await?;
    debug!(table = R::TABLE, count = rows.len(), "Fetched rows");
    Ok(rows)
}

pub(crate) async fn insert<R: Resource>(conn: &mut SqliteConnection, resource: &mut R) -> Result<()> {
    if R::GENERATED_ID && resource.id() != 0 {
        return Err(IamError::validation(
            "ALREADY_PERSISTED",
            format!("{} {} is already persisted", R::RESOURCE_TYPE, resource.id()),
        ));
    }

    let values = resource.insert_values();
    let columns: Vec<&str> = values.iter().map(|(column, _)| *column).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        R::TABLE,
        columns.join(", "),
        vec!["?"; columns.len()].join(", ")
    );

    let result = bind_values!(sqlx::query::<Sqlite>(&sql), values.into_iter().map(|(_, v)| v))
        .execute(&mut *conn)
        .await
        .map_err(|e| rejected(R::RESOURCE_TYPE, "create", e))?;

    if R::GENERATED_ID {
        let id = u32::try_from(result.last_insert_rowid()).map_err(|_| {
            IamError::validation(
                "ID_OUT_OF_RANGE",
                format!("{} id {} exceeds u32", R::RESOURCE_TYPE, result.last_insert_rowid()),
            )
        })?;
        resource.assign_id(id);
    }

    debug!(table = R::TABLE, id = resource.id(), "Created resource");
    Ok(())
}

pub(crate) async fn update<R: Resource>(
    conn: &mut SqliteConnection,
    resource: &mut R,
    field_mask: &[&str],
) -> Result<u64> {
    if field_mask.is_empty() {
        return Err(IamError::validation(
            "EMPTY_FIELD_MASK",
            format!("update of {} names no fields", R::RESOURCE_TYPE),
        ));
    }
    if R::GENERATED_ID && resource.id() == 0 {
        return Err(IamError::validation(
            "NOT_PERSISTED",
            format!("cannot update an unpersisted {}", R::RESOURCE_TYPE),
        ));
    }

    let mut assignments = Vec::with_capacity(field_mask.len() + 1);
    for field in field_mask {
        let assignment = resource.update_value(field).ok_or_else(|| {
            IamError::validation(
                "INVALID_FIELD_MASK",
                format!("{} has no updatable field '{}'", R::RESOURCE_TYPE, field),
            )
        })?;
        assignments.push(assignment);
    }
    if let Some(touched) = resource.touch() {
        assignments.push(touched);
    }

    let key = resource.primary_key();
    let set_clause: Vec<String> = assignments.iter().map(|(c, _)| format!("{} = ?", c)).collect();
    let where_clause: Vec<String> = key.iter().map(|(c, _)| format!("{} = ?", c)).collect();
    let sql = format!(
        "UPDATE {} SET {} WHERE {}",
        R::TABLE,
        set_clause.join(", "),
        where_clause.join(" AND ")
    );

    let args = assignments.into_iter().chain(key).map(|(_, v)| v);
    let result = bind_values!(sqlx::query::<Sqlite>(&sql), args)
        .execute(&mut *conn)
        .await
        .map_err(|e| rejected(R::RESOURCE_TYPE, "update", e))?;

    missing_row::<R>(resource, result.rows_affected())?;
    debug!(table = R::TABLE, id = resource.id(), fields = ?field_mask, rows = result.rows_affected(), "Updated resource");
    Ok(result.rows_affected())
}

pub(crate) async fn delete<R: Resource>(conn: &mut SqliteConnection, resource: &R) -> Result<u64> {
    let key = resource.primary_key();
    let where_clause: Vec<String> = key.iter().map(|(c, _)| format!("{} = ?", c)).collect();
    let sql = format!("DELETE FROM {} WHERE {}", R::TABLE, where_clause.join(" AND "));

    let result = bind_values!(sqlx::query::<Sqlite>(&sql), key.into_iter().map(|(_, v)| v))
        .execute(&mut *conn)
        .await
        .map_err(|e| rejected(R::RESOURCE_TYPE, "delete", e))?;

    missing_row::<R>(resource, result.rows_affected())?;
    debug!(table = R::TABLE, rows = result.rows_affected(), "Deleted resource");
    Ok(result.rows_affected())
}

/// A write keyed by a generated id must hit its row. Join rows report 0 instead.
fn missing_row<R: Resource>(resource: &R, rows: u64) -> Result<()> {
    if R::GENERATED_ID && rows == 0 {
        return Err(IamError::not_found(R::RESOURCE_TYPE, resource.id()));
    }
    Ok(())
}

fn rejected(resource: &'static str, operation: &'static str, err: sqlx::Error) -> IamError {
    let err = IamError::from(err);
    if err.is_constraint() {
        warn!(resource, operation, error = %err, "Store rejected write");
    }
    err
}
