//! Scope persistence mapping and lookups

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::resolver;
use crate::scope::entity::{Scope, ScopeKind};
use crate::shared::error::Result;
use crate::store::{ref_column, Reader, Resource, Value};
use crate::user::entity::User;

impl<'r> FromRow<'r, SqliteRow> for Scope {
    fn from_row(row: &'r SqliteRow) -> std::result::Result<Self, sqlx::Error> {
        let code: i64 = row.try_get("kind")?;
        let kind = ScopeKind::from_code(code)
            .ok_or_else(|| sqlx::Error::Decode(format!("unknown scope kind {}", code).into()))?;

        Ok(Self {
            id: row.try_get("id")?,
            public_id: row.try_get("public_id")?,
            kind,
            owner_id: ref_column(row, "owner_id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            create_time: row.try_get("create_time")?,
            update_time: row.try_get("update_time")?,
        })
    }
}

impl Resource for Scope {
    const TABLE: &'static str = "iam_scope";
    const RESOURCE_TYPE: &'static str = "scope";

    fn id(&self) -> u32 {
        self.id
    }

    fn assign_id(&mut self, id: u32) {
        self.id = id;
    }

    fn insert_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("public_id", Value::Text(self.public_id.clone())),
            ("kind", Value::Int(self.kind.code())),
            ("owner_id", Value::Ref(self.owner_id)),
            ("name", Value::OptionalText(self.name.clone())),
            ("description", Value::OptionalText(self.description.clone())),
            ("create_time", Value::Time(self.create_time)),
            ("update_time", Value::Time(self.update_time)),
        ]
    }

    // Kind is fixed at creation.
    fn update_value(&self, field: &str) -> Option<(&'static str, Value)> {
        match field {
            "owner_id" => Some(("owner_id", Value::Ref(self.owner_id))),
            "name" => Some(("name", Value::OptionalText(self.name.clone()))),
            "description" => Some(("description", Value::OptionalText(self.description.clone()))),
            _ => None,
        }
    }

    fn touch(&mut self) -> Option<(&'static str, Value)> {
        self.update_time = Utc::now();
        Some(("update_time", Value::Time(self.update_time)))
    }
}

impl Scope {
    /// The user owning this project. Organizations have no owner and yield `NotFound`.
    pub async fn owner<R: Reader>(&self, reader: &mut R) -> Result<User> {
        resolver::owner_of(self, reader).await
    }

    /// Users whose primary scope is this scope.
    pub async fn users<R: Reader>(&self, reader: &mut R) -> Result<Vec<User>> {
        reader.search_by::<User>("primary_scope_id", self.id).await
    }
}
