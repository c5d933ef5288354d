//! Auth method persistence mapping and lookups
//!
//! Rows live in `iam_auth_method`; `kind` is stored as its integer code and
//! only `owner_id` is updatable.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::auth_method::entity::{AuthMethod, AuthMethodKind};
use crate::resolver;
use crate::scope::entity::Scope;
use crate::shared::error::Result;
use crate::store::{ref_column, Reader, Resource, Value};
use crate::user::entity::User;

impl<'r> FromRow<'r, SqliteRow> for AuthMethod {
    fn from_row(row: &'r SqliteRow) -> std::result::Result<Self, sqlx::Error> {
        let code: i64 = row.try_get("kind")?;
        let kind = AuthMethodKind::from_code(code)
            .ok_or_else(|| sqlx::Error::Decode(format!("unknown auth method kind {}", code).into()))?;

        Ok(Self {
            id: row.try_get("id")?,
            public_id: row.try_get("public_id")?,
            primary_scope_id: ref_column(row, "primary_scope_id")?,
            owner_id: ref_column(row, "owner_id")?,
            kind,
            create_time: row.try_get("create_time")?,
            update_time: row.try_get("update_time")?,
        })
    }
}

impl Resource for AuthMethod {
    const TABLE: &'static str = "iam_auth_method";
    const RESOURCE_TYPE: &'static str = "auth method";

    fn id(&self) -> u32 {
        self.id
    }

    fn assign_id(&mut self, id: u32) {
        self.id = id;
    }

    fn insert_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("public_id", Value::Text(self.public_id.clone())),
            ("primary_scope_id", Value::Ref(self.primary_scope_id)),
            ("owner_id", Value::Ref(self.owner_id)),
            ("kind", Value::Int(self.kind.code())),
            ("create_time", Value::Time(self.create_time)),
            ("update_time", Value::Time(self.update_time)),
        ]
    }

    fn update_value(&self, field: &str) -> Option<(&'static str, Value)> {
        match field {
            "owner_id" => Some(("owner_id", Value::Ref(self.owner_id))),
            _ => None,
        }
    }

    fn touch(&mut self) -> Option<(&'static str, Value)> {
        self.update_time = Utc::now();
        Some(("update_time", Value::Time(self.update_time)))
    }
}

impl AuthMethod {
    pub async fn owner<R: Reader>(&self, reader: &mut R) -> Result<User> {
        resolver::owner_of(self, reader).await
    }

    pub async fn primary_scope<R: Reader>(&self, reader: &mut R) -> Result<Scope> {
        resolver::primary_scope_of(self, reader).await
    }
}
