//! User alias persistence mapping and lookups
//!
//! `(auth_method_id, external_id)` is unique in `iam_user_alias`, so a second
//! alias for the same external identity under one method is rejected by the
//! store as a constraint violation.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::alias::entity::UserAlias;
use crate::auth_method::entity::AuthMethod;
use crate::resolver;
use crate::scope::entity::Scope;
use crate::shared::error::Result;
use crate::store::{ref_column, Reader, Resource, Value};
use crate::user::entity::User;

impl<'r> FromRow<'r, SqliteRow> for UserAlias {
    fn from_row(row: &'r SqliteRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            public_id: row.try_get("public_id")?,
            primary_scope_id: ref_column(row, "primary_scope_id")?,
            owner_id: ref_column(row, "owner_id")?,
            auth_method_id: ref_column(row, "auth_method_id")?,
            external_id: row.try_get("external_id")?,
            create_time: row.try_get("create_time")?,
            update_time: row.try_get("update_time")?,
        })
    }
}

impl Resource for UserAlias {
    const TABLE: &'static str = "iam_user_alias";
    const RESOURCE_TYPE: &'static str = "user alias";

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
            ("auth_method_id", Value::Ref(self.auth_method_id)),
            ("external_id", Value::Text(self.external_id.clone())),
            ("create_time", Value::Time(self.create_time)),
            ("update_time", Value::Time(self.update_time)),
        ]
    }

    // The auth method binding is fixed; re-aliasing means a new alias.
    fn update_value(&self, field: &str) -> Option<(&'static str, Value)> {
        match field {
            "owner_id" => Some(("owner_id", Value::Ref(self.owner_id))),
            "external_id" => Some(("external_id", Value::Text(self.external_id.clone()))),
            _ => None,
        }
    }

    fn touch(&mut self) -> Option<(&'static str, Value)> {
        self.update_time = Utc::now();
        Some(("update_time", Value::Time(self.update_time)))
    }
}

impl UserAlias {
    /// The user this alias represents.
    pub async fn owner<R: Reader>(&self, reader: &mut R) -> Result<User> {
        resolver::owner_of(self, reader).await
    }

    pub async fn auth_method<R: Reader>(&self, reader: &mut R) -> Result<AuthMethod> {
        resolver::lookup::<AuthMethod, R>(reader, self.auth_method_id).await
    }

    pub async fn primary_scope<R: Reader>(&self, reader: &mut R) -> Result<Scope> {
        resolver::primary_scope_of(self, reader).await
    }
}
