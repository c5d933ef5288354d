//! User persistence mapping and lookups

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::alias::entity::UserAlias;
use crate::auth_method::entity::AuthMethod;
use crate::group::entity::Group;
use crate::resolver;
use crate::scope::entity::Scope;
use crate::shared::error::Result;
use crate::store::{ref_column, Reader, Resource, Value};
use crate::user::entity::User;

const GROUPS_OF_MEMBER: &str = "SELECT g.* FROM iam_group g \
     JOIN iam_group_member m ON m.group_id = g.id \
     WHERE m.member_id = ? ORDER BY g.id";

impl<'r> FromRow<'r, SqliteRow> for User {
    fn from_row(row: &'r SqliteRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            public_id: row.try_get("public_id")?,
            primary_scope_id: ref_column(row, "primary_scope_id")?,
            owner_id: ref_column(row, "owner_id")?,
            root: row.try_get("root")?,
            name: row.try_get("name")?,
            create_time: row.try_get("create_time")?,
            update_time: row.try_get("update_time")?,
        })
    }
}

impl Resource for User {
    const TABLE: &'static str = "iam_user";
    const RESOURCE_TYPE: &'static str = "user";

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
            ("root", Value::Bool(self.root)),
            ("name", Value::OptionalText(self.name.clone())),
            ("create_time", Value::Time(self.create_time)),
            ("update_time", Value::Time(self.update_time)),
        ]
    }

    fn update_value(&self, field: &str) -> Option<(&'static str, Value)> {
        match field {
            "primary_scope_id" => Some(("primary_scope_id", Value::Ref(self.primary_scope_id))),
            "owner_id" => Some(("owner_id", Value::Ref(self.owner_id))),
            "name" => Some(("name", Value::OptionalText(self.name.clone()))),
            _ => None,
        }
    }

    fn touch(&mut self) -> Option<(&'static str, Value)> {
        self.update_time = Utc::now();
        Some(("update_time", Value::Time(self.update_time)))
    }
}

impl User {
    /// The scope the user is currently homed in, as last persisted.
    pub async fn primary_scope<R: Reader>(&self, reader: &mut R) -> Result<Scope> {
        resolver::primary_scope_of(self, reader).await
    }

    /// The owning user. Root users yield `NotFound`.
    pub async fn owner<R: Reader>(&self, reader: &mut R) -> Result<User> {
        resolver::owner_of(self, reader).await
    }

    /// Aliases owned by this user, in creation order. Empty when there are none.
    pub async fn user_aliases<R: Reader>(&self, reader: &mut R) -> Result<Vec<UserAlias>> {
        reader.search_by::<UserAlias>("owner_id", self.id).await
    }

    /// Groups this user is a member of, ordered by group id.
    pub async fn groups<R: Reader>(&self, reader: &mut R) -> Result<Vec<Group>> {
        reader
            .query::<Group>(GROUPS_OF_MEMBER, vec![Value::Ref(self.id)])
            .await
    }

    /// Auth methods administered by this user.
    pub async fn auth_methods<R: Reader>(&self, reader: &mut R) -> Result<Vec<AuthMethod>> {
        reader.search_by::<AuthMethod>("owner_id", self.id).await
    }
}
