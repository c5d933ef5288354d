//! Group and membership persistence mapping

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::group::entity::{Group, GroupMember};
use crate::resolver;
use crate::scope::entity::Scope;
use crate::shared::error::Result;
use crate::store::{ref_column, Reader, Resource, Value};
use crate::user::entity::User;

const MEMBERS_OF_GROUP: &str = "SELECT u.* FROM iam_user u \
     JOIN iam_group_member m ON m.member_id = u.id \
     WHERE m.group_id = ? ORDER BY u.id";

impl<'r> FromRow<'r, SqliteRow> for Group {
    fn from_row(row: &'r SqliteRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            public_id: row.try_get("public_id")?,
            primary_scope_id: ref_column(row, "primary_scope_id")?,
            owner_id: ref_column(row, "owner_id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            create_time: row.try_get("create_time")?,
            update_time: row.try_get("update_time")?,
        })
    }
}

impl Resource for Group {
    const TABLE: &'static str = "iam_group";
    const RESOURCE_TYPE: &'static str = "group";

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
            ("name", Value::OptionalText(self.name.clone())),
            ("description", Value::OptionalText(self.description.clone())),
            ("create_time", Value::Time(self.create_time)),
            ("update_time", Value::Time(self.update_time)),
        ]
    }

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

impl<'r> FromRow<'r, SqliteRow> for GroupMember {
    fn from_row(row: &'r SqliteRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(Self {
            group_id: row.try_get("group_id")?,
            member_id: row.try_get("member_id")?,
            scope_id: row.try_get("scope_id")?,
            create_time: row.try_get("create_time")?,
        })
    }
}

impl Resource for GroupMember {
    const TABLE: &'static str = "iam_group_member";
    const RESOURCE_TYPE: &'static str = "group member";
    const GENERATED_ID: bool = false;

    fn insert_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("group_id", Value::Ref(self.group_id)),
            ("member_id", Value::Ref(self.member_id)),
            ("scope_id", Value::Ref(self.scope_id)),
            ("create_time", Value::Time(self.create_time)),
        ]
    }

    fn primary_key(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("group_id", Value::Ref(self.group_id)),
            ("member_id", Value::Ref(self.member_id)),
        ]
    }
}

impl Group {
    pub async fn owner<R: Reader>(&self, reader: &mut R) -> Result<User> {
        resolver::owner_of(self, reader).await
    }

    pub async fn primary_scope<R: Reader>(&self, reader: &mut R) -> Result<Scope> {
        resolver::primary_scope_of(self, reader).await
    }

    /// Users that are members of this group, ordered by user id.
    pub async fn members<R: Reader>(&self, reader: &mut R) -> Result<Vec<User>> {
        reader
            .query::<User>(MEMBERS_OF_GROUP, vec![Value::Ref(self.id)])
            .await
    }

    /// Membership rows of this group.
    pub async fn memberships<R: Reader>(&self, reader: &mut R) -> Result<Vec<GroupMember>> {
        reader.search_by::<GroupMember>("group_id", self.id).await
    }
}
