//! Group and GroupMember Entities
//!
//! Both constructors require persisted references; a zero id fails with
//! `UNPERSISTED_REFERENCE` before any write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resolver::{Owned, Scoped};
use crate::scope::entity::Scope;
use crate::shared::error::{require_persisted, Result};
use crate::shared::public_id;
use crate::user::entity::User;

/// Optional settings for [`Group::new`].
#[derive(Debug, Clone, Default)]
pub struct GroupOptions {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl GroupOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Storage id, 0 until persisted
    pub id: u32,
    pub public_id: String,
    /// Scope the group is homed in
    pub primary_scope_id: u32,
    /// User administering the group
    pub owner_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

impl Group {
    /// Build an unpersisted group in `scope` administered by `owner`. Both
    /// must already be persisted.
    pub fn new(scope: &Scope, owner: &User, options: GroupOptions) -> Result<Self> {
        require_persisted("scope", scope.id)?;
        require_persisted("owner", owner.id)?;

        let now = Utc::now();
        Ok(Self {
            id: 0,
            public_id: public_id::generate(public_id::GROUP_PREFIX),
            primary_scope_id: scope.id,
            owner_id: owner.id,
            name: options.name,
            description: options.description,
            create_time: now,
            update_time: now,
        })
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

impl Owned for Group {
    fn owner_id(&self) -> u32 {
        self.owner_id
    }
}

impl Scoped for Group {
    fn primary_scope_id(&self) -> u32 {
        self.primary_scope_id
    }
}

/// Membership of one user in one group, keyed by `(group_id, member_id)`.
///
/// Memberships are created and deleted, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub group_id: u32,
    /// Id of the member user
    pub member_id: u32,
    /// Scope the membership was granted in, not necessarily the user's
    /// primary scope
    pub scope_id: u32,
    pub create_time: DateTime<Utc>,
}

impl GroupMember {
    pub fn new(scope: &Scope, group: &Group, user: &User) -> Result<Self> {
        require_persisted("scope", scope.id)?;
        require_persisted("group", group.id)?;
        require_persisted("member", user.id)?;

        Ok(Self {
            group_id: group.id,
            member_id: user.id,
            scope_id: scope.id,
            create_time: Utc::now(),
        })
    }
}
