//! Scope Entity
//!
//! Two-level hierarchy: an ownerless Organization at the top, Projects owned
//! by a user beneath it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resolver::Owned;
use crate::shared::error::{IamError, Result};
use crate::shared::public_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScopeKind {
    Organization,
    Project,
}

impl ScopeKind {
    pub fn code(&self) -> i64 {
        match self {
            Self::Organization => 1,
            Self::Project => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Organization),
            2 => Some(Self::Project),
            _ => None,
        }
    }
}

/// Optional settings for [`Scope::new`].
#[derive(Debug, Clone, Default)]
pub struct ScopeOptions {
    /// Owning user; required for projects, forbidden for organizations.
    /// Zero counts as unset.
    pub owner_id: Option<u32>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ScopeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_owner_id(mut self, owner_id: u32) -> Self {
        self.owner_id = Some(owner_id);
        self
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
pub struct Scope {
    /// Storage id, 0 until persisted
    pub id: u32,
    pub public_id: String,
    pub kind: ScopeKind,
    /// Owning user, 0 for organizations
    pub owner_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

impl Scope {
    /// Build an unpersisted scope.
    ///
    /// Organizations must not have an owner; projects must.
    pub fn new(kind: ScopeKind, options: ScopeOptions) -> Result<Self> {
        let owner_id = options.owner_id.unwrap_or_default();
        match kind {
            ScopeKind::Organization if owner_id != 0 => {
                return Err(IamError::validation(
                    "ORGANIZATION_OWNER_FORBIDDEN",
                    "organization scopes cannot have an owner",
                ));
            }
            ScopeKind::Project if owner_id == 0 => {
                return Err(IamError::validation(
                    "PROJECT_OWNER_REQUIRED",
                    "project scopes require a nonzero owner id",
                ));
            }
            _ => {}
        }

        let now = Utc::now();
        Ok(Self {
            id: 0,
            public_id: public_id::generate(public_id::SCOPE_PREFIX),
            kind,
            owner_id,
            name: options.name,
            description: options.description,
            create_time: now,
            update_time: now,
        })
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    pub fn is_organization(&self) -> bool {
        self.kind == ScopeKind::Organization
    }

    pub fn is_project(&self) -> bool {
        self.kind == ScopeKind::Project
    }
}

impl Owned for Scope {
    fn owner_id(&self) -> u32 {
        self.owner_id
    }
}
