//! Auth Method Entity
//!
//! An auth method belongs to one scope and is administered by one user. The
//! kind is fixed at creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resolver::{Owned, Scoped};
use crate::scope::entity::Scope;
use crate::shared::error::{require_persisted, Result};
use crate::shared::public_id;
use crate::user::entity::User;

/// Authentication protocol, stored as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthMethodKind {
    /// Login name and password
    UserPass,
    /// OpenID Connect provider
    Oidc,
}

impl AuthMethodKind {
    pub fn code(&self) -> i64 {
        match self {
            Self::UserPass => 1,
            Self::Oidc => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::UserPass),
            2 => Some(Self::Oidc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthMethod {
    /// Storage id, 0 until persisted
    pub id: u32,
    pub public_id: String,
    /// Scope the method is configured in
    pub primary_scope_id: u32,
    /// User administering the method
    pub owner_id: u32,
    /// Protocol; immutable once persisted
    pub kind: AuthMethodKind,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

impl AuthMethod {
    /// Build an unpersisted method. `scope` and `owner` must be persisted.
    pub fn new(scope: &Scope, owner: &User, kind: AuthMethodKind) -> Result<Self> {
        require_persisted("scope", scope.id)?;
        require_persisted("owner", owner.id)?;

        let now = Utc::now();
        Ok(Self {
            id: 0,
            public_id: public_id::generate(public_id::AUTH_METHOD_PREFIX),
            primary_scope_id: scope.id,
            owner_id: owner.id,
            kind,
            create_time: now,
            update_time: now,
        })
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

impl Owned for AuthMethod {
    fn owner_id(&self) -> u32 {
        self.owner_id
    }
}

impl Scoped for AuthMethod {
    fn primary_scope_id(&self) -> u32 {
        self.primary_scope_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::entity::{ScopeKind, ScopeOptions};
    use crate::user::entity::UserOptions;

    #[test]
    fn test_new_auth_method() {
        let mut scope = Scope::new(ScopeKind::Organization, ScopeOptions::new()).unwrap();
        scope.id = 3;
        let mut owner = User::new(&scope, UserOptions::new().as_root_user(true)).unwrap();

        let err = AuthMethod::new(&scope, &owner, AuthMethodKind::Oidc).unwrap_err();
        assert_eq!(err.code(), "UNPERSISTED_REFERENCE");

        owner.id = 4;
        let method = AuthMethod::new(&scope, &owner, AuthMethodKind::Oidc).unwrap();
        assert_eq!(method.kind, AuthMethodKind::Oidc);
        assert_eq!((method.primary_scope_id, method.owner_id), (3, 4));
        assert!(!method.is_persisted());
    }

    #[test]
    fn test_kind_codes() {
        assert_eq!(AuthMethodKind::from_code(AuthMethodKind::UserPass.code()), Some(AuthMethodKind::UserPass));
        assert_eq!(AuthMethodKind::from_code(0), None);
        assert_eq!(serde_json::to_string(&AuthMethodKind::UserPass).unwrap(), "\"USER_PASS\"");
    }
}
