//! User Entity
//!
//! A user is either the unowned root of its scope or owned by another user,
//! never both.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resolver::{Owned, Scoped};
use crate::scope::entity::Scope;
use crate::shared::error::{IamError, Result};
use crate::shared::public_id;

/// Optional settings for [`User::new`].
#[derive(Debug, Clone, Default)]
pub struct UserOptions {
    pub root: bool,
    /// Owning user. Zero counts as unset.
    pub owner_id: Option<u32>,
    pub name: Option<String>,
}

impl UserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_root_user(mut self, root: bool) -> Self {
        self.root = root;
        self
    }

    pub fn with_owner_id(mut self, owner_id: u32) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Storage id, 0 until persisted
    pub id: u32,
    pub public_id: String,
    /// Scope the user is homed in; may be repointed after creation
    pub primary_scope_id: u32,
    /// Owning user, 0 for root users
    pub owner_id: u32,
    pub root: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

impl User {
    /// Build an unpersisted user homed in `scope`.
    ///
    /// The scope does not have to be persisted yet, but persisting the user
    /// against an unpersisted scope fails in the store.
    pub fn new(scope: &Scope, options: UserOptions) -> Result<Self> {
        let owner_id = options.owner_id.unwrap_or_default();

        if options.root {
            if owner_id != 0 {
                return Err(IamError::validation(
                    "ROOT_USER_OWNER_FORBIDDEN",
                    format!("root users cannot have an owner (got owner id {})", owner_id),
                ));
            }
            if scope.is_project() {
                return Err(IamError::validation(
                    "ROOT_USER_REQUIRES_ORGANIZATION",
                    "root users can only be created in an organization scope",
                ));
            }
        } else if owner_id == 0 {
            return Err(IamError::validation(
                "OWNER_REQUIRED",
                "non-root users require a nonzero owner id",
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id: 0,
            public_id: public_id::generate(public_id::USER_PREFIX),
            primary_scope_id: scope.id,
            owner_id,
            root: options.root,
            name: options.name,
            create_time: now,
            update_time: now,
        })
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    pub fn is_root_user(&self) -> bool {
        self.root
    }

    /// Point the user at a different scope. Persist with the
    /// `primary_scope_id` field mask.
    ///
    /// Root users stay in organization scopes; moving one into a project is
    /// rejected here and, for rows changed directly, by the store.
    pub fn move_to(&mut self, scope: &Scope) -> Result<()> {
        if self.root && scope.is_project() {
            return Err(IamError::validation(
                "ROOT_USER_REQUIRES_ORGANIZATION",
                format!("root user {} cannot move into project scope {}", self.id, scope.id),
            ));
        }
        self.primary_scope_id = scope.id;
        Ok(())
    }
}

impl Owned for User {
    fn owner_id(&self) -> u32 {
        self.owner_id
    }
}

impl Scoped for User {
    fn primary_scope_id(&self) -> u32 {
        self.primary_scope_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::entity::{ScopeKind, ScopeOptions};

    fn organization(id: u32) -> Scope {
        let mut scope = Scope::new(ScopeKind::Organization, ScopeOptions::new()).unwrap();
        scope.id = id;
        scope
    }

    #[test]
    fn test_root_user_has_no_owner() {
        let scope = organization(5);
        let user = User::new(&scope, UserOptions::new().as_root_user(true)).unwrap();
        assert!(user.is_root_user());
        assert_eq!(user.owner_id, 0);
        assert_eq!(user.primary_scope_id, 5);
        assert!(!user.is_persisted());
    }

    #[test]
    fn test_user_with_owner() {
        let scope = organization(5);
        let user = User::new(&scope, UserOptions::new().with_owner_id(11)).unwrap();
        assert!(!user.is_root_user());
        assert_eq!(user.owner_id, 11);
        assert_eq!(user.primary_scope_id, 5);
    }

    #[test]
    fn test_root_and_owner_rejected() {
        let scope = organization(5);
        let err = User::new(
            &scope,
            UserOptions::new().as_root_user(true).with_owner_id(11),
        )
        .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.code(), "ROOT_USER_OWNER_FORBIDDEN");
    }

    #[test]
    fn test_zero_owner_counts_as_unset() {
        let scope = organization(5);
        let root = User::new(&scope, UserOptions::new().as_root_user(true).with_owner_id(0)).unwrap();
        assert_eq!(root.owner_id, 0);

        let err = User::new(&scope, UserOptions::new().with_owner_id(0)).unwrap_err();
        assert_eq!(err.code(), "OWNER_REQUIRED");
    }

    #[test]
    fn test_owner_required() {
        let err = User::new(&organization(5), UserOptions::new()).unwrap_err();
        assert_eq!(err.code(), "OWNER_REQUIRED");
    }

    #[test]
    fn test_root_user_not_allowed_in_project() {
        let mut project = Scope::new(ScopeKind::Project, ScopeOptions::new().with_owner_id(1)).unwrap();
        project.id = 9;
        let err = User::new(&project, UserOptions::new().as_root_user(true)).unwrap_err();
        assert_eq!(err.code(), "ROOT_USER_REQUIRES_ORGANIZATION");
    }

    #[test]
    fn test_unpersisted_scope_allowed_in_memory() {
        let scope = organization(0);
        let user = User::new(&scope, UserOptions::new().as_root_user(true)).unwrap();
        assert_eq!(user.primary_scope_id, 0);
    }

    #[test]
    fn test_move_to() {
        let mut user = User::new(&organization(5), UserOptions::new().with_owner_id(1)).unwrap();
        user.move_to(&organization(8)).unwrap();
        assert_eq!(user.primary_scope_id, 8);
    }

    #[test]
    fn test_root_user_cannot_move_into_project() {
        let mut root = User::new(&organization(5), UserOptions::new().as_root_user(true)).unwrap();
        let mut project = Scope::new(ScopeKind::Project, ScopeOptions::new().with_owner_id(1)).unwrap();
        project.id = 9;

        let err = root.move_to(&project).unwrap_err();
        assert_eq!(err.code(), "ROOT_USER_REQUIRES_ORGANIZATION");
        assert_eq!(root.primary_scope_id, 5);

        root.move_to(&organization(6)).unwrap();
        assert_eq!(root.primary_scope_id, 6);
    }
}
