//! User Alias Entity
//!
//! `external_id` is opaque: the identifier an auth method reports for the
//! user (a login name, an OIDC subject). It is unique per auth method.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth_method::entity::AuthMethod;
use crate::resolver::{Owned, Scoped};
use crate::scope::entity::Scope;
use crate::shared::error::{require_persisted, IamError, Result};
use crate::shared::public_id;
use crate::user::entity::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAlias {
    /// Storage id, 0 until persisted
    pub id: u32,
    pub public_id: String,
    pub primary_scope_id: u32,
    /// The user this alias represents
    pub owner_id: u32,
    /// Auth method that reports `external_id`; fixed at creation
    pub auth_method_id: u32,
    /// Identifier the auth method reports for the user. Opaque and never blank
    pub external_id: String,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

impl UserAlias {
    pub fn new(
        scope: &Scope,
        user: &User,
        auth_method: &AuthMethod,
        external_id: impl Into<String>,
    ) -> Result<Self> {
        require_persisted("scope", scope.id)?;
        require_persisted("user", user.id)?;
        require_persisted("auth method", auth_method.id)?;

        let external_id = external_id.into();
        if external_id.trim().is_empty() {
            return Err(IamError::validation(
                "EXTERNAL_ID_REQUIRED",
                "alias external id must not be blank",
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id: 0,
            public_id: public_id::generate(public_id::USER_ALIAS_PREFIX),
            primary_scope_id: scope.id,
            owner_id: user.id,
            auth_method_id: auth_method.id,
            external_id,
            create_time: now,
            update_time: now,
        })
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

impl Owned for UserAlias {
    fn owner_id(&self) -> u32 {
        self.owner_id
    }
}

impl Scoped for UserAlias {
    fn primary_scope_id(&self) -> u32 {
        self.primary_scope_id
    }
}
