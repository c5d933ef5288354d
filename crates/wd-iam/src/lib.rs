//! Warden IAM Core
//!
//! Identity resources and the ownership graph between them:
//! - Scope: Organization (ownerless) or Project (owned by a user)
//! - User: homed in a primary scope; either the scope's root or owned by another user
//! - Group / GroupMember: user sets and their membership join
//! - AuthMethod: an authentication method configured in a scope
//! - UserAlias: an external identity under an auth method, mapped to a user
//!
//! Entities are built in memory with validated constructors and persisted
//! through a [`Writer`]. Relationships are resolved one hop at a time through
//! a [`Reader`]. Referential integrity is enforced by the store.

pub mod alias;
pub mod auth_method;
pub mod bootstrap;
pub mod group;
pub mod resolver;
pub mod scope;
pub mod shared;
pub mod store;
pub mod user;

pub use shared::error::{IamError, Result};

pub use store::{Reader, Resource, Store, UnitOfWork, Value, Writer};

pub use resolver::{Owned, Scoped};

pub use alias::UserAlias;
pub use auth_method::{AuthMethod, AuthMethodKind};
pub use group::{Group, GroupMember, GroupOptions};
pub use scope::{Scope, ScopeKind, ScopeOptions};
pub use user::{User, UserOptions};

pub use bootstrap::{
    bootstrap_organization, BootstrapOrganizationCommand, BootstrapOrganizationUseCase,
    BootstrappedOrganization,
};
