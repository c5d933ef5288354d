//! Scope Aggregate
//!
//! Organization and project boundaries for identities and resources.

pub mod entity;
pub mod repository;

pub use entity::{Scope, ScopeKind, ScopeOptions};
