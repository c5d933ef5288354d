//! Auth Method Aggregate
//!
//! Authentication methods configured within a scope. Protocol details live
//! elsewhere; this crate only tracks ownership and kind.

pub mod entity;
pub mod repository;

pub use entity::{AuthMethod, AuthMethodKind};
