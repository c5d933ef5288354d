//! User Alias Aggregate
//!
//! Maps an external identity, as seen by one auth method, onto a user.

pub mod entity;
pub mod repository;

pub use entity::UserAlias;
