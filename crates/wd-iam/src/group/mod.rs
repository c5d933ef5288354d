//! Group Aggregate
//!
//! Named sets of users, owned by a user and homed in a scope. Membership is a
//! separate join row.

pub mod entity;
pub mod repository;

pub use entity::{Group, GroupMember, GroupOptions};
