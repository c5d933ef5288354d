//! User Aggregate
//!
//! Principals homed in a scope and owned by another user, or root.

pub mod entity;
pub mod repository;

pub use entity::{User, UserOptions};
