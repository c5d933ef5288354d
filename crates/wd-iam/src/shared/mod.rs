//! Shared infrastructure for the IAM aggregates.

pub mod error;
pub mod public_id;
