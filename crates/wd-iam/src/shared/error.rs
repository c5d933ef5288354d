//! IAM Error Types
//!
//! Three failure categories reach callers:
//! - `Validation` - contradictory or incomplete construction input, raised before any I/O
//! - `Constraint` - the store rejected a write (missing reference, duplicate, check)
//! - `NotFound` - a single-hop lookup found no row
//!
//! Any other storage failure is surfaced as `Database`.

use sqlx::error::{DatabaseError, ErrorKind};
use thiserror::Error;

/// Primary SQLite result code for constraint failures; extended codes keep it in the low byte.
const SQLITE_CONSTRAINT: i32 = 19;

#[derive(Error, Debug)]
pub enum IamError {
    #[error("Validation error: [{code}] {message}")]
    Validation { code: &'static str, message: String },

    #[error("Constraint violation: {message}")]
    Constraint { message: String },

    #[error("Not found: {resource} with id {id}")]
    NotFound { resource: &'static str, id: u32 },

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, IamError>;

impl IamError {
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str, id: u32) -> Self {
        Self::NotFound { resource, id }
    }

    /// Stable error code for callers that map errors onto a transport.
    pub fn code(&self) -> &str {
        match self {
            Self::Validation { code, .. } => code,
            Self::Constraint { .. } => "CONSTRAINT_VIOLATION",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_constraint(&self) -> bool {
        matches!(self, Self::Constraint { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Reject references to entities that have not been written yet.
pub(crate) fn require_persisted(reference: &str, id: u32) -> Result<()> {
    if id == 0 {
        return Err(IamError::validation(
            "UNPERSISTED_REFERENCE",
            format!("{} must be persisted before it can be referenced", reference),
        ));
    }
    Ok(())
}

impl From<sqlx::Error> for IamError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if is_constraint_violation(db_err.as_ref()) {
                return Self::Constraint {
                    message: db_err.message().to_string(),
                };
            }
        }
        Self::Database(err)
    }
}

fn is_constraint_violation(err: &dyn DatabaseError) -> bool {
    match err.kind() {
        ErrorKind::UniqueViolation
        | ErrorKind::ForeignKeyViolation
        | ErrorKind::NotNullViolation
        | ErrorKind::CheckViolation => true,
        _ => err
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .is_some_and(|code| code & 0xff == SQLITE_CONSTRAINT),
    }
}
