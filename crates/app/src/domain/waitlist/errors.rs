//! Waitlist service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WaitlistServiceError {
    #[error("email already registered")]
    AlreadyExists,

    #[error("invalid email format")]
    InvalidEmail,

    #[error("consent must be explicitly given")]
    ConsentRequired,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("storage error")]
    Sql(#[source] Error),
}

/// Database-level constraint violations become domain errors here. The
/// unique index on `email_hash` surfaces as `AlreadyExists`, which is what
/// settles two racing inserts for the same address: exactly one of them
/// trips the constraint regardless of what the advisory duplicate read saw.
impl From<Error> for WaitlistServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            _ => Self::Sql(error),
        }
    }
}
