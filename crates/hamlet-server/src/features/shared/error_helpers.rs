//! Database error handling utilities
//!
//! Classifies `sqlx` errors by the constraint they violated so the central
//! error handler can pick a status code.

use sqlx::Error as SqlxError;

/// Result of checking for a database constraint violation
#[derive(Debug)]
pub enum ConstraintViolation {
    /// A unique constraint was violated
    UniqueViolation,
    /// A foreign key constraint was violated
    ForeignKeyViolation,
    /// No constraint violation - some other error occurred
    Other(SqlxError),
}

/// Check the type of database constraint violation
pub fn check_constraint_violation(error: SqlxError) -> ConstraintViolation {
    if let SqlxError::Database(ref db_err) = error {
        if db_err.is_unique_violation() {
            return ConstraintViolation::UniqueViolation;
        }
        if db_err.is_foreign_key_violation() {
            return ConstraintViolation::ForeignKeyViolation;
        }
    }
    ConstraintViolation::Other(error)
}
