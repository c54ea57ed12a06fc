//! Repository Module
//!
//! CRUD and transactional operations over the SQLite tables. Repositories are
//! plain async functions taking `&SqlitePool`, or
//! `&mut sqlx::Transaction<'_, sqlx::Sqlite>` when they participate in a
//! multi-statement atomic unit.

pub mod order;
pub mod product;

use thiserror::Error;

/// Best-effort classification of a constraint violation, for diagnostics.
/// The customer-facing message stays generic regardless of the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    ForeignKey,
    Unique,
    NotNull,
    Check,
    Other,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConstraintKind::ForeignKey => "foreign-key",
            ConstraintKind::Unique => "unique",
            ConstraintKind::NotNull => "not-null",
            ConstraintKind::Check => "check",
            ConstraintKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Constraint violation ({0}): {1}")]
    Constraint(ConstraintKind, String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let kind = match db_err.kind() {
                sqlx::error::ErrorKind::ForeignKeyViolation => ConstraintKind::ForeignKey,
                sqlx::error::ErrorKind::UniqueViolation => ConstraintKind::Unique,
                sqlx::error::ErrorKind::NotNullViolation => ConstraintKind::NotNull,
                sqlx::error::ErrorKind::CheckViolation => ConstraintKind::Check,
                _ => ConstraintKind::Other,
            };
            if kind != ConstraintKind::Other {
                return RepoError::Constraint(kind, db_err.message().to_string());
            }
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for crate::utils::AppError {
    fn from(err: RepoError) -> Self {
        use crate::utils::AppError;
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Conflict(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Constraint(kind, msg) => {
                AppError::Database(format!("constraint violation ({kind}): {msg}"))
            }
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}
