use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Custom: {0}")]
    Custom(String),
}

impl RepositoryError {
    /// Classifies constraint violations reported by Postgres so callers can
    /// map them without matching on raw sqlx errors.
    pub fn from_sqlx(err: SqlxError) -> Self {
        if let SqlxError::Database(db_err) = &err {
            if db_err.is_foreign_key_violation() {
                return Self::ForeignKey(db_err.message().to_string());
            }
            if db_err.is_unique_violation() || db_err.is_check_violation() {
                return Self::Conflict(db_err.message().to_string());
            }
        }
        if matches!(err, SqlxError::RowNotFound) {
            return Self::NotFound;
        }
        Self::Sqlx(err)
    }
}
