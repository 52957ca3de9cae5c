use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] SqlxError),

    #[error("Product with id {0} already exists")]
    DuplicateId(i32),

    #[error("Custom: {0}")]
    Custom(String),
}
