use thiserror::Error;

/// Errors raised by the data-access layer
#[derive(Debug, Error)]
pub enum RepoError {
    /// A partial update was requested with no fields to change
    #[error("No data")]
    EmptyInput,

    /// No job exists with the given id
    #[error("No job: {0}")]
    NotFound(i32),

    /// Storage rejected a row because it points at a missing record
    #[error("Invalid reference: {0}")]
    Reference(#[source] sqlx::Error),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        let is_fk_violation = matches!(
            &err,
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation()
        );

        if is_fk_violation {
            RepoError::Reference(err)
        } else {
            RepoError::Database(err)
        }
    }
}
