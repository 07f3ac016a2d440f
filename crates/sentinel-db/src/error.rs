use sentinel_auth::AuthError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("database error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        DbError::Backend(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::Backend(format!("migration failed: {err}"))
    }
}

impl From<DbError> for AuthError {
    fn from(err: DbError) -> Self {
        AuthError::Store(err.to_string())
    }
}
