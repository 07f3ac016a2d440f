use async_trait::async_trait;
use sentinel_auth::{AuthError, Identity, StoredUser, UserStore};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, instrument};

use crate::error::DbError;
use crate::repository::{NewUser, UserRepository};

/// Connects a PostgreSQL pool.
pub async fn init_pool(database_url: &str) -> Result<PgPool, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    info!("database pool connected");
    Ok(pool)
}

/// Applies the embedded migrations in `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("database migrations applied");
    Ok(())
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    active: bool,
}

impl UserRow {
    fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            active: self.active,
        }
    }
}

impl From<UserRow> for StoredUser {
    fn from(row: UserRow) -> Self {
        StoredUser {
            identity: row.identity(),
            password_hash: row.password_hash,
        }
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn store_error(err: sqlx::Error) -> AuthError {
    AuthError::Store(err.to_string())
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email, password_hash, active FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.map(StoredUser::from))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email, password_hash, active FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.as_ref().map(UserRow::identity))
    }
}

#[async_trait]
impl UserRepository for PgUserStore {
    #[instrument(skip(self))]
    async fn create_user(&self, user: NewUser) -> Result<Identity, DbError> {
        let result = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (username, email, password_hash, active)
             VALUES ($1, $2, $3, $4)
             RETURNING id, username, email, password_hash, active",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.active)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.identity()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DbError::UsernameTaken(user.username))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn set_active(&self, id: i64, active: bool) -> Result<bool, DbError> {
        let result = sqlx::query("UPDATE users SET active = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
