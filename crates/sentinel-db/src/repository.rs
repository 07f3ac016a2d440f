use async_trait::async_trait;
use sentinel_auth::{Identity, UserStore};

use crate::error::DbError;

/// A user about to be created. The password is already hashed.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub active: bool,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

/// Full user account storage: the lookups the token layer needs plus writes.
#[async_trait]
pub trait UserRepository: UserStore {
    /// Fails with [`DbError::UsernameTaken`] when the username exists.
    async fn create_user(&self, user: NewUser) -> Result<Identity, DbError>;

    /// Returns `false` when no user has this id.
    async fn set_active(&self, id: i64, active: bool) -> Result<bool, DbError>;

    /// Returns `false` when no user has this id.
    async fn delete_user(&self, id: i64) -> Result<bool, DbError>;
}
