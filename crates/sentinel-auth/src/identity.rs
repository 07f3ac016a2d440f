//! Principals and the capabilities used to look them up and check passwords.
//!
//! The crate never owns user data. [`UserStore`] and [`PasswordHasher`] are the
//! seams where a database and a hashing primitive are plugged in.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// An authenticated principal as seen by the token layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub active: bool,
}

/// A user record together with its stored password hash.
///
/// Only the credential gate ever sees the hash.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub identity: Identity,
    pub password_hash: String,
}

impl std::fmt::Debug for StoredUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredUser")
            .field("identity", &self.identity)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Read access to user accounts.
///
/// Implementations report backend failures as [`AuthError::Store`]; a missing
/// user is `Ok(None)`, never an error.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, AuthError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>, AuthError>;
}

/// Password hashing primitive.
///
/// `verify` returns `Ok(false)` for a wrong password. An `Err` means the stored
/// hash itself could not be used.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}
