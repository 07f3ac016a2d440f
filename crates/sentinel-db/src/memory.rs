use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use sentinel_auth::{AuthError, Identity, StoredUser, UserStore};
use tracing::debug;

use crate::error::DbError;
use crate::repository::{NewUser, UserRepository};

#[derive(Default)]
struct Inner {
    last_id: i64,
    users: BTreeMap<i64, StoredUser>,
}

/// Process-local user store.
///
/// Ids are assigned sequentially from 1 and never reused. Contents are lost
/// when the process exits.
#[derive(Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().users.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, AuthError> {
        Ok(self
            .inner
            .read()
            .users
            .values()
            .find(|u| u.identity.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>, AuthError> {
        Ok(self
            .inner
            .read()
            .users
            .get(&id)
            .map(|u| u.identity.clone()))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create_user(&self, user: NewUser) -> Result<Identity, DbError> {
        let mut inner = self.inner.write();

        if inner
            .users
            .values()
            .any(|u| u.identity.username == user.username)
        {
            return Err(DbError::UsernameTaken(user.username));
        }

        inner.last_id += 1;
        let identity = Identity {
            id: inner.last_id,
            username: user.username,
            email: user.email,
            active: user.active,
        };
        inner.users.insert(
            identity.id,
            StoredUser {
                identity: identity.clone(),
                password_hash: user.password_hash,
            },
        );

        debug!(user_id = identity.id, "user created in memory");
        Ok(identity)
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<bool, DbError> {
        Ok(match self.inner.write().users.get_mut(&id) {
            Some(user) => {
                user.identity.active = active;
                true
            }
            None => false,
        })
    }

    async fn delete_user(&self, id: i64) -> Result<bool, DbError> {
        Ok(self.inner.write().users.remove(&id).is_some())
    }
}
