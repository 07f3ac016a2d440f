//! In-crate fixtures shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AuthError;
use crate::identity::{Identity, PasswordHasher, StoredUser, UserStore};
use crate::password::BcryptHasher;

pub(crate) const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-characters-long";

pub(crate) fn hasher() -> BcryptHasher {
    BcryptHasher::new(4)
}

#[derive(Default)]
pub(crate) struct MapStore {
    users: Mutex<HashMap<i64, StoredUser>>,
    fail: bool,
}

impl MapStore {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn add(&self, id: i64, username: &str, password: &str, active: bool) -> Identity {
        let identity = Identity {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            active,
        };
        let stored = StoredUser {
            identity: identity.clone(),
            password_hash: hasher().hash(password).unwrap(),
        };
        self.users.lock().unwrap().insert(id, stored);
        identity
    }

    pub(crate) fn set_active(&self, id: i64, active: bool) {
        if let Some(user) = self.users.lock().unwrap().get_mut(&id) {
            user.identity.active = active;
        }
    }

    pub(crate) fn remove(&self, id: i64) {
        self.users.lock().unwrap().remove(&id);
    }

    fn check(&self) -> Result<(), AuthError> {
        if self.fail {
            return Err(AuthError::Store("store offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MapStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, AuthError> {
        self.check()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.identity.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>, AuthError> {
        self.check()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(&id)
            .map(|u| u.identity.clone()))
    }
}
