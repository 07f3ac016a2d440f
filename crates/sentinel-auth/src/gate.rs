use tracing::{info, warn};

use crate::error::AuthError;
use crate::identity::{Identity, PasswordHasher, UserStore};

/// Entry point to token issuance: checks a username/password pair.
pub struct CredentialGate;

impl CredentialGate {
    /// Verifies credentials and account liveness, in that order.
    ///
    /// An unknown username and a wrong password both fail with
    /// [`AuthError::InvalidCredentials`]. Only once the password matches is
    /// the active flag consulted, so a disabled account with the right
    /// password gets [`AuthError::InactiveAccount`].
    #[tracing::instrument(skip_all, fields(username = %username))]
    pub async fn authenticate<S, H>(
        users: &S,
        hasher: &H,
        username: &str,
        password: &str,
    ) -> Result<Identity, AuthError>
    where
        S: UserStore + ?Sized,
        H: PasswordHasher + ?Sized,
    {
        let Some(stored) = users.find_by_username(username).await? else {
            warn!("login rejected: unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        if !hasher.verify(password, &stored.password_hash)? {
            warn!(user_id = stored.identity.id, "login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        if !stored.identity.active {
            warn!(user_id = stored.identity.id, "login rejected: account inactive");
            return Err(AuthError::InactiveAccount);
        }

        info!(user_id = stored.identity.id, "credentials accepted");
        Ok(stored.identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MapStore, hasher};

    #[tokio::test]
    async fn test_valid_credentials() {
        let store = MapStore::default();
        let alice = store.add(1, "alice", "correct-pw", true);

        let identity = CredentialGate::authenticate(&store, &hasher(), "alice", "correct-pw")
            .await
            .unwrap();
        assert_eq!(identity, alice);
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_are_indistinguishable() {
        let store = MapStore::default();
        store.add(1, "alice", "correct-pw", true);

        let unknown = CredentialGate::authenticate(&store, &hasher(), "mallory", "correct-pw").await;
        let wrong = CredentialGate::authenticate(&store, &hasher(), "alice", "wrong-pw").await;

        assert_eq!(unknown, Err(AuthError::InvalidCredentials));
        assert_eq!(wrong, Err(AuthError::InvalidCredentials));
        assert_eq!(
            unknown.unwrap_err().to_string(),
            wrong.unwrap_err().to_string()
        );
    }

    #[tokio::test]
    async fn test_inactive_with_correct_password() {
        let store = MapStore::default();
        store.add(1, "alice", "correct-pw", false);

        let result = CredentialGate::authenticate(&store, &hasher(), "alice", "correct-pw").await;
        assert_eq!(result, Err(AuthError::InactiveAccount));
    }

    #[tokio::test]
    async fn test_inactive_with_wrong_password_stays_generic() {
        let store = MapStore::default();
        store.add(1, "alice", "correct-pw", false);

        let result = CredentialGate::authenticate(&store, &hasher(), "alice", "nope").await;
        assert_eq!(result, Err(AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = MapStore::failing();

        let result = CredentialGate::authenticate(&store, &hasher(), "alice", "pw").await;
        assert!(matches!(result, Err(AuthError::Store(_))));
    }
}
