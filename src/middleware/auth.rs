use axum::http::{header, request::Parts};
use sentinel_auth::{Authenticated, ClaimsSet, Identity, TokenKind, extract_bearer};

use crate::state::AppState;
use crate::utils::errors::AppError;

/// Runs the validation pipeline on the request's bearer token for `kind`.
pub async fn authenticate_request(
    parts: &Parts,
    state: &AppState,
    kind: TokenKind,
) -> Result<Authenticated, AppError> {
    let header = parts
        .headers
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default());

    let token = extract_bearer(header)?;

    Ok(state
        .validator
        .validate(&*state.users, token, kind)
        .await?)
}

/// Defines an extractor that only accepts tokens of one kind.
///
/// The generated type derefs to [`Authenticated`], so handlers read
/// `user.identity` and `user.claims` directly.
#[macro_export]
macro_rules! require_token_kind {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(pub sentinel_auth::Authenticated);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = $crate::utils::errors::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                $crate::middleware::auth::authenticate_request(parts, state, $kind)
                    .await
                    .map($name)
            }
        }

        impl std::ops::Deref for $name {
            type Target = sentinel_auth::Authenticated;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }
    };
}

require_token_kind!(
    /// Caller holding a valid access token.
    AccessUser,
    sentinel_auth::TokenKind::Access
);

require_token_kind!(
    /// Caller holding a valid refresh token.
    RefreshUser,
    sentinel_auth::TokenKind::Refresh
);

impl AccessUser {
    pub fn identity(&self) -> &Identity {
        &self.0.identity
    }

    pub fn claims(&self) -> &ClaimsSet {
        &self.0.claims
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::FromRequestParts;
    use axum::http::{Request, StatusCode};
    use sentinel_auth::{BcryptHasher, PasswordHasher};
    use sentinel_config::{CorsConfig, JwtConfig, RateLimitConfig};
    use sentinel_db::{InMemoryUserStore, NewUser, UserRepository};

    use super::*;

    async fn state_with_alice() -> (AppState, Identity) {
        let users = Arc::new(InMemoryUserStore::new());
        let hasher = BcryptHasher::new(4);
        let alice = users
            .create_user(NewUser {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password_hash: hasher.hash("correct-pw").unwrap(),
                active: true,
            })
            .await
            .unwrap();

        let state = AppState::new(
            users,
            Arc::new(hasher),
            &JwtConfig::default(),
            CorsConfig {
                allowed_origins: vec![],
            },
            &RateLimitConfig::default(),
        )
        .unwrap();
        (state, alice)
    }

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/users/me");
        if let Some(value) = value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_access_user_accepts_access_token() {
        let (state, alice) = state_with_alice().await;
        let token = state.tokens.create_access_token(&alice).unwrap();
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));

        let user = AccessUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.identity(), &alice);
    }

    #[tokio::test]
    async fn test_refresh_user_rejects_access_token() {
        let (state, alice) = state_with_alice().await;
        let token = state.tokens.create_access_token(&alice).unwrap();
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));

        let err = RefreshUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_missing_and_malformed_headers_differ() {
        let (state, _) = state_with_alice().await;

        let missing = AccessUser::from_request_parts(&mut parts_with_auth(None), &state)
            .await
            .unwrap_err();
        let malformed =
            AccessUser::from_request_parts(&mut parts_with_auth(Some("Token abc")), &state)
                .await
                .unwrap_err();

        assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
        assert_eq!(malformed.status, StatusCode::UNAUTHORIZED);
        assert_ne!(missing.error.to_string(), malformed.error.to_string());
    }
}
