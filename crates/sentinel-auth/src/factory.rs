//! Access and refresh token construction.
//!
//! Access tokens are short-lived and carry display fields (`username`,
//! `email`) so consumers can render the caller without a store lookup; those
//! fields are a snapshot taken at issuance. Refresh tokens live much longer and
//! carry only `type` and `sub`, since their single job is minting a new access
//! token.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::debug;

use sentinel_config::JwtConfig;

use crate::claims::{ClaimsSet, EMAIL_FIELD, SUBJECT_FIELD, TokenKind, USERNAME_FIELD};
use crate::codec::ClaimsCodec;
use crate::error::AuthError;
use crate::identity::Identity;

/// Lifetimes per token kind, fixed when the factory is built.
///
/// Both lifetimes are positive and small enough that `now + lifetime` is a
/// representable timestamp; the constructors reject anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    access: Duration,
    refresh: Duration,
}

impl ExpiryPolicy {
    pub fn new(access_minutes: i64, refresh_days: i64) -> Result<Self, AuthError> {
        Ok(Self {
            access: checked_lifetime(
                Duration::try_minutes(access_minutes),
                "access",
                format!("{access_minutes} minutes"),
            )?,
            refresh: checked_lifetime(
                Duration::try_days(refresh_days),
                "refresh",
                format!("{refresh_days} days"),
            )?,
        })
    }

    pub fn from_config(config: &JwtConfig) -> Result<Self, AuthError> {
        Self::new(
            config.access_token_expire_minutes,
            config.refresh_token_expire_days,
        )
    }

    pub fn lifetime(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access,
            TokenKind::Refresh => self.refresh,
        }
    }
}

fn checked_lifetime(
    lifetime: Option<Duration>,
    kind: &str,
    raw: String,
) -> Result<Duration, AuthError> {
    lifetime
        .filter(|d| *d > Duration::zero())
        .filter(|d| Utc::now().checked_add_signed(*d).is_some())
        .ok_or_else(|| AuthError::Encoding(format!("invalid {kind} token lifetime: {raw}")))
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            access: Duration::minutes(15),
            refresh: Duration::days(30),
        }
    }
}

/// Tokens handed out by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

#[derive(Debug, Clone)]
pub struct TokenFactory {
    codec: Arc<ClaimsCodec>,
    policy: ExpiryPolicy,
}

impl TokenFactory {
    pub fn new(codec: Arc<ClaimsCodec>, policy: ExpiryPolicy) -> Self {
        Self { codec, policy }
    }

    pub fn policy(&self) -> ExpiryPolicy {
        self.policy
    }

    /// Claim set for an access token: kind, subject and display fields.
    pub fn access_claims(identity: &Identity) -> ClaimsSet {
        ClaimsSet::for_kind(TokenKind::Access)
            .with(SUBJECT_FIELD, identity.id.to_string())
            .with(USERNAME_FIELD, identity.username.as_str())
            .with(EMAIL_FIELD, identity.email.as_str())
    }

    /// Claim set for a refresh token: kind and subject only.
    pub fn refresh_claims(identity: &Identity) -> ClaimsSet {
        ClaimsSet::for_kind(TokenKind::Refresh).with(SUBJECT_FIELD, identity.id.to_string())
    }

    pub fn create_access_token(&self, identity: &Identity) -> Result<String, AuthError> {
        self.create_token(TokenKind::Access, identity)
    }

    pub fn create_refresh_token(&self, identity: &Identity) -> Result<String, AuthError> {
        self.create_token(TokenKind::Refresh, identity)
    }

    pub fn create_token(&self, kind: TokenKind, identity: &Identity) -> Result<String, AuthError> {
        debug!(user_id = identity.id, kind = %kind, "issuing token");
        let claims = match kind {
            TokenKind::Access => Self::access_claims(identity),
            TokenKind::Refresh => Self::refresh_claims(identity),
        };
        self.codec.encode(&claims, self.policy.lifetime(kind))
    }

    pub fn issue_pair(&self, identity: &Identity) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: self.create_access_token(identity)?,
            refresh_token: self.create_refresh_token(identity)?,
            token_type: "Bearer",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::{EXPIRES_AT_FIELD, ISSUED_AT_FIELD, TOKEN_TYPE_FIELD};

    fn alice() -> Identity {
        Identity {
            id: 7,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            active: true,
        }
    }

    fn codec() -> Arc<ClaimsCodec> {
        Arc::new(ClaimsCodec::hs256(b"test-secret-key-at-least-32-characters-long"))
    }

    fn factory() -> TokenFactory {
        TokenFactory::new(codec(), ExpiryPolicy::new(15, 30).unwrap())
    }

    #[test]
    fn test_access_token_claims() {
        let token = factory().create_access_token(&alice()).unwrap();
        let claims = codec().decode(&token).unwrap();

        assert_eq!(claims.kind(), Some(TokenKind::Access));
        assert_eq!(claims.subject_id(), Some(7));
        assert_eq!(claims.get_str(USERNAME_FIELD), Some("alice"));
        assert_eq!(claims.get_str(EMAIL_FIELD), Some("alice@example.com"));
        assert_eq!(
            claims.expires_at().unwrap() - claims.issued_at().unwrap(),
            15 * 60
        );
    }

    #[test]
    fn test_refresh_token_is_minimal() {
        let token = factory().create_refresh_token(&alice()).unwrap();
        let claims = codec().decode(&token).unwrap();

        let mut names: Vec<&str> = claims.as_map().keys().map(String::as_str).collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![EXPIRES_AT_FIELD, ISSUED_AT_FIELD, SUBJECT_FIELD, TOKEN_TYPE_FIELD]
        );
        assert_eq!(claims.kind(), Some(TokenKind::Refresh));
        assert_eq!(
            claims.expires_at().unwrap() - claims.issued_at().unwrap(),
            30 * 24 * 60 * 60
        );
    }

    #[test]
    fn test_subject_is_string_encoded() {
        let claims = TokenFactory::refresh_claims(&alice());
        assert_eq!(claims.get_str(SUBJECT_FIELD), Some("7"));
    }

    #[test]
    fn test_refresh_outlives_access() {
        let pair = factory().issue_pair(&alice()).unwrap();
        let access = codec().decode(&pair.access_token).unwrap();
        let refresh = codec().decode(&pair.refresh_token).unwrap();

        assert!(refresh.expires_at() > access.expires_at());
        assert_eq!(pair.token_type, "Bearer");
    }

    #[test]
    fn test_policy_from_config() {
        let config = JwtConfig {
            access_token_expire_minutes: 5,
            refresh_token_expire_days: 2,
            ..JwtConfig::default()
        };
        let policy = ExpiryPolicy::from_config(&config).unwrap();
        assert_eq!(policy.lifetime(TokenKind::Access), Duration::minutes(5));
        assert_eq!(policy.lifetime(TokenKind::Refresh), Duration::days(2));
    }

    #[test]
    fn test_policy_rejects_non_positive_lifetimes() {
        for (minutes, days) in [(0, 30), (-5, 30), (15, 0), (15, -1)] {
            assert!(
                matches!(ExpiryPolicy::new(minutes, days), Err(AuthError::Encoding(_))),
                "{minutes} minutes / {days} days"
            );
        }
    }

    #[test]
    fn test_policy_rejects_out_of_range_lifetimes() {
        let config = JwtConfig {
            refresh_token_expire_days: i64::MAX / 1000,
            ..JwtConfig::default()
        };
        assert!(matches!(
            ExpiryPolicy::from_config(&config),
            Err(AuthError::Encoding(_))
        ));

        // Fits in a Duration but not on top of the current time.
        assert!(matches!(
            ExpiryPolicy::new(i64::MAX / 60_000, 30),
            Err(AuthError::Encoding(_))
        ));
        assert!(matches!(
            ExpiryPolicy::new(15, 1_000_000_000),
            Err(AuthError::Encoding(_))
        ));
    }

    #[test]
    fn test_default_policy() {
        assert_eq!(ExpiryPolicy::default(), ExpiryPolicy::new(15, 30).unwrap());
    }

    #[test]
    fn test_create_token_by_kind() {
        let token = factory().create_token(TokenKind::Refresh, &alice()).unwrap();
        let claims = codec().decode(&token).unwrap();
        assert_eq!(claims.kind(), Some(TokenKind::Refresh));
    }
}
