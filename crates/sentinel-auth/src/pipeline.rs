//! Inbound bearer token validation.
//!
//! ```text
//! token ── decode ── check_kind ── resolve_subject ── ensure_active ── Authenticated
//!            │           │               │                  │
//!   InvalidSignature  WrongTokenType  UnknownSubject   InactiveAccount
//!   OrFormat/Expired
//! ```
//!
//! Each stage is a plain function and the first failure ends the chain. The
//! expected kind and the user store are passed to every call, so one
//! [`TokenValidator`] serves both access-protected and refresh routes.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::claims::{ClaimsSet, TokenKind};
use crate::codec::ClaimsCodec;
use crate::error::AuthError;
use crate::identity::{Identity, UserStore};

/// A token that passed every stage, with the account it resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct Authenticated {
    pub identity: Identity,
    pub claims: ClaimsSet,
}

#[derive(Debug, Clone)]
pub struct TokenValidator {
    codec: Arc<ClaimsCodec>,
}

impl TokenValidator {
    pub fn new(codec: Arc<ClaimsCodec>) -> Self {
        Self { codec }
    }

    pub async fn validate<S>(
        &self,
        users: &S,
        token: &str,
        expected: TokenKind,
    ) -> Result<Authenticated, AuthError>
    where
        S: UserStore + ?Sized,
    {
        let claims = decode(&self.codec, token)?;
        check_kind(&claims, expected)?;
        let identity = resolve_subject(users, &claims).await?;
        let identity = ensure_active(identity)?;

        Ok(Authenticated { identity, claims })
    }
}

fn decode(codec: &ClaimsCodec, token: &str) -> Result<ClaimsSet, AuthError> {
    codec.decode(token)
}

fn check_kind(claims: &ClaimsSet, expected: TokenKind) -> Result<(), AuthError> {
    let actual = claims.kind();
    if actual == Some(expected) {
        return Ok(());
    }
    warn!(
        expected = %expected,
        actual = claims.token_type().unwrap_or("<none>"),
        "token presented for the wrong purpose"
    );
    Err(AuthError::WrongTokenType { expected, actual })
}

async fn resolve_subject<S>(users: &S, claims: &ClaimsSet) -> Result<Identity, AuthError>
where
    S: UserStore + ?Sized,
{
    let Some(id) = claims.subject_id() else {
        debug!("token subject missing or not an integer");
        return Err(AuthError::InvalidSignatureOrFormat);
    };

    users.find_by_id(id).await?.ok_or_else(|| {
        debug!(user_id = id, "token subject not found");
        AuthError::UnknownSubject
    })
}

fn ensure_active(identity: Identity) -> Result<Identity, AuthError> {
    if identity.active {
        Ok(identity)
    } else {
        debug!(user_id = identity.id, "token subject is inactive");
        Err(AuthError::InactiveAccount)
    }
}
