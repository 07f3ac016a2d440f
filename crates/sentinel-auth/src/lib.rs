//! # Sentinel Auth
//!
//! Token lifecycle for the Sentinel API: credential checks, access/refresh
//! token issuance and inbound token validation.
//!
//! This crate provides:
//!
//! - [`codec`]: signing and verification of claim sets ([`ClaimsCodec`])
//! - [`factory`]: access and refresh token construction ([`TokenFactory`])
//! - [`gate`]: username/password verification ([`CredentialGate`])
//! - [`pipeline`]: the ordered token validation chain ([`TokenValidator`])
//! - [`bearer`]: `Authorization` header parsing
//!
//! Storage and password hashing are plugged in through the [`UserStore`] and
//! [`PasswordHasher`] traits; [`BcryptHasher`] is the stock hasher.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sentinel_auth::{
//!     BcryptHasher, ClaimsCodec, CredentialGate, ExpiryPolicy, TokenFactory, TokenKind,
//!     TokenValidator,
//! };
//!
//! let codec = Arc::new(ClaimsCodec::hs256(b"a-long-random-secret"));
//! let factory = TokenFactory::new(codec.clone(), ExpiryPolicy::default());
//! let validator = TokenValidator::new(codec);
//!
//! let identity = CredentialGate::authenticate(&store, &BcryptHasher::default(), "alice", "pw").await?;
//! let pair = factory.issue_pair(&identity)?;
//!
//! let auth = validator.validate(&store, &pair.access_token, TokenKind::Access).await?;
//! assert_eq!(auth.identity.id, identity.id);
//! ```

pub mod bearer;
pub mod claims;
pub mod codec;
pub mod error;
pub mod factory;
pub mod gate;
pub mod identity;
pub mod password;
pub mod pipeline;

#[cfg(test)]
mod testing;

pub use bearer::extract_bearer;
pub use claims::{ClaimsSet, TokenKind};
pub use codec::ClaimsCodec;
pub use error::AuthError;
pub use factory::{ExpiryPolicy, TokenFactory, TokenPair};
pub use gate::CredentialGate;
pub use identity::{Identity, PasswordHasher, StoredUser, UserStore};
pub use password::BcryptHasher;
pub use pipeline::{Authenticated, TokenValidator};
