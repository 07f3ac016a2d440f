//! Token signing configuration.
//!
//! # Environment Variables
//!
//! - `JWT_ALGORITHM`: signing algorithm name, case-insensitive (default `HS256`)
//! - `JWT_SECRET`: shared secret for the HMAC family
//! - `JWT_PRIVATE_KEY_PATH` / `JWT_PUBLIC_KEY_PATH`: PEM files for RSA, ECDSA and EdDSA
//! - `JWT_ACCESS_EXPIRE_MINUTES`: access token lifetime (default 15)
//! - `JWT_REFRESH_EXPIRE_DAYS`: refresh token lifetime (default 30)
//! - `JWT_LEEWAY_SECONDS`: clock skew tolerated when checking expiry (default 0)

use std::fmt;
use std::path::PathBuf;

use crate::{env_opt, env_or};

/// Algorithm names in the spelling `jsonwebtoken` parses.
const ALGORITHMS: [&str; 12] = [
    "HS256", "HS384", "HS512", "RS256", "RS384", "RS512", "PS256", "PS384", "PS512", "ES256",
    "ES384", "EdDSA",
];

/// Maps `name` onto its canonical spelling, ignoring case (`eddsa` becomes
/// `EdDSA`). Unknown names come back trimmed but otherwise untouched.
pub fn canonical_algorithm(name: &str) -> String {
    let name = name.trim();
    ALGORITHMS
        .iter()
        .find(|known| known.eq_ignore_ascii_case(name))
        .map_or_else(|| name.to_string(), |known| known.to_string())
}

/// Secret used when `JWT_SECRET` is not set. Only suitable for local development.
pub const DEFAULT_JWT_SECRET: &str = "sentinel-development-secret-change-me";

#[derive(Clone, PartialEq, Eq)]
pub struct JwtConfig {
    pub algorithm: String,
    pub secret: String,
    pub private_key_path: Option<PathBuf>,
    pub public_key_path: Option<PathBuf>,
    pub access_token_expire_minutes: i64,
    pub refresh_token_expire_days: i64,
    pub leeway_seconds: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            algorithm: "HS256".to_string(),
            secret: DEFAULT_JWT_SECRET.to_string(),
            private_key_path: None,
            public_key_path: None,
            access_token_expire_minutes: 15,
            refresh_token_expire_days: 30,
            leeway_seconds: 0,
        }
    }
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            algorithm: env_opt("JWT_ALGORITHM")
                .map(|a| canonical_algorithm(&a))
                .unwrap_or(defaults.algorithm),
            secret: env_opt("JWT_SECRET").unwrap_or(defaults.secret),
            private_key_path: env_opt("JWT_PRIVATE_KEY_PATH").map(PathBuf::from),
            public_key_path: env_opt("JWT_PUBLIC_KEY_PATH").map(PathBuf::from),
            access_token_expire_minutes: env_or(
                "JWT_ACCESS_EXPIRE_MINUTES",
                defaults.access_token_expire_minutes,
            ),
            refresh_token_expire_days: env_or(
                "JWT_REFRESH_EXPIRE_DAYS",
                defaults.refresh_token_expire_days,
            ),
            leeway_seconds: env_or("JWT_LEEWAY_SECONDS", defaults.leeway_seconds),
        }
    }

    /// True when the HMAC family is selected, i.e. `secret` is the key material.
    pub fn uses_shared_secret(&self) -> bool {
        self.algorithm.starts_with("HS")
    }

    /// True when an HMAC algorithm is configured with the built-in development secret.
    pub fn is_default_secret(&self) -> bool {
        self.uses_shared_secret() && self.secret == DEFAULT_JWT_SECRET
    }
}

// Key material stays out of logs.
impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("algorithm", &self.algorithm)
            .field("secret", &"<redacted>")
            .field("private_key_path", &self.private_key_path)
            .field("public_key_path", &self.public_key_path)
            .field(
                "access_token_expire_minutes",
                &self.access_token_expire_minutes,
            )
            .field("refresh_token_expire_days", &self.refresh_token_expire_days)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}
