//! Signing and verification of claim sets.
//!
//! [`ClaimsCodec`] is the only place signatures and expiry are checked. It
//! knows nothing about users or token kinds: it signs whatever map it is
//! given, stamping `iat` and `exp`, and hands the map back unchanged on a
//! successful decode.
//!
//! # Example
//!
//! ```ignore
//! use chrono::Duration;
//! use sentinel_auth::{ClaimsCodec, ClaimsSet};
//!
//! let codec = ClaimsCodec::hs256(b"a-long-random-secret");
//! let token = codec.encode(&ClaimsSet::new().with("sub", "1"), Duration::minutes(5))?;
//! let claims = codec.decode(&token)?;
//! assert_eq!(claims.get_str("sub"), Some("1"));
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use sentinel_config::JwtConfig;
use sentinel_config::jwt::canonical_algorithm;

use crate::claims::{ClaimsSet, EXPIRES_AT_FIELD, ISSUED_AT_FIELD};
use crate::error::AuthError;

#[derive(Clone)]
pub struct ClaimsCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    leeway_seconds: u64,
}

impl ClaimsCodec {
    pub fn new(algorithm: Algorithm, encoding_key: EncodingKey, decoding_key: DecodingKey) -> Self {
        Self {
            algorithm,
            encoding_key,
            decoding_key,
            leeway_seconds: 0,
        }
    }

    /// HS256 codec over a shared secret.
    pub fn hs256(secret: &[u8]) -> Self {
        Self::new(
            Algorithm::HS256,
            EncodingKey::from_secret(secret),
            DecodingKey::from_secret(secret),
        )
    }

    /// Tolerated clock skew when checking `exp`.
    pub fn with_leeway(mut self, leeway_seconds: u64) -> Self {
        self.leeway_seconds = leeway_seconds;
        self
    }

    /// Builds the process-wide codec from configuration.
    ///
    /// HMAC algorithms use `secret`. RSA, RSA-PSS, ECDSA and EdDSA read PEM
    /// files from `private_key_path` (signing) and `public_key_path`
    /// (verification).
    pub fn from_config(config: &JwtConfig) -> Result<Self, AuthError> {
        let name = canonical_algorithm(&config.algorithm);
        let algorithm = Algorithm::from_str(&name)
            .map_err(|_| AuthError::Encoding(format!("unsupported algorithm '{name}'")))?;

        let codec = match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
                if config.secret.is_empty() {
                    return Err(AuthError::Encoding(
                        "an HMAC algorithm requires a non-empty secret".to_string(),
                    ));
                }
                Self::new(
                    algorithm,
                    EncodingKey::from_secret(config.secret.as_bytes()),
                    DecodingKey::from_secret(config.secret.as_bytes()),
                )
            }
            _ => {
                let private_pem = read_pem(config.private_key_path.as_deref(), "private")?;
                let public_pem = read_pem(config.public_key_path.as_deref(), "public")?;
                let (encoding_key, decoding_key) = asymmetric_keys(algorithm, &private_pem, &public_pem)
                    .map_err(|e| AuthError::Encoding(format!("invalid key material: {e}")))?;
                Self::new(algorithm, encoding_key, decoding_key)
            }
        };

        Ok(codec.with_leeway(config.leeway_seconds))
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Signs `claims` with a lifetime starting now.
    pub fn encode(&self, claims: &ClaimsSet, lifetime: Duration) -> Result<String, AuthError> {
        self.encode_at(claims, lifetime, Utc::now())
    }

    /// Signs `claims` as if issued at `issued_at`.
    ///
    /// Any `iat`/`exp` already present in `claims` is replaced. The lifetime
    /// must be positive.
    pub fn encode_at(
        &self,
        claims: &ClaimsSet,
        lifetime: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        if lifetime <= Duration::zero() {
            return Err(AuthError::Encoding(
                "token lifetime must be positive".to_string(),
            ));
        }
        let expires_at = issued_at
            .checked_add_signed(lifetime)
            .ok_or_else(|| AuthError::Encoding("token expiry out of range".to_string()))?;

        let mut payload = claims.clone();
        payload.insert(ISSUED_AT_FIELD, issued_at.timestamp());
        payload.insert(EXPIRES_AT_FIELD, expires_at.timestamp());

        encode(&Header::new(self.algorithm), &payload, &self.encoding_key)
            .map_err(|e| AuthError::Encoding(e.to_string()))
    }

    /// Verifies signature, algorithm and expiry, returning the full claim map.
    pub fn decode(&self, token: &str) -> Result<ClaimsSet, AuthError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = self.leeway_seconds;

        decode::<ClaimsSet>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                kind => {
                    debug!(reason = ?kind, "token rejected by codec");
                    AuthError::InvalidSignatureOrFormat
                }
            })
    }
}

impl fmt::Debug for ClaimsCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimsCodec")
            .field("algorithm", &self.algorithm)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish_non_exhaustive()
    }
}

fn read_pem(path: Option<&Path>, which: &str) -> Result<Vec<u8>, AuthError> {
    let path = path.ok_or_else(|| {
        AuthError::Encoding(format!("asymmetric algorithm requires a {which} key path"))
    })?;
    std::fs::read(path).map_err(|e| {
        AuthError::Encoding(format!("failed to read {which} key {}: {e}", path.display()))
    })
}

fn asymmetric_keys(
    algorithm: Algorithm,
    private_pem: &[u8],
    public_pem: &[u8],
) -> jsonwebtoken::errors::Result<(EncodingKey, DecodingKey)> {
    match algorithm {
        Algorithm::ES256 | Algorithm::ES384 => Ok((
            EncodingKey::from_ec_pem(private_pem)?,
            DecodingKey::from_ec_pem(public_pem)?,
        )),
        Algorithm::EdDSA => Ok((
            EncodingKey::from_ed_pem(private_pem)?,
            DecodingKey::from_ed_pem(public_pem)?,
        )),
        _ => Ok((
            EncodingKey::from_rsa_pem(private_pem)?,
            DecodingKey::from_rsa_pem(public_pem)?,
        )),
    }
}
