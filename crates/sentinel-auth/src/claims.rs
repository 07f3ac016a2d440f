//! Claim payloads carried inside signed tokens.
//!
//! - [`ClaimsSet`]: the raw claim map the codec signs and verifies
//! - [`TokenKind`]: the closed set of token purposes, stored under the `type` claim
//!
//! Wire shape of the tokens this crate issues:
//!
//! ```text
//! access:  {"type":"access","sub":"42","username":"alice","email":"alice@example.com","iat":..,"exp":..}
//! refresh: {"type":"refresh","sub":"42","iat":..,"exp":..}
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claim holding the token kind.
pub const TOKEN_TYPE_FIELD: &str = "type";
/// Claim holding the subject (user id).
pub const SUBJECT_FIELD: &str = "sub";
/// Issued-at, seconds since the Unix epoch. Written by the codec.
pub const ISSUED_AT_FIELD: &str = "iat";
/// Expiry, seconds since the Unix epoch. Written by the codec.
pub const EXPIRES_AT_FIELD: &str = "exp";
pub const USERNAME_FIELD: &str = "username";
pub const EMAIL_FIELD: &str = "email";

/// The purpose a token was minted for.
///
/// Access and refresh tokens share one envelope format, so the kind is the
/// only thing that stops one from being replayed as the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "access" => Ok(TokenKind::Access),
            "refresh" => Ok(TokenKind::Refresh),
            other => Err(format!("unknown token kind: {other}")),
        }
    }
}

/// A claim name to JSON value map.
///
/// The codec treats this as opaque apart from `iat`/`exp`, which it writes.
/// The typed accessors below are conveniences for the factory and the
/// validation pipeline; they never default a missing claim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimsSet(Map<String, Value>);

impl ClaimsSet {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Starts a claim set declaring the given kind.
    pub fn for_kind(kind: TokenKind) -> Self {
        Self::new().with(TOKEN_TYPE_FIELD, kind.as_str())
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.to_string(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Raw value of the `type` claim.
    pub fn token_type(&self) -> Option<&str> {
        self.get_str(TOKEN_TYPE_FIELD)
    }

    /// The declared kind, if `type` is present and names a known kind.
    pub fn kind(&self) -> Option<TokenKind> {
        self.token_type().and_then(|t| t.parse().ok())
    }

    /// The subject as a user id.
    ///
    /// Issued tokens carry `sub` as a decimal string; a bare JSON integer is
    /// accepted too. Anything else yields `None`.
    pub fn subject_id(&self) -> Option<i64> {
        match self.get(SUBJECT_FIELD)? {
            Value::String(s) => s.parse().ok(),
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn issued_at(&self) -> Option<i64> {
        self.get_i64(ISSUED_AT_FIELD)
    }

    pub fn expires_at(&self) -> Option<i64> {
        self.get_i64(EXPIRES_AT_FIELD)
    }

    /// Copy of the claims without the codec-managed timing fields.
    pub fn without_timing(&self) -> Self {
        let mut stripped = self.clone();
        stripped.remove(ISSUED_AT_FIELD);
        stripped.remove(EXPIRES_AT_FIELD);
        stripped
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for ClaimsSet {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_kind_wire_values() {
        assert_eq!(serde_json::to_string(&TokenKind::Access).unwrap(), r#""access""#);
        assert_eq!(serde_json::to_string(&TokenKind::Refresh).unwrap(), r#""refresh""#);
        assert_eq!("refresh".parse::<TokenKind>(), Ok(TokenKind::Refresh));
        assert!("Access".parse::<TokenKind>().is_err());
    }

    #[test]
    fn test_for_kind_sets_type_claim() {
        let claims = ClaimsSet::for_kind(TokenKind::Refresh);
        assert_eq!(claims.token_type(), Some("refresh"));
        assert_eq!(claims.kind(), Some(TokenKind::Refresh));
    }

    #[test]
    fn test_unknown_type_is_not_a_kind() {
        let claims = ClaimsSet::new().with(TOKEN_TYPE_FIELD, "mfa");
        assert_eq!(claims.token_type(), Some("mfa"));
        assert_eq!(claims.kind(), None);
        assert_eq!(ClaimsSet::new().kind(), None);
    }

    #[test]
    fn test_subject_id_accepts_string_and_integer() {
        let as_string = ClaimsSet::new().with(SUBJECT_FIELD, "42");
        let as_number = ClaimsSet::new().with(SUBJECT_FIELD, 42);
        assert_eq!(as_string.subject_id(), Some(42));
        assert_eq!(as_number.subject_id(), Some(42));
    }

    #[test]
    fn test_subject_id_rejects_garbage() {
        assert_eq!(ClaimsSet::new().with(SUBJECT_FIELD, "alice").subject_id(), None);
        assert_eq!(ClaimsSet::new().with(SUBJECT_FIELD, 4.5).subject_id(), None);
        assert_eq!(ClaimsSet::new().with(SUBJECT_FIELD, json!(null)).subject_id(), None);
        assert_eq!(ClaimsSet::new().subject_id(), None);
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let claims = ClaimsSet::for_kind(TokenKind::Access).with(SUBJECT_FIELD, "7");
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value, json!({"type": "access", "sub": "7"}));
    }

    #[test]
    fn test_without_timing() {
        let claims = ClaimsSet::for_kind(TokenKind::Access)
            .with(ISSUED_AT_FIELD, 1)
            .with(EXPIRES_AT_FIELD, 2);
        let stripped = claims.without_timing();
        assert!(!stripped.contains(ISSUED_AT_FIELD));
        assert!(!stripped.contains(EXPIRES_AT_FIELD));
        assert_eq!(stripped.len(), 1);
    }
}
