//! Failure taxonomy for issuance and validation.
//!
//! Every variant is terminal: nothing in this crate retries. The token
//! validation variants (`InvalidSignatureOrFormat`, `Expired`,
//! `WrongTokenType`, `UnknownSubject`, `InactiveAccount`) are the complete set
//! of ways a well-transported bearer token can be refused. `Encoding`, `Store`
//! and `Hasher` report broken infrastructure, not a bad token.

use thiserror::Error;

use crate::claims::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Unknown username or wrong password. The two cases are never told apart.
    #[error("incorrect username or password")]
    InvalidCredentials,

    #[error("user account is inactive")]
    InactiveAccount,

    #[error("invalid token")]
    InvalidSignatureOrFormat,

    #[error("token has expired")]
    Expired,

    #[error("{}", wrong_type_message(.expected, .actual))]
    WrongTokenType {
        expected: TokenKind,
        actual: Option<TokenKind>,
    },

    #[error("token subject does not exist")]
    UnknownSubject,

    #[error("not authenticated")]
    MissingToken,

    #[error("invalid authorization header format")]
    InvalidAuthorizationHeader,

    #[error("failed to encode token: {0}")]
    Encoding(String),

    #[error("user store failure: {0}")]
    Store(String),

    #[error("password hasher failure: {0}")]
    Hasher(String),
}

fn wrong_type_message(expected: &TokenKind, actual: &Option<TokenKind>) -> String {
    match actual {
        Some(actual) => format!("invalid token type '{actual}', expected '{expected}'"),
        None => format!("missing or unknown token type, expected '{expected}'"),
    }
}

impl AuthError {
    /// True for failures caused by the presented credentials or token, as
    /// opposed to failures of the signer, store or hasher.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            AuthError::Encoding(_) | AuthError::Store(_) | AuthError::Hasher(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_token_type_message() {
        let err = AuthError::WrongTokenType {
            expected: TokenKind::Access,
            actual: Some(TokenKind::Refresh),
        };
        assert_eq!(
            err.to_string(),
            "invalid token type 'refresh', expected 'access'"
        );
    }

    #[test]
    fn test_wrong_token_type_message_without_type() {
        let err = AuthError::WrongTokenType {
            expected: TokenKind::Refresh,
            actual: None,
        };
        assert_eq!(
            err.to_string(),
            "missing or unknown token type, expected 'refresh'"
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(AuthError::Expired.is_client_error());
        assert!(AuthError::InvalidCredentials.is_client_error());
        assert!(!AuthError::Store("connection reset".to_string()).is_client_error());
        assert!(!AuthError::Encoding("bad key".to_string()).is_client_error());
    }
}
