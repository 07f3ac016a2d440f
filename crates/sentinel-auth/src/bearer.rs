use crate::error::AuthError;

const BEARER_SCHEME: &str = "bearer";

/// Pulls the token out of an `Authorization` header value.
///
/// A missing header is [`AuthError::MissingToken`]; anything other than
/// `Bearer <token>` is [`AuthError::InvalidAuthorizationHeader`]. The scheme
/// is matched case-insensitively.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingToken)?;

    let (scheme, token) = header
        .trim()
        .split_once(' ')
        .ok_or(AuthError::InvalidAuthorizationHeader)?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) || token.is_empty() || token.contains(' ') {
        return Err(AuthError::InvalidAuthorizationHeader);
    }

    Ok(token)
}
