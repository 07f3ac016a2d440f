//! Administrative operations behind `sentinel-cli`.
//!
//! These take their collaborators as arguments so the binary can run them
//! against Postgres and the tests against the in-memory store.

use anyhow::{Context, anyhow};
use sentinel_auth::{CredentialGate, Identity, PasswordHasher, TokenFactory, TokenKind};
use sentinel_db::{NewUser, UserRepository};
use validator::Validate;

use crate::modules::auth::model::RegisterRequestDto;
use crate::validator::format_errors;

pub async fn create_user<R, H>(
    users: &R,
    hasher: &H,
    username: &str,
    email: &str,
    password: &str,
    active: bool,
) -> anyhow::Result<Identity>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    // Same rules as self-registration.
    let dto = RegisterRequestDto {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };
    dto.validate()
        .map_err(|errors| anyhow!("{}", format_errors(&errors)))?;

    let password_hash = hasher.hash(&dto.password)?;

    let identity = users
        .create_user(NewUser {
            username: dto.username,
            email: dto.email,
            password_hash,
            active,
        })
        .await?;

    Ok(identity)
}

async fn find_identity<R>(users: &R, username: &str) -> anyhow::Result<Identity>
where
    R: UserRepository + ?Sized,
{
    users
        .find_by_username(username)
        .await?
        .map(|stored| stored.identity)
        .ok_or_else(|| anyhow!("no user named '{username}'"))
}

/// Activates or deactivates an account. Outstanding tokens of a deactivated
/// account are refused by the validation pipeline from then on.
pub async fn set_user_active<R>(users: &R, username: &str, active: bool) -> anyhow::Result<Identity>
where
    R: UserRepository + ?Sized,
{
    let identity = find_identity(users, username).await?;

    if !users.set_active(identity.id, active).await? {
        return Err(anyhow!("user '{username}' disappeared during update"));
    }

    Ok(Identity { active, ..identity })
}

pub async fn delete_user<R>(users: &R, username: &str) -> anyhow::Result<Identity>
where
    R: UserRepository + ?Sized,
{
    let identity = find_identity(users, username).await?;
    users.delete_user(identity.id).await?;
    Ok(identity)
}

/// Passes the credential gate and mints one token of `kind`.
pub async fn issue_token<R, H>(
    users: &R,
    hasher: &H,
    tokens: &TokenFactory,
    username: &str,
    password: &str,
    kind: TokenKind,
) -> anyhow::Result<String>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    let identity = CredentialGate::authenticate(users, hasher, username, password)
        .await
        .with_context(|| format!("cannot issue a token for '{username}'"))?;

    Ok(tokens.create_token(kind, &identity)?)
}
