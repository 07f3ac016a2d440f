use sentinel_auth::{CredentialGate, Identity, PasswordHasher};
use sentinel_db::{NewUser, UserRepository};
use tracing::{info, instrument};

use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{LoginRequest, LoginResponse, RefreshResponse, RegisterRequestDto, UserResponse};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(state))]
    pub async fn register_user(
        state: &AppState,
        dto: RegisterRequestDto,
    ) -> Result<UserResponse, AppError> {
        let password_hash = state.hasher.hash(&dto.password)?;

        let identity = state
            .users
            .create_user(NewUser {
                username: dto.username,
                email: dto.email,
                password_hash,
                active: true,
            })
            .await?;

        info!(user_id = identity.id, "user registered");
        Ok(identity.into())
    }

    #[instrument(skip(state))]
    pub async fn login_user(state: &AppState, dto: LoginRequest) -> Result<LoginResponse, AppError> {
        let identity = CredentialGate::authenticate(
            &*state.users,
            &*state.hasher,
            &dto.username,
            &dto.password,
        )
        .await?;

        let pair = state.tokens.issue_pair(&identity)?;
        info!(user_id = identity.id, "token pair issued");

        Ok(pair.into())
    }

    #[instrument(skip(state, identity), fields(user_id = identity.id))]
    pub fn refresh_access_token(
        state: &AppState,
        identity: &Identity,
    ) -> Result<RefreshResponse, AppError> {
        let access_token = state.tokens.create_access_token(identity)?;
        info!("access token refreshed");

        Ok(RefreshResponse {
            access_token,
            token_type: "Bearer".to_string(),
        })
    }
}
