use axum::Json;
use tracing::instrument;

use crate::middleware::auth::AccessUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::utils::errors::AppError;

use super::model::MeResponse;

/// Get the current user from their access token
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 401, description = "Missing, invalid, expired or non-access token", body = ErrorResponse),
        (status = 403, description = "User account is inactive", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all, fields(user_id = user.identity().id))]
pub async fn get_me(user: AccessUser) -> Result<Json<MeResponse>, AppError> {
    let identity = user.identity();

    Ok(Json(MeResponse {
        id: identity.id,
        username: identity.username.clone(),
        email: identity.email.clone(),
        logged_in_at: user.claims().issued_at(),
    }))
}
