use axum::{Router, middleware, routing::post};

use crate::middleware::rate_limit::limit_login_attempts;
use crate::state::AppState;

use super::controller::{login_user, refresh_token, register_user};

pub fn init_auth_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            post(login_user).route_layer(middleware::from_fn_with_state(
                state.clone(),
                limit_login_attempts,
            )),
        )
        .route("/refresh", post(refresh_token))
        .route("/register", post(register_user))
}
