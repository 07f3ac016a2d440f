use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginRequest, LoginResponse, RefreshResponse, RegisterRequestDto, UserResponse,
};
use crate::modules::health::HealthResponse;
use crate::modules::users::model::MeResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::refresh_token,
        crate::modules::auth::controller::register_user,
        crate::modules::users::controller::get_me,
        crate::modules::health::health_check,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            RefreshResponse,
            RegisterRequestDto,
            UserResponse,
            MeResponse,
            HealthResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, token refresh and registration"),
        (name = "Users", description = "Current user endpoints"),
        (name = "Health", description = "Service health")
    ),
    info(
        title = "Sentinel API",
        version = "0.1.0",
        description = "Access/refresh token authentication service built with Rust and Axum.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_all_routes() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/login",
            "/api/auth/refresh",
            "/api/auth/register",
            "/api/users/me",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} not documented");
        }
    }
}
