#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use sentinel::router::init_router;
use sentinel::state::AppState;
use sentinel_auth::{BcryptHasher, Identity, PasswordHasher};
use sentinel_config::{CorsConfig, JwtConfig, RateLimitConfig};
use sentinel_db::{InMemoryUserStore, NewUser, UserRepository};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-characters";
pub const PASSWORD: &str = "correct-pw";

pub struct TestApp {
    pub state: AppState,
    pub users: Arc<InMemoryUserStore>,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        ..JwtConfig::default()
    }
}

/// Generous limits so only the rate limit tests ever hit them.
pub fn relaxed_rate_limit() -> RateLimitConfig {
    RateLimitConfig {
        auth_per_second: 1000,
        auth_burst_size: 1000,
        trust_proxy_headers: false,
    }
}

pub fn setup_test_app_with(jwt_config: &JwtConfig, rate_limit: &RateLimitConfig) -> TestApp {
    let users = Arc::new(InMemoryUserStore::new());
    let state = AppState::new(
        users.clone(),
        Arc::new(BcryptHasher::new(4)),
        jwt_config,
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        rate_limit,
    )
    .unwrap();

    TestApp { state, users }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(&test_jwt_config(), &relaxed_rate_limit())
}

impl TestApp {
    pub fn router(&self) -> Router {
        init_router(self.state.clone())
    }

    pub async fn create_user(&self, username: &str, active: bool) -> Identity {
        self.users
            .create_user(NewUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash: BcryptHasher::new(4).hash(PASSWORD).unwrap(),
                active,
            })
            .await
            .unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router().oneshot(request).await.unwrap()
    }

    pub async fn login(&self, username: &str, password: &str) -> Response<Body> {
        self.send(json_post(
            "/api/auth/login",
            &serde_json::json!({ "username": username, "password": password }),
        ))
        .await
    }

    /// Logs in and returns `(access_token, refresh_token)`.
    pub async fn login_tokens(&self, username: &str) -> (String, String) {
        let response = self.login(username, PASSWORD).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        (
            body["access_token"].as_str().unwrap().to_string(),
            body["refresh_token"].as_str().unwrap().to_string(),
        )
    }
}

pub fn json_post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub fn bearer_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
