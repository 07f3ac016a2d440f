mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{bearer_request, body_json, setup_test_app};
use sentinel_db::UserRepository;

#[tokio::test]
async fn test_me_with_access_token() {
    let app = setup_test_app();
    let alice = app.create_user("alice", true).await;
    let (access, _) = app.login_tokens("alice").await;

    let response = app
        .send(bearer_request("GET", "/api/users/me", &access))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], alice.id);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert!(body["logged_in_at"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_me_with_refresh_token() {
    let app = setup_test_app();
    app.create_user("alice", true).await;
    let (_, refresh) = app.login_tokens("alice").await;

    let response = app
        .send(bearer_request("GET", "/api/users/me", &refresh))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );

    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "invalid token type 'refresh', expected 'access'"
    );
}

#[tokio::test]
async fn test_me_missing_vs_malformed_header() {
    let app = setup_test_app();

    let missing = app
        .send(
            Request::builder()
                .uri("/api/users/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    let malformed = app
        .send(
            Request::builder()
                .uri("/api/users/me")
                .header(header::AUTHORIZATION, "Basic YWxpY2U6cHc=")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(malformed.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(missing).await["error"], "not authenticated");
    assert_eq!(
        body_json(malformed).await["error"],
        "invalid authorization header format"
    );
}

#[tokio::test]
async fn test_me_with_garbage_token() {
    let app = setup_test_app();

    let response = app
        .send(bearer_request("GET", "/api/users/me", "not.a.token"))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "invalid token");
}

#[tokio::test]
async fn test_me_after_deactivation() {
    let app = setup_test_app();
    let alice = app.create_user("alice", true).await;
    let (access, _) = app.login_tokens("alice").await;

    app.users.set_active(alice.id, false).await.unwrap();

    let response = app
        .send(bearer_request("GET", "/api/users/me", &access))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_me_after_deletion() {
    let app = setup_test_app();
    let alice = app.create_user("alice", true).await;
    let (access, _) = app.login_tokens("alice").await;

    app.users.delete_user(alice.id).await.unwrap();

    let response = app
        .send(bearer_request("GET", "/api/users/me", &access))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["error"],
        "token subject does not exist"
    );
}

#[tokio::test]
async fn test_health_and_openapi() {
    let app = setup_test_app();

    let health = app
        .send(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await;
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(body_json(health).await["status"], "ok");

    let docs = app
        .send(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(docs.status(), StatusCode::OK);
    let doc = body_json(docs).await;
    assert!(doc["paths"]["/api/users/me"].is_object());
    assert!(doc["components"]["securitySchemes"]["bearer_auth"].is_object());
}
