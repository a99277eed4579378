mod common;

use axum::http::StatusCode;
use bookstore::auth::JwtKeys;
use common::TestApp;
use serde_json::json;

fn registration(email: &str, password: &str, confirm: &str) -> serde_json::Value {
    json!({
        "name": "Alice Johnson",
        "email": email,
        "password": password,
        "confirm_password": confirm
    })
}

#[tokio::test]
async fn test_register_then_duplicate_email_conflicts() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/customers/register",
            None,
            registration("Alice@Example.com", "secret123", "secret123"),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["customer"]["email"], "alice@example.com");
    assert!(body["customer"].get("password_hash").is_none());

    // Same address with different casing is still a duplicate
    let (status, body) = app
        .post(
            "/api/customers/register",
            None,
            registration("alice@example.com", "secret123", "secret123"),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/customers/register",
            None,
            registration("bob@example.com", "secret123", "secret124"),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Passwords do not match");

    let (status, _) = app
        .post(
            "/api/customers/register",
            None,
            registration("bob@example.com", "12345", "12345"),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/customers/register",
            None,
            registration("not-an-email", "secret123", "secret123"),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials_with_same_message() {
    let app = TestApp::new().await;
    app.customer("Bob Smith", "bob@example.com").await;

    let (wrong_pw, wrong_pw_body) = app
        .post(
            "/api/customers/login",
            None,
            json!({ "email": "bob@example.com", "password": "nope-nope" }),
        )
        .await;
    let (unknown, unknown_body) = app
        .post(
            "/api/customers/login",
            None,
            json!({ "email": "nobody@example.com", "password": "secret123" }),
        )
        .await;

    assert_eq!(wrong_pw, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw_body["message"], unknown_body["message"]);
}

#[tokio::test]
async fn test_login_token_carries_customer_id() {
    let app = TestApp::new().await;
    let (id, token) = app.customer("Charlie Brown", "charlie@example.com").await;

    let claims = JwtKeys::new("integration-test-secret")
        .decode(&token)
        .unwrap();
    assert_eq!(claims.customer_id(), Ok(id));

    let (status, body) = app.get("/api/customers/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["customer"]["id"], id);
    assert_eq!(body["customer"]["name"], "Charlie Brown");
}

#[tokio::test]
async fn test_customer_profile_access_rules() {
    let app = TestApp::new().await;
    let (alice, alice_token) = app.customer("Alice", "alice@example.com").await;
    let (bob, _) = app.customer("Bob", "bob@example.com").await;
    let staff = app.staff_token().await;

    let (status, _) = app
        .get(&format!("/api/customers/{}", alice), Some(&alice_token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .get(&format!("/api/customers/{}", bob), Some(&alice_token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .get(&format!("/api/customers/{}", bob), Some(&staff))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/api/customers", Some(&staff)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn test_customer_exists_is_public() {
    let app = TestApp::new().await;
    let (id, _) = app.customer("Diana", "diana@example.com").await;

    let (status, body) = app
        .get(&format!("/api/customers/{}/exists", id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exists"], true);

    let (_, body) = app.get("/api/customers/999/exists", None).await;
    assert_eq!(body["exists"], false);
}

#[tokio::test]
async fn test_staff_endpoints_reject_customers_and_anonymous() {
    let app = TestApp::new().await;
    let (_, token) = app.customer("Eve", "eve@example.com").await;

    let (status, body) = app.get("/api/customers", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = app.get("/api/customers", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get("/api/staff", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get("/api/customers", Some("garbage.token.value")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_staff_login_and_listing() {
    let app = TestApp::new().await;
    let token = app.staff_token().await;

    let (status, body) = app.get("/api/staff", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["staff"][0]["email"], common::STAFF_EMAIL);
    assert!(body["staff"][0].get("password_hash").is_none());

    let (status, _) = app
        .post(
            "/api/staff/login",
            None,
            json!({ "email": common::STAFF_EMAIL, "password": "wrong" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Staff tokens are not customer tokens
    let (status, _) = app.get("/api/cart", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_health_and_openapi() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = app.get("/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/api/checkout").is_some());
}
