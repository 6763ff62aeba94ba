//! Signup, signin and token handling.

use axum::http::StatusCode;
use serde_json::json;

use almacen_service::auth::RegisterInput;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_signup_defaults_to_auxiliar_without_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "userName": "ana",
                "email": "ana@x.com",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    assert!(response.body["token"].as_str().is_some());
    assert_eq!(response.body["user"]["role"], "auxiliar");
    assert_eq!(response.body["user"]["active"], true);
    assert!(response.body["user"].get("password").is_none());
    assert!(response.body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_signup_duplicate_user_name_rejected() {
    let app = TestApp::new();
    app.signup("ana", "auxiliar").await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "userName": "ana",
                "email": "other@x.com",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_signup_rejects_short_password_and_unknown_role() {
    let app = TestApp::new();

    let short = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({"userName": "bo", "email": "bo@x.com", "password": "short"})),
            None,
        )
        .await;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);
    assert_eq!(short.body["error"], "VALIDATION_ERROR");

    let bad_role = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "userName": "bo",
                "email": "bo@x.com",
                "password": PASSWORD,
                "role": "superuser",
            })),
            None,
        )
        .await;
    assert_eq!(bad_role.status, StatusCode::BAD_REQUEST);

    let bad_email = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({"userName": "bo", "email": "not-an-email", "password": PASSWORD})),
            None,
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signin_by_user_name_and_email() {
    let app = TestApp::new();
    app.signup("ana", "auxiliar").await;

    let by_name = app
        .request(
            "POST",
            "/api/auth/signin",
            Some(json!({"userName": "ana", "password": PASSWORD})),
            None,
        )
        .await;
    assert_eq!(by_name.status, StatusCode::OK);
    assert!(by_name.body["token"].as_str().is_some());

    let by_email = app
        .request(
            "POST",
            "/api/auth/signin",
            Some(json!({"email": "ana@example.com", "password": PASSWORD})),
            None,
        )
        .await;
    assert_eq!(by_email.status, StatusCode::OK);
    assert_eq!(by_email.body["user"]["userName"], "ana");
}

#[tokio::test]
async fn test_signin_failures_are_distinguishable() {
    let app = TestApp::new();
    app.signup("ana", "auxiliar").await;

    let wrong = app
        .request(
            "POST",
            "/api/auth/signin",
            Some(json!({"userName": "ana", "password": "wrong-password"})),
            None,
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["message"], "Incorrect password");

    let unknown = app
        .request(
            "POST",
            "/api/auth/signin",
            Some(json!({"userName": "nobody", "password": PASSWORD})),
            None,
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let missing = app
        .request(
            "POST",
            "/api/auth/signin",
            Some(json!({"userName": "ana"})),
            None,
        )
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signin_deactivated_account_rejected() {
    let app = TestApp::new();
    let (_, admin) = app.signup("root", "admin").await;
    let (ana_id, _) = app.signup("ana", "auxiliar").await;

    let deleted = app
        .request("DELETE", &format!("/api/users/{ana_id}"), None, Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/api/auth/signin",
            Some(json!({"userName": "ana", "password": PASSWORD})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Account is deactivated");
}

#[tokio::test]
async fn test_missing_token_is_forbidden_and_bad_token_unauthorized() {
    let app = TestApp::new();

    let missing = app.request("GET", "/api/statistics", None, None).await;
    assert_eq!(missing.status, StatusCode::FORBIDDEN);
    assert_eq!(missing.body["message"], "No token provided");

    let garbage = app
        .request("GET", "/api/statistics", None, Some("not.a.token"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_token_from_signin_is_rejected_by_other_secret() {
    let issuer = TestApp::new();
    issuer.signup("ana", "auxiliar").await;
    let signin = issuer
        .request(
            "POST",
            "/api/auth/signin",
            Some(json!({"userName": "ana", "password": PASSWORD})),
            None,
        )
        .await;
    let token = signin.body["token"].as_str().unwrap().to_string();

    let other = TestApp::with_config(|c| c.auth.jwt_secret = "a-different-secret".to_string());
    let response = other
        .request("GET", "/api/statistics", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_access_token_header_accepted() {
    let app = TestApp::new();
    let (_, token) = app.signup("ana", "auxiliar").await;

    let response = app
        .request_with_headers(
            "GET",
            "/api/statistics",
            None,
            &[("x-access-token", token.as_str())],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_signup_can_require_admin() {
    let app = TestApp::with_config(|c| c.auth.signup_requires_admin = true);

    let anonymous = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({"userName": "ana", "email": "ana@x.com", "password": PASSWORD})),
            None,
        )
        .await;
    assert_eq!(anonymous.status, StatusCode::FORBIDDEN);

    let admin = app
        .state
        .auth_service
        .register(RegisterInput {
            user_name: "root".to_string(),
            email: "root@x.com".to_string(),
            password: PASSWORD.to_string(),
            role: Some(almacen_entity::user::UserRole::Admin),
        })
        .await
        .unwrap();

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({"userName": "ana", "email": "ana@x.com", "password": PASSWORD})),
            Some(&admin.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let ana_token = response.body["token"].as_str().unwrap().to_string();
    let by_auxiliar = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({"userName": "bo", "email": "bo@x.com", "password": PASSWORD})),
            Some(&ana_token),
        )
        .await;
    assert_eq!(by_auxiliar.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_gated_signup_checks_identity_before_body() {
    let app = TestApp::with_config(|c| c.auth.signup_requires_admin = true);

    let response = app
        .request("POST", "/api/auth/signup", Some(json!({"userName": "ana"})), None)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["message"], "No token provided");
}

#[tokio::test]
async fn test_gated_signup_uses_stored_role() {
    let app = TestApp::with_config(|c| c.auth.signup_requires_admin = true);
    let mut tokens = Vec::new();
    for name in ["root", "boss"] {
        let outcome = app
            .state
            .auth_service
            .register(RegisterInput {
                user_name: name.to_string(),
                email: format!("{name}@x.com"),
                password: PASSWORD.to_string(),
                role: Some(almacen_entity::user::UserRole::Admin),
            })
            .await
            .unwrap();
        tokens.push((outcome.user.id, outcome.token));
    }
    let (_, root) = &tokens[0];
    let (boss_id, boss) = &tokens[1];

    let demoted = app
        .request(
            "PUT",
            &format!("/api/users/{boss_id}"),
            Some(json!({"role": "coordinador"})),
            Some(root),
        )
        .await;
    assert_eq!(demoted.status, StatusCode::OK);

    // The token still claims admin.
    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({"userName": "ana", "email": "ana@x.com", "password": PASSWORD})),
            Some(boss),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_empty_bearer_does_not_fall_back_to_access_token() {
    let app = TestApp::new();
    let (_, token) = app.signup("ana", "auxiliar").await;

    let response = app
        .request_with_headers(
            "GET",
            "/api/users",
            None,
            &[("Authorization", "Bearer "), ("x-access-token", token.as_str())],
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["message"], "No token provided");
}
