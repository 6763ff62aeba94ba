//! Account management through the two-stage pipeline.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{PASSWORD, TestApp};

fn user_names(body: &serde_json::Value) -> Vec<String> {
    body["data"]
        .as_array()
        .map(|users| {
            users
                .iter()
                .filter_map(|u| u["userName"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn test_auxiliar_lists_only_itself() {
    let app = TestApp::new();
    app.signup("root", "admin").await;
    app.signup("other", "auxiliar").await;
    let (_, token) = app.signup("ana", "auxiliar").await;

    let response = app.request("GET", "/api/users", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(user_names(&response.body), vec!["ana".to_string()]);
}

#[tokio::test]
async fn test_coordinador_list_hides_admins() {
    let app = TestApp::new();
    app.signup("root", "admin").await;
    app.signup("ana", "auxiliar").await;
    let (_, token) = app.signup("coord", "coordinador").await;

    let response = app.request("GET", "/api/users", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let names = user_names(&response.body);
    assert_eq!(names.len(), 2);
    assert!(!names.contains(&"root".to_string()));
}

#[tokio::test]
async fn test_auxiliar_reads_only_own_record() {
    let app = TestApp::new();
    let (other_id, _) = app.signup("other", "auxiliar").await;
    let (ana_id, token) = app.signup("ana", "auxiliar").await;

    let own = app
        .request("GET", &format!("/api/users/{ana_id}"), None, Some(&token))
        .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body["data"]["email"], "ana@example.com");

    let other = app
        .request("GET", &format!("/api/users/{other_id}"), None, Some(&token))
        .await;
    assert_eq!(other.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_coordinador_cannot_read_admin() {
    let app = TestApp::new();
    let (admin_id, _) = app.signup("root", "admin").await;
    let (_, token) = app.signup("coord", "coordinador").await;

    let response = app
        .request("GET", &format!("/api/users/{admin_id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_malformed_and_unknown_ids() {
    let app = TestApp::new();
    let (_, token) = app.signup("root", "admin").await;

    let malformed = app
        .request("GET", "/api/users/not-a-uuid", None, Some(&token))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    let unknown = app
        .request(
            "GET",
            &format!("/api/users/{}", uuid::Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_user_respects_role_rules() {
    let app = TestApp::new();
    let (_, auxiliar) = app.signup("ana", "auxiliar").await;
    let (_, coordinador) = app.signup("coord", "coordinador").await;

    let body = |name: &str, role: &str| {
        json!({
            "userName": name,
            "email": format!("{name}@example.com"),
            "password": PASSWORD,
            "role": role,
        })
    };

    let by_auxiliar = app
        .request("POST", "/api/users", Some(body("bo", "auxiliar")), Some(&auxiliar))
        .await;
    assert_eq!(by_auxiliar.status, StatusCode::FORBIDDEN);

    let created = app
        .request("POST", "/api/users", Some(body("bo", "auxiliar")), Some(&coordinador))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["role"], "auxiliar");
    assert!(created.body.get("token").is_none());

    let admin_attempt = app
        .request("POST", "/api/users", Some(body("eve", "admin")), Some(&coordinador))
        .await;
    assert_eq!(admin_attempt.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_auxiliar_update_rules() {
    let app = TestApp::new();
    let (other_id, _) = app.signup("other", "auxiliar").await;
    let (ana_id, token) = app.signup("ana", "auxiliar").await;
    let path = format!("/api/users/{ana_id}");

    let role_change = app
        .request("PUT", &path, Some(json!({"role": "auxiliar"})), Some(&token))
        .await;
    assert_eq!(role_change.status, StatusCode::FORBIDDEN);

    let other = app
        .request(
            "PUT",
            &format!("/api/users/{other_id}"),
            Some(json!({"email": "x@example.com"})),
            Some(&token),
        )
        .await;
    assert_eq!(other.status, StatusCode::FORBIDDEN);

    let own = app
        .request(
            "PUT",
            &path,
            Some(json!({"email": "ana.new@example.com"})),
            Some(&token),
        )
        .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body["data"]["email"], "ana.new@example.com");
}

#[tokio::test]
async fn test_role_assignment() {
    let app = TestApp::new();
    let (_, admin) = app.signup("root", "admin").await;
    let (_, coordinador) = app.signup("coord", "coordinador").await;
    let (ana_id, _) = app.signup("ana", "auxiliar").await;
    let path = format!("/api/users/{ana_id}");

    let invalid = app
        .request("PUT", &path, Some(json!({"role": "boss"})), Some(&admin))
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

    let to_admin = app
        .request("PUT", &path, Some(json!({"role": "admin"})), Some(&coordinador))
        .await;
    assert_eq!(to_admin.status, StatusCode::FORBIDDEN);

    let promoted = app
        .request(
            "PUT",
            &path,
            Some(json!({"role": "coordinador"})),
            Some(&coordinador),
        )
        .await;
    assert_eq!(promoted.status, StatusCode::OK);
    assert_eq!(promoted.body["data"]["role"], "coordinador");
}

#[tokio::test]
async fn test_password_change_allows_new_signin() {
    let app = TestApp::new();
    let (ana_id, token) = app.signup("ana", "auxiliar").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{ana_id}"),
            Some(json!({"password": "brand-new-password"})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let old = app
        .request(
            "POST",
            "/api/auth/signin",
            Some(json!({"userName": "ana", "password": PASSWORD})),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    let new = app
        .request(
            "POST",
            "/api/auth/signin",
            Some(json!({"userName": "ana", "password": "brand-new-password"})),
            None,
        )
        .await;
    assert_eq!(new.status, StatusCode::OK);
}

#[tokio::test]
async fn test_soft_delete_then_include_inactive() {
    let app = TestApp::new();
    let (_, admin) = app.signup("root", "admin").await;
    let (ana_id, _) = app.signup("ana", "auxiliar").await;

    let deleted = app
        .request("DELETE", &format!("/api/users/{ana_id}"), None, Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"]["active"], false);

    let active_only = app.request("GET", "/api/users", None, Some(&admin)).await;
    assert_eq!(user_names(&active_only.body), vec!["root".to_string()]);

    let all = app
        .request("GET", "/api/users?includeInactive=true", None, Some(&admin))
        .await;
    let names = user_names(&all.body);
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"ana".to_string()));
}

#[tokio::test]
async fn test_hard_delete_removes_account() {
    let app = TestApp::new();
    let (_, admin) = app.signup("root", "admin").await;
    let (ana_id, _) = app.signup("ana", "auxiliar").await;
    let path = format!("/api/users/{ana_id}");

    let deleted = app
        .request("DELETE", &format!("{path}?hardDelete=true"), None, Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app.request("GET", &path, None, Some(&admin)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_restricted_to_admins() {
    let app = TestApp::new();
    let (_, admin) = app.signup("root", "admin").await;
    let (other_admin_id, _) = app.signup("root2", "admin").await;
    let (_, coordinador) = app.signup("coord", "coordinador").await;
    let (ana_id, _) = app.signup("ana", "auxiliar").await;

    let by_coordinador = app
        .request("DELETE", &format!("/api/users/{ana_id}"), None, Some(&coordinador))
        .await;
    assert_eq!(by_coordinador.status, StatusCode::FORBIDDEN);

    let other_admin = app
        .request(
            "DELETE",
            &format!("/api/users/{other_admin_id}"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(other_admin.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_deactivated_account_token_rejected_on_writes() {
    let app = TestApp::new();
    let (_, admin) = app.signup("root", "admin").await;
    let (ana_id, ana) = app.signup("ana", "auxiliar").await;

    app.request("DELETE", &format!("/api/users/{ana_id}"), None, Some(&admin))
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{ana_id}"),
            Some(json!({"email": "ana2@example.com"})),
            Some(&ana),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_demoted_admin_token_uses_current_role() {
    let app = TestApp::new();
    let (_, root) = app.signup("root", "admin").await;
    let (demoted_id, demoted) = app.signup("demoted", "admin").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{demoted_id}"),
            Some(json!({"role": "coordinador"})),
            Some(&root),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // The token still says admin; the stored role is now coordinador.
    let response = app
        .request(
            "POST",
            "/api/users",
            Some(json!({
                "userName": "eve",
                "email": "eve@example.com",
                "password": PASSWORD,
                "role": "admin",
            })),
            Some(&demoted),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_statistics_counts() {
    let app = TestApp::new();
    let (_, admin) = app.signup("root", "admin").await;
    app.signup("ana", "auxiliar").await;
    app.request(
        "POST",
        "/api/categories",
        Some(json!({"name": "Tools", "description": "Hand tools"})),
        Some(&admin),
    )
    .await;

    let response = app.request("GET", "/api/statistics", None, Some(&admin)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["totalUsers"], 2);
    assert_eq!(response.body["data"]["totalCategories"], 1);
}

#[tokio::test]
async fn test_include_inactive_only_honours_true() {
    let app = TestApp::new();
    let (_, admin) = app.signup("root", "admin").await;
    let (ana_id, _) = app.signup("ana", "auxiliar").await;
    app.request("DELETE", &format!("/api/users/{ana_id}"), None, Some(&admin))
        .await;

    let numeric = app
        .request("GET", "/api/users?includeInactive=1", None, Some(&admin))
        .await;
    assert_eq!(numeric.status, StatusCode::OK);
    assert_eq!(user_names(&numeric.body), vec!["root".to_string()]);

    let repeated = app
        .request(
            "GET",
            "/api/users?includeInactive=true&includeInactive=false",
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(repeated.status, StatusCode::BAD_REQUEST);
    assert_eq!(repeated.body["success"], false);
    assert_eq!(repeated.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_email_rule_matches_on_signup_and_update() {
    let app = TestApp::new();
    let (_, admin) = app.signup("root", "admin").await;
    let (ana_id, _) = app.signup("ana", "auxiliar").await;

    let signup = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({"userName": "bo", "email": "a@b@c.com", "password": PASSWORD})),
            None,
        )
        .await;
    assert_eq!(signup.status, StatusCode::BAD_REQUEST);

    let update = app
        .request(
            "PUT",
            &format!("/api/users/{ana_id}"),
            Some(json!({"email": "a@b@c.com"})),
            Some(&admin),
        )
        .await;
    assert_eq!(update.status, StatusCode::BAD_REQUEST);
    assert_eq!(update.body["error"], "VALIDATION_ERROR");

    let stored = app
        .request("GET", &format!("/api/users/{ana_id}"), None, Some(&admin))
        .await;
    assert_eq!(stored.body["data"]["email"], "ana@example.com");
}
