//! Category endpoints: public reads, gated writes.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

async fn create_tools(app: &TestApp, token: &str) -> String {
    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({"name": "Tools", "description": "Hand tools"})),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_reads_are_public() {
    let app = TestApp::new();
    let (_, token) = app.signup("ana", "auxiliar").await;
    let id = create_tools(&app, &token).await;

    let list = app.request("GET", "/api/categories", None, None).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body["data"].as_array().map(Vec::len), Some(1));

    let one = app
        .request("GET", &format!("/api/categories/{id}"), None, None)
        .await;
    assert_eq!(one.status, StatusCode::OK);
    assert_eq!(one.body["data"]["name"], "Tools");
}

#[tokio::test]
async fn test_create_requires_token_and_fields() {
    let app = TestApp::new();
    let (_, token) = app.signup("ana", "auxiliar").await;

    let anonymous = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({"name": "Tools", "description": "Hand tools"})),
            None,
        )
        .await;
    assert_eq!(anonymous.status, StatusCode::FORBIDDEN);

    let blank = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({"name": "  ", "description": "Hand tools"})),
            Some(&token),
        )
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    create_tools(&app, &token).await;
    let duplicate = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({"name": "Tools", "description": "Again"})),
            Some(&token),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_allowed_for_coordinador_only_above_auxiliar() {
    let app = TestApp::new();
    let (_, auxiliar) = app.signup("ana", "auxiliar").await;
    let (_, coordinador) = app.signup("coord", "coordinador").await;
    let id = create_tools(&app, &auxiliar).await;
    let path = format!("/api/categories/{id}");

    let denied = app
        .request(
            "PUT",
            &path,
            Some(json!({"description": "Power tools"})),
            Some(&auxiliar),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let updated = app
        .request(
            "PUT",
            &path,
            Some(json!({"description": "Power tools"})),
            Some(&coordinador),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["description"], "Power tools");
}

#[tokio::test]
async fn test_delete_admin_only_soft_then_hard() {
    let app = TestApp::new();
    let (_, admin) = app.signup("root", "admin").await;
    let (_, coordinador) = app.signup("coord", "coordinador").await;
    let id = create_tools(&app, &admin).await;
    let path = format!("/api/categories/{id}");

    let denied = app.request("DELETE", &path, None, Some(&coordinador)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let soft = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(soft.status, StatusCode::OK);
    assert_eq!(soft.body["data"]["active"], false);

    let active = app.request("GET", "/api/categories", None, None).await;
    assert_eq!(active.body["data"].as_array().map(Vec::len), Some(0));
    let all = app
        .request("GET", "/api/categories?includeInactive=true", None, None)
        .await;
    assert_eq!(all.body["data"].as_array().map(Vec::len), Some(1));

    let hard = app
        .request("DELETE", &format!("{path}?hardDelete=true"), None, Some(&admin))
        .await;
    assert_eq!(hard.status, StatusCode::OK);

    let gone = app.request("GET", &path, None, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_flags_other_than_true_are_off() {
    let app = TestApp::new();
    let (_, admin) = app.signup("root", "admin").await;
    let id = create_tools(&app, &admin).await;
    let path = format!("/api/categories/{id}");

    let soft = app
        .request("DELETE", &format!("{path}?hardDelete=yes"), None, Some(&admin))
        .await;
    assert_eq!(soft.status, StatusCode::OK);
    assert_eq!(soft.body["data"]["active"], false);

    let listed = app
        .request("GET", "/api/categories?includeInactive=yes", None, None)
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"].as_array().map(Vec::len), Some(0));

    let still_there = app.request("GET", &path, None, None).await;
    assert_eq!(still_there.status, StatusCode::OK);
}
