use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;
use tower::ServiceExt;
use util::config::AppConfig;

use crate::helpers::app::{get_json_body, get_request, json_request, make_test_app, seed_user};
use db::models::user::{Model as UserModel, Role};

#[tokio::test]
#[serial]
async fn test_authenticate_existing_user_returns_200() {
    let (app, state) = make_test_app().await;
    let (user, token) = seed_user(state.db(), "idp_exists", "Thabo", "Nkosi", Role::Student).await;

    let req = json_request("POST", "/api/auth/authenticate", Some(&token), &json!({}));
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["id"], user.id);
    assert_eq!(json["data"]["role"], "STUDENT");
}

#[tokio::test]
#[serial]
async fn test_authenticate_unknown_identity_fails_when_provider_unreachable() {
    let (app, _state) = make_test_app().await;

    // No local row and no reachable provider: bootstrap cannot complete.
    AppConfig::set_identity_api_url("http://127.0.0.1:9");

    let (token, _) = api::auth::generate_session_token("idp_unknown");
    let req = json_request("POST", "/api/auth/authenticate", Some(&token), &json!({}));
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    AppConfig::reset();
}

#[tokio::test]
#[serial]
async fn test_authenticate_without_token_returns_401() {
    let (app, _state) = make_test_app().await;

    let req = json_request("POST", "/api/auth/authenticate", None, &json!({}));
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_me_returns_current_user() {
    let (app, state) = make_test_app().await;
    let (user, token) = seed_user(state.db(), "idp_me", "Lerato", "Mokoena", Role::Supervisor).await;

    let response = app
        .oneshot(get_request("/api/auth/me", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["data"]["id"], user.id);
    assert_eq!(json["data"]["full_name"], "Lerato Mokoena");
}

#[tokio::test]
#[serial]
async fn test_me_with_unknown_identity_returns_404() {
    let (app, _state) = make_test_app().await;

    let (token, _) = api::auth::generate_session_token("idp_ghost");
    let response = app
        .oneshot(get_request("/api/auth/me", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_set_role_survives_provider_metadata_failure() {
    let (app, state) = make_test_app().await;
    let (user, token) = seed_user(state.db(), "idp_role", "Sipho", "Dube", Role::Student).await;

    // The metadata write-back is best-effort; an unreachable provider must
    // not block role selection.
    AppConfig::set_identity_api_url("http://127.0.0.1:9");

    let req = json_request(
        "PUT",
        "/api/auth/role",
        Some(&token),
        &json!({ "role": "SUPERVISOR" }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["data"]["role"], "SUPERVISOR");

    let stored = UserModel::find_by_id(state.db(), user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.role, Role::Supervisor);

    AppConfig::reset();
}
