use axum::http::StatusCode;
use tower::ServiceExt;

use crate::helpers::app::{get_json_body, get_request, make_test_app, seed_user};
use db::models::user::Role;

#[tokio::test]
async fn test_list_users_requires_auth() {
    let (app, _state) = make_test_app().await;

    let response = app.oneshot(get_request("/api/users", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_users_returns_directory_entries() {
    let (app, state) = make_test_app().await;
    let (_user, token) = seed_user(state.db(), "idp_u1", "Thabo", "Nkosi", Role::Student).await;
    seed_user(state.db(), "idp_u2", "Prof", "Venter", Role::Supervisor).await;

    let response = app
        .oneshot(get_request("/api/users", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    let users = json["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u["full_name"].as_str().is_some()));
}

#[tokio::test]
async fn test_list_supervisors_filters_by_role() {
    let (app, state) = make_test_app().await;
    let (_student, token) = seed_user(state.db(), "idp_u3", "Zanele", "Khumalo", Role::Student).await;
    seed_user(state.db(), "idp_u4", "Prof", "Botha", Role::Supervisor).await;
    seed_user(state.db(), "idp_u5", "Prof", "Naidoo", Role::Supervisor).await;

    let response = app
        .oneshot(get_request("/api/users/supervisors", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    let supervisors = json["data"].as_array().unwrap();
    assert_eq!(supervisors.len(), 2);
    assert!(supervisors.iter().all(|u| u["role"] == "SUPERVISOR"));
}

#[tokio::test]
async fn test_get_user_not_found() {
    let (app, state) = make_test_app().await;
    let (_user, token) = seed_user(state.db(), "idp_u6", "Dudu", "Zulu", Role::Student).await;

    let response = app
        .oneshot(get_request("/api/users/424242", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
