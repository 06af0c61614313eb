use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::helpers::app::{get_json_body, get_request, json_request, make_test_app, seed_user};
use db::models::notification::Model as NotificationModel;
use db::models::project::Model as ProjectModel;
use db::models::user::Role;

#[tokio::test]
async fn test_feed_is_split_into_read_and_unread() {
    let (app, state) = make_test_app().await;
    let (user, token) = seed_user(state.db(), "idp_n1", "Thabo", "Nkosi", Role::Student).await;

    let first = NotificationModel::create(state.db(), user.id, "first", None)
        .await
        .unwrap();
    NotificationModel::create(state.db(), user.id, "second", None)
        .await
        .unwrap();

    // Mark one read directly.
    use sea_orm::{ActiveModelTrait, ActiveValue::Set, IntoActiveModel};
    let mut active = first.into_active_model();
    active.is_read = Set(true);
    active.update(state.db()).await.unwrap();

    let response = app
        .oneshot(get_request("/api/notifications", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["data"]["all"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"]["read"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["unread"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["read"][0]["message"], "first");
}

#[tokio::test]
async fn test_recent_includes_project_title() {
    let (app, state) = make_test_app().await;
    let (user, token) = seed_user(state.db(), "idp_n2", "Aya", "Mbeki", Role::Student).await;
    let (supervisor, _) = seed_user(state.db(), "idp_n3", "Prof", "Venter", Role::Supervisor).await;

    let project = ProjectModel::upsert(
        state.db(),
        None,
        "Flagged thesis",
        "desc",
        "http://127.0.0.1:9/f.docx",
        user.id,
        supervisor.id,
    )
    .await
    .unwrap();

    for i in 0..6 {
        NotificationModel::create(state.db(), user.id, &format!("note {i}"), Some(project.id))
            .await
            .unwrap();
    }

    let response = app
        .oneshot(get_request("/api/notifications/recent", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    let recent = json["data"].as_array().unwrap();
    assert_eq!(recent.len(), 5);
    assert!(recent.iter().all(|n| n["project_title"] == "Flagged thesis"));
}

#[tokio::test]
async fn test_read_all_marks_everything() {
    let (app, state) = make_test_app().await;
    let (user, token) = seed_user(state.db(), "idp_n4", "Cara", "Smit", Role::Student).await;

    NotificationModel::create(state.db(), user.id, "a", None).await.unwrap();
    NotificationModel::create(state.db(), user.id, "b", None).await.unwrap();

    let req = json_request("PUT", "/api/notifications/read-all", Some(&token), &json!({}));
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request("/api/notifications", Some(&token)))
        .await
        .unwrap();
    let json = get_json_body(response).await;
    assert_eq!(json["data"]["unread"].as_array().unwrap().len(), 0);
    assert_eq!(json["data"]["read"].as_array().unwrap().len(), 2);
}
