use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::helpers::app::{get_json_body, get_request, json_request, make_test_app, seed_user};
use db::models::message::Model as MessageModel;
use db::models::user::Role;

#[tokio::test]
async fn test_send_and_poll_conversation() {
    let (app, state) = make_test_app().await;
    let (student, student_token) =
        seed_user(state.db(), "idp_m1", "Thabo", "Nkosi", Role::Student).await;
    let (supervisor, supervisor_token) =
        seed_user(state.db(), "idp_m2", "Prof", "Venter", Role::Supervisor).await;

    let req = json_request(
        "POST",
        "/api/messages",
        Some(&student_token),
        &json!({ "receiver_id": supervisor.id, "content": "Hello, any feedback?" }),
    );
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let req = json_request(
        "POST",
        "/api/messages",
        Some(&supervisor_token),
        &json!({ "receiver_id": student.id, "content": "Reading it this week." }),
    );
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Both directions, oldest first, with participant details.
    let response = app
        .oneshot(get_request(
            &format!("/api/messages/with/{}", supervisor.id),
            Some(&student_token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    let messages = json["data"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["content"], "Hello, any feedback?");
    assert_eq!(messages[0]["sender"]["full_name"], "Thabo Nkosi");
    assert_eq!(messages[1]["content"], "Reading it this week.");
    assert_eq!(messages[1]["sender"]["full_name"], "Prof Venter");
}

#[tokio::test]
async fn test_empty_message_is_rejected() {
    let (app, state) = make_test_app().await;
    let (_student, token) = seed_user(state.db(), "idp_m3", "Aya", "Mbeki", Role::Student).await;
    let (supervisor, _) = seed_user(state.db(), "idp_m4", "Prof", "Botha", Role::Supervisor).await;

    let req = json_request(
        "POST",
        "/api/messages",
        Some(&token),
        &json!({ "receiver_id": supervisor.id, "content": "   " }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_only_sender_may_delete() {
    let (app, state) = make_test_app().await;
    let (student, student_token) =
        seed_user(state.db(), "idp_m5", "Cara", "Smit", Role::Student).await;
    let (supervisor, supervisor_token) =
        seed_user(state.db(), "idp_m6", "Prof", "Naidoo", Role::Supervisor).await;

    let message = MessageModel::create(state.db(), student.id, supervisor.id, "to be removed")
        .await
        .unwrap();

    let req = json_request(
        "DELETE",
        &format!("/api/messages/{}", message.id),
        Some(&supervisor_token),
        &json!({}),
    );
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let req = json_request(
        "DELETE",
        &format!("/api/messages/{}", message.id),
        Some(&student_token),
        &json!({}),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let conversation = MessageModel::conversation(state.db(), student.id, supervisor.id)
        .await
        .unwrap();
    assert!(conversation.is_empty());
}
