use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::helpers::app::{get_json_body, get_request, json_request, make_test_app, seed_user};
use db::models::notification::Model as NotificationModel;
use db::models::project::{Model as ProjectModel, ProjectStatus};
use db::models::user::Role;

/// File URL with nothing listening behind it: the download step of the
/// plagiarism check fails immediately and the pipeline falls back to NULLs.
const UNREACHABLE_FILE_URL: &str = "http://127.0.0.1:9/files/thesis.docx";

#[tokio::test]
async fn test_submit_without_file_url_returns_400() {
    let (app, state) = make_test_app().await;
    let (_student, token) = seed_user(state.db(), "idp_p1", "Thabo", "Nkosi", Role::Student).await;
    let (supervisor, _) = seed_user(state.db(), "idp_p2", "Prof", "Venter", Role::Supervisor).await;

    let req = json_request(
        "POST",
        "/api/projects",
        Some(&token),
        &json!({
            "title": "Thesis",
            "description": "Draft",
            "file_url": "",
            "supervisor_id": supervisor.id,
        }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_json_body(response).await;
    assert_eq!(json["message"], "No file URL provided");
}

#[tokio::test]
async fn test_submit_creates_pending_project_with_null_score() {
    let (app, state) = make_test_app().await;
    let (_student, token) = seed_user(state.db(), "idp_p3", "Zanele", "Khumalo", Role::Student).await;
    let (supervisor, _) = seed_user(state.db(), "idp_p4", "Prof", "Botha", Role::Supervisor).await;

    let req = json_request(
        "POST",
        "/api/projects",
        Some(&token),
        &json!({
            "title": "Prototype",
            "description": "First iteration",
            "file_url": UNREACHABLE_FILE_URL,
            "supervisor_id": supervisor.id,
        }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["status"], "PENDING");
    assert!(json["data"]["plagiarism_score"].is_null());
    assert_eq!(json["data"]["supervisor"]["full_name"], "Prof Botha");
}

#[tokio::test]
async fn test_update_other_students_project_is_forbidden() {
    let (app, state) = make_test_app().await;
    let (owner, _) = seed_user(state.db(), "idp_p5", "Aya", "Mbeki", Role::Student).await;
    let (_other, other_token) = seed_user(state.db(), "idp_p6", "Cara", "Smit", Role::Student).await;
    let (supervisor, _) = seed_user(state.db(), "idp_p7", "Prof", "Pillay", Role::Supervisor).await;

    let project = ProjectModel::upsert(
        state.db(),
        None,
        "Owned",
        "desc",
        UNREACHABLE_FILE_URL,
        owner.id,
        supervisor.id,
    )
    .await
    .unwrap();

    let req = json_request(
        "POST",
        "/api/projects",
        Some(&other_token),
        &json!({
            "id": project.id,
            "title": "Hijacked",
            "description": "desc",
            "file_url": UNREACHABLE_FILE_URL,
            "supervisor_id": supervisor.id,
        }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_approve_requires_supervisor_role() {
    let (app, state) = make_test_app().await;
    let (student, student_token) =
        seed_user(state.db(), "idp_p8", "Dudu", "Zulu", Role::Student).await;
    let (supervisor, _) = seed_user(state.db(), "idp_p9", "Prof", "Meyer", Role::Supervisor).await;

    let project = ProjectModel::upsert(
        state.db(),
        None,
        "Thesis",
        "desc",
        UNREACHABLE_FILE_URL,
        student.id,
        supervisor.id,
    )
    .await
    .unwrap();

    let req = json_request(
        "PUT",
        &format!("/api/projects/{}/approve", project.id),
        Some(&student_token),
        &json!({}),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_approve_sets_status_and_notifies_both_parties() {
    let (app, state) = make_test_app().await;
    let (student, _) = seed_user(state.db(), "idp_p10", "Thabo", "Nkosi", Role::Student).await;
    let (supervisor, supervisor_token) =
        seed_user(state.db(), "idp_p11", "Prof", "Venter", Role::Supervisor).await;

    let project = ProjectModel::upsert(
        state.db(),
        None,
        "Final thesis",
        "desc",
        UNREACHABLE_FILE_URL,
        student.id,
        supervisor.id,
    )
    .await
    .unwrap();

    let req = json_request(
        "PUT",
        &format!("/api/projects/{}/approve", project.id),
        Some(&supervisor_token),
        &json!({ "feedback": "Well structured" }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["data"]["status"], "APPROVED");
    assert_eq!(json["data"]["feedback"], "Well structured");

    let supervisor_feed = NotificationModel::find_for_user(state.db(), supervisor.id)
        .await
        .unwrap();
    assert_eq!(supervisor_feed.len(), 1);
    assert_eq!(
        supervisor_feed[0].message,
        "Prof Venter | You approved Thabo Nkosi's project"
    );

    let student_feed = NotificationModel::find_for_user(state.db(), student.id)
        .await
        .unwrap();
    assert_eq!(student_feed.len(), 1);
    assert_eq!(
        student_feed[0].message,
        "Thabo Nkosi | Congratulation 🎉 Your project(Final thesis) was approved"
    );
}

#[tokio::test]
async fn test_reject_defaults_feedback() {
    let (app, state) = make_test_app().await;
    let (student, _) = seed_user(state.db(), "idp_p12", "Aya", "Mbeki", Role::Student).await;
    let (supervisor, supervisor_token) =
        seed_user(state.db(), "idp_p13", "Prof", "Naidoo", Role::Supervisor).await;

    let project = ProjectModel::upsert(
        state.db(),
        None,
        "Draft",
        "desc",
        UNREACHABLE_FILE_URL,
        student.id,
        supervisor.id,
    )
    .await
    .unwrap();

    let req = json_request(
        "PUT",
        &format!("/api/projects/{}/reject", project.id),
        Some(&supervisor_token),
        &json!({}),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["data"]["status"], "REJECTED");
    assert_eq!(json["data"]["feedback"], "No feedback");

    let stored = ProjectModel::find_by_id(state.db(), project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, ProjectStatus::Rejected);
}

#[tokio::test]
async fn test_review_transition_from_any_status() {
    let (app, state) = make_test_app().await;
    let (student, _) = seed_user(state.db(), "idp_p14", "Cara", "Smit", Role::Student).await;
    let (supervisor, supervisor_token) =
        seed_user(state.db(), "idp_p15", "Prof", "Meyer", Role::Supervisor).await;

    let project = ProjectModel::upsert(
        state.db(),
        None,
        "Draft",
        "desc",
        UNREACHABLE_FILE_URL,
        student.id,
        supervisor.id,
    )
    .await
    .unwrap();

    // Approve first, then pull back to under review; no state machine blocks it.
    ProjectModel::set_status(state.db(), project.id, ProjectStatus::Approved, None)
        .await
        .unwrap();

    let req = json_request(
        "PUT",
        &format!("/api/projects/{}/review", project.id),
        Some(&supervisor_token),
        &json!({}),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["data"]["status"], "UNDER_REVIEW");
}

#[tokio::test]
async fn test_get_project_detail_parses_report() {
    let (app, state) = make_test_app().await;
    let (student, token) = seed_user(state.db(), "idp_p16", "Dudu", "Zulu", Role::Student).await;
    let (supervisor, _) = seed_user(state.db(), "idp_p17", "Prof", "Botha", Role::Supervisor).await;

    let project = ProjectModel::upsert(
        state.db(),
        None,
        "Scored",
        "desc",
        UNREACHABLE_FILE_URL,
        student.id,
        supervisor.id,
    )
    .await
    .unwrap();

    ProjectModel::set_plagiarism(
        state.db(),
        project.id,
        Some(63.5),
        Some(r#"[{"url":"https://example.com/a","score":63.5}]"#.to_string()),
    )
    .await
    .unwrap();

    let response = app
        .oneshot(get_request(
            &format!("/api/projects/{}", project.id),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["data"]["plagiarism_score"], 63.5);
    let report = json["data"]["plagiarism_report"].as_array().unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0]["url"], "https://example.com/a");
}

#[tokio::test]
async fn test_my_projects_recent_limits_to_five() {
    let (app, state) = make_test_app().await;
    let (student, token) = seed_user(state.db(), "idp_p18", "Aya", "Mbeki", Role::Student).await;
    let (supervisor, _) = seed_user(state.db(), "idp_p19", "Prof", "Pillay", Role::Supervisor).await;

    for i in 0..7 {
        ProjectModel::upsert(
            state.db(),
            None,
            &format!("Project {i}"),
            "desc",
            UNREACHABLE_FILE_URL,
            student.id,
            supervisor.id,
        )
        .await
        .unwrap();
    }

    let response = app
        .clone()
        .oneshot(get_request("/api/projects/mine", Some(&token)))
        .await
        .unwrap();
    let json = get_json_body(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 7);

    let response = app
        .oneshot(get_request("/api/projects/mine?recent=true", Some(&token)))
        .await
        .unwrap();
    let json = get_json_body(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 5);
}
