use axum::http::StatusCode;
use tower::ServiceExt;

use crate::helpers::app::{get_json_body, get_request, make_test_app, seed_user};
use db::models::project::{Model as ProjectModel, ProjectStatus};
use db::models::user::Role;

const FILE_URL: &str = "http://127.0.0.1:9/files/f.docx";

#[tokio::test]
async fn test_student_dashboard_counts() {
    let (app, state) = make_test_app().await;
    let (student, token) = seed_user(state.db(), "idp_d1", "Thabo", "Nkosi", Role::Student).await;
    let (supervisor, _) = seed_user(state.db(), "idp_d2", "Prof", "Venter", Role::Supervisor).await;

    let mut ids = Vec::new();
    for i in 0..4 {
        let p = ProjectModel::upsert(
            state.db(),
            None,
            &format!("P{i}"),
            "desc",
            FILE_URL,
            student.id,
            supervisor.id,
        )
        .await
        .unwrap();
        ids.push(p.id);
    }

    ProjectModel::set_status(state.db(), ids[0], ProjectStatus::Approved, None)
        .await
        .unwrap();
    ProjectModel::set_status(state.db(), ids[1], ProjectStatus::Approved, None)
        .await
        .unwrap();
    ProjectModel::set_status(state.db(), ids[2], ProjectStatus::UnderReview, None)
        .await
        .unwrap();

    let response = app
        .oneshot(get_request("/api/dashboard/student", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["data"]["submissions"], 4);
    assert_eq!(json["data"]["approval_rate"], 50.0);
    assert_eq!(json["data"]["under_review"], 1);
}

#[tokio::test]
async fn test_student_dashboard_with_no_submissions() {
    let (app, state) = make_test_app().await;
    let (_student, token) = seed_user(state.db(), "idp_d3", "Aya", "Mbeki", Role::Student).await;

    let response = app
        .oneshot(get_request("/api/dashboard/student", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["data"]["submissions"], 0);
    assert_eq!(json["data"]["approval_rate"], 0.0);
}

#[tokio::test]
async fn test_supervisor_dashboard_counts() {
    let (app, state) = make_test_app().await;
    let (student, _) = seed_user(state.db(), "idp_d4", "Cara", "Smit", Role::Student).await;
    let (supervisor, token) =
        seed_user(state.db(), "idp_d5", "Prof", "Botha", Role::Supervisor).await;

    let p1 = ProjectModel::upsert(state.db(), None, "A", "d", FILE_URL, student.id, supervisor.id)
        .await
        .unwrap();
    let p2 = ProjectModel::upsert(state.db(), None, "B", "d", FILE_URL, student.id, supervisor.id)
        .await
        .unwrap();
    let _p3 = ProjectModel::upsert(state.db(), None, "C", "d", FILE_URL, student.id, supervisor.id)
        .await
        .unwrap();

    ProjectModel::set_status(state.db(), p1.id, ProjectStatus::Approved, None)
        .await
        .unwrap();
    ProjectModel::set_status(state.db(), p2.id, ProjectStatus::Rejected, None)
        .await
        .unwrap();

    ProjectModel::set_plagiarism(state.db(), p1.id, Some(90.0), Some("[]".into()))
        .await
        .unwrap();
    ProjectModel::set_plagiarism(state.db(), p2.id, Some(10.0), Some("[]".into()))
        .await
        .unwrap();

    let response = app
        .oneshot(get_request("/api/dashboard/supervisor", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["data"]["pending_reviews"], 1);
    assert_eq!(json["data"]["reviewed_this_week"], 2);
    assert_eq!(json["data"]["plagiarism_alerts"], 1);
    assert_eq!(json["data"]["average_plagiarism_score"], 50.0);
}
