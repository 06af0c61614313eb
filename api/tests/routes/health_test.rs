use axum::http::StatusCode;
use tower::ServiceExt;

use crate::helpers::app::{get_json_body, get_request, make_test_app};

#[tokio::test]
async fn test_health_is_public() {
    let (app, _state) = make_test_app().await;

    let response = app.oneshot(get_request("/api/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_json_body(response).await;
    assert_eq!(json["success"], true);
    assert!(json["data"]["project"].as_str().is_some());
}
