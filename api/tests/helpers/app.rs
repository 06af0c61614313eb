use axum::{Router, body::Body, http::Request, response::Response};
use serde_json::Value;
use util::state::AppState;

use db::models::user::{Model as UserModel, Role};

/// Builds the full application router over a fresh in-memory database.
pub async fn make_test_app() -> (Router, AppState) {
    let db = db::test_utils::setup_test_db().await;
    let app_state = AppState::new(db);

    let app = Router::new().nest("/api", api::routes::routes(app_state.clone()));
    (app, app_state)
}

/// Creates a user and returns it with a session token for its identity.
pub async fn seed_user(
    db: &sea_orm::DatabaseConnection,
    provider_id: &str,
    first_name: &str,
    last_name: &str,
    role: Role,
) -> (UserModel, String) {
    let email = format!("{}@test.com", provider_id);
    let user = UserModel::create(db, provider_id, &email, first_name, last_name, None, role)
        .await
        .expect("Failed to create user");

    let (token, _) = api::auth::generate_session_token(provider_id);
    (user, token)
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub async fn get_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
