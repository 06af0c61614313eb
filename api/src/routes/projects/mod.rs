//! Project submission, listing, and review routes.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use util::state::AppState;

use crate::auth::guards::allow_supervisor;

pub mod common;
pub mod get;
pub mod post;
pub mod put;

use get::{get_project, list_projects, my_projects, supervised_projects};
use post::upsert_project;
use put::{approve_project, reject_project, review_project};

/// Routes:
/// - `POST /projects`                 → Submit or update a project (runs the plagiarism check)
/// - `GET  /projects`                 → Explore all projects
/// - `GET  /projects/mine`            → The calling student's projects
/// - `GET  /projects/supervised`      → Projects supervised by the caller
/// - `GET  /projects/{project_id}`    → Project detail with parsed report
///
/// Review transitions (supervisor-only):
/// - `PUT /projects/{project_id}/approve`
/// - `PUT /projects/{project_id}/reject`
/// - `PUT /projects/{project_id}/review`
pub fn projects_routes(app_state: AppState) -> Router<AppState> {
    let review = Router::new()
        .route("/{project_id}/approve", put(approve_project))
        .route("/{project_id}/reject", put(reject_project))
        .route("/{project_id}/review", put(review_project))
        .route_layer(from_fn_with_state(app_state, allow_supervisor));

    Router::new()
        .route("/", post(upsert_project))
        .route("/", get(list_projects))
        .route("/mine", get(my_projects))
        .route("/supervised", get(supervised_projects))
        .route("/{project_id}", get(get_project))
        .merge(review)
}
