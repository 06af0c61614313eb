//! Per-role dashboard aggregates, computed with on-demand queries.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod get;

use get::{student_dashboard, supervisor_dashboard};

/// Routes:
/// - `GET /dashboard/student`    → Submission totals, approval rate, pending reviews
/// - `GET /dashboard/supervisor` → Review queue, weekly throughput, plagiarism stats
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/student", get(student_dashboard))
        .route("/supervisor", get(supervisor_dashboard))
}
