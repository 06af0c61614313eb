//! HTTP route entry point for `/api/...`.
//!
//! Routes are organized by domain, each protected via appropriate access
//! control middleware.
//!
//! Route groups include:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Identity bootstrap, profile, and role selection
//! - `/users` → User directory (authenticated users)
//! - `/projects` → Submission, listing, and review workflow
//! - `/messages` → Direct messages (polled by clients)
//! - `/notifications` → Per-user notification feed
//! - `/dashboard` → Per-role aggregate counters

use crate::auth::guards::allow_authenticated;
use crate::routes::{
    auth::auth_routes, dashboard::dashboard_routes, health::health_routes,
    messages::messages_routes, notifications::notifications_routes, projects::projects_routes,
    users::users_routes,
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod auth;
pub mod common;
pub mod dashboard;
pub mod health;
pub mod messages;
pub mod notifications;
pub mod projects;
pub mod users;

/// Builds the complete application router for all HTTP endpoints.
///
/// Mounts all core API routes under their respective base paths. `/health`
/// and `/auth` skip the blanket guard: health is public, and the auth
/// handlers resolve their own token so they can answer identity bootstrap
/// calls precisely.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest(
            "/users",
            users_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/projects",
            projects_routes(app_state.clone()).route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/messages",
            messages_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/notifications",
            notifications_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/dashboard",
            dashboard_routes().route_layer(from_fn(allow_authenticated)),
        )
        .with_state(app_state)
}
