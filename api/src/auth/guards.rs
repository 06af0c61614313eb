use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::user::{Model as UserModel, Role};
use util::state::AppState;

// --- Role Based Access Guards ---

#[derive(serde::Serialize, Default)]
pub struct Empty;

/// Helper to extract, validate user from request extensions and insert them back into the request
async fn extract_and_insert_authuser(
    mut req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, _user) = extract_and_insert_authuser(req).await?;

    Ok(next.run(req).await)
}

/// Supervisor-only guard.
///
/// Resolves the local user behind the session and checks their role. A DB
/// error denies access (fail-safe).
pub async fn allow_supervisor(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    let local = match UserModel::find_by_provider_id(app_state.db(), &user.0.sub).await {
        Ok(local) => local,
        Err(e) => {
            tracing::warn!(
                error = %e,
                provider_id = %user.0.sub,
                "DB error while checking role; denying access"
            );
            return Err((
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error("Supervisor access required")),
            ));
        }
    };

    match local {
        Some(local) if local.role == Role::Supervisor => Ok(next.run(req).await),
        _ => Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Supervisor access required")),
        )),
    }
}
