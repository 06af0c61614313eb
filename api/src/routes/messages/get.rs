use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::resolve_current_user;
use crate::routes::messages::common::{MessageResponse, ParticipantResponse};
use db::models::message::Model as MessageModel;
use db::models::user::Model as UserModel;

/// GET /api/messages/with/{user_id}
///
/// Both directions of the conversation between the session user and
/// `user_id`, oldest first, with participant details attached. Clients poll
/// this endpoint on a fixed interval.
pub async fn get_conversation(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let me = match resolve_current_user(db, &claims).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    let other = match UserModel::find_by_id(db, user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("User not found")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to look up conversation partner");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Database error")),
            )
                .into_response();
        }
    };

    let messages = match MessageModel::conversation(db, me.id, other.id).await {
        Ok(messages) => messages,
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch conversation");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to retrieve messages")),
            )
                .into_response();
        }
    };

    let me_participant = ParticipantResponse::from(&me);
    let other_participant = ParticipantResponse::from(&other);

    let data: Vec<MessageResponse> = messages
        .iter()
        .map(|m| {
            let (sender, receiver) = if m.sender_id == me.id {
                (me_participant.clone(), other_participant.clone())
            } else {
                (other_participant.clone(), me_participant.clone())
            };
            MessageResponse::from_model(m, Some(sender), Some(receiver))
        })
        .collect();

    Json(ApiResponse::success(data, "Messages retrieved successfully")).into_response()
}
