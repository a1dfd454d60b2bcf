use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{ConversationSummary, Message},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

/// Appends a message to the caller's conversation with a property's host
pub async fn send(
    State(state): State<AppState>,
    user: AuthUser,
    Path(property_id): Path<i64>,
    Json(request): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<Message>)> {
    let content = request.message.trim();
    if content.is_empty() {
        return Err(AppError::InvalidInput("Message must not be empty".to_string()));
    }

    let host_id = state
        .store
        .property_host(property_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Host not found for property".to_string()))?;

    let message = state
        .store
        .append_message(property_id, host_id, user.0, content)
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// Lists the caller's conversations, most recent message first per thread
pub async fn conversations(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<ConversationSummary>>> {
    let conversations = state.store.conversations_for_user(user.0).await?;
    Ok(Json(conversations))
}
