use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::UserPreferences,
    state::AppState,
};

/// Returns the caller's stored preferences
pub async fn get_preferences(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<UserPreferences>> {
    let prefs = state
        .store
        .preferences(user.0)
        .await?
        .ok_or_else(|| AppError::NotFound("No preferences found for user".to_string()))?;
    Ok(Json(prefs))
}

/// Explicitly saves (upserts) the caller's preferences
pub async fn save_preferences(
    State(state): State<AppState>,
    user: AuthUser,
    Json(prefs): Json<UserPreferences>,
) -> AppResult<(StatusCode, Json<UserPreferences>)> {
    state.store.save_preferences(user.0, &prefs).await?;
    Ok((StatusCode::OK, Json(prefs)))
}
