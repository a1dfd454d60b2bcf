use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    models::{RecommendationRequest, RecommendationResponse},
    state::AppState,
};

/// Handler for the personalized recommendation feed
pub async fn recommend(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let response = state
        .recommendations
        .recommend(user.0, request.check_in, request.check_out)
        .await?;
    Ok(Json(response))
}
