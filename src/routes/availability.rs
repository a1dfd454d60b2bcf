use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{services::availability::DEFAULT_LOOKAHEAD_DAYS, state::AppState};

const MAX_LOOKAHEAD_DAYS: u64 = 90;

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    #[serde(default = "default_days")]
    pub days: u64,
}

fn default_days() -> u64 {
    DEFAULT_LOOKAHEAD_DAYS
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub property_id: i64,
    pub available_dates: Vec<NaiveDate>,
    pub next_available_date: Option<NaiveDate>,
}

/// Open dates for a property over the requested lookahead window
pub async fn available_dates(
    State(state): State<AppState>,
    Path(property_id): Path<i64>,
    Query(query): Query<AvailabilityQuery>,
) -> Json<AvailabilityResponse> {
    let days = query.days.clamp(1, MAX_LOOKAHEAD_DAYS);
    let dates = state.availability.available_dates(property_id, days).await;

    Json(AvailabilityResponse {
        property_id,
        next_available_date: dates.first().copied(),
        available_dates: dates,
    })
}
