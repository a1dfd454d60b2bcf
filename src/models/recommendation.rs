use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Property;

/// Body of `POST /recommendations`. Both dates or neither; a lone date is
/// rejected as invalid input.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(default)]
    pub check_in: Option<NaiveDate>,
    #[serde(default)]
    pub check_out: Option<NaiveDate>,
}

/// A scored property as returned to the client.
///
/// Transient: built per request and discarded. `image_urls` carries signed
/// URLs, never raw storage keys.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationCandidate {
    #[serde(flatten)]
    pub property: Property,
    pub image_urls: Vec<String>,
    pub available_dates: Vec<NaiveDate>,
    pub next_available_date: Option<NaiveDate>,
    pub collaborative_score: f64,
    pub hybrid_score: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationMeta {
    pub total: usize,
    pub generated_at: DateTime<Utc>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub recommended_properties: Vec<RecommendationCandidate>,
    pub meta: RecommendationMeta,
}
