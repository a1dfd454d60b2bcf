use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A listed property, joined with the aggregates the ranking pipeline needs.
///
/// `average_rating`, `review_count` and `next_booking_date` are computed at
/// query time by the candidate query; they are never stored on the row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Property {
    pub property_id: i64,
    pub property_type: String,
    pub title: String,
    pub property_region: String,
    /// Nightly price. Nullable in the wild; scoring coerces absence to 0.
    pub price: Option<f64>,
    pub amenities: Option<serde_json::Value>,
    /// Object-storage keys. Never serialized into responses; handlers
    /// replace them with temporary signed URLs.
    #[serde(skip_serializing, default)]
    pub image_keys: Vec<String>,
    pub host_id: i64,
    pub created_at: DateTime<Utc>,
    pub average_rating: f64,
    pub review_count: i64,
    pub next_booking_date: Option<NaiveDate>,
}
