use serde::{Deserialize, Serialize};

/// A user's stated preferences, the content-scoring signal.
///
/// One row per user, written only through an explicit save. Absence is a
/// valid state meaning "no personalization signal"; the recommendation
/// endpoint treats it as a precondition failure rather than defaulting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserPreferences {
    pub preferred_type: Option<String>,
    pub preferred_region: Option<String>,
    pub preferred_price: Option<f64>,
}
