use serde::{Deserialize, Serialize};

/// A guest's rating of a property, on a 1-5 scale
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub user_id: i64,
    pub property_id: i64,
    pub rating: f64,
}
