use std::collections::HashMap;
use std::sync::Arc;

use crate::{db::RentalStore, error::AppResult};

/// Minimum count of co-rated properties before another user counts as a peer
pub const MIN_COMMON_REVIEWS: usize = 3;
/// Minimum Pearson correlation for a peer to contribute ratings
pub const SIMILARITY_THRESHOLD: f64 = 0.3;

/// Predicts how a user would rate a property from like-minded users'
/// ratings.
///
/// Peers are other users who co-rated at least [`MIN_COMMON_REVIEWS`]
/// properties with the target user and whose rating vectors correlate at
/// [`SIMILARITY_THRESHOLD`] or better. The prediction is the
/// similarity-weighted average of peer ratings on the target property,
/// falling back to the property's global average, then to 0.
#[derive(Clone)]
pub struct CollaborativeScorer {
    store: Arc<dyn RentalStore>,
}

impl CollaborativeScorer {
    pub fn new(store: Arc<dyn RentalStore>) -> Self {
        Self { store }
    }

    /// Predicted rating on the raw `[0, 5]` scale. Callers rescale before
    /// blending. Data-access failures degrade to 0.
    pub async fn predicted_rating(&self, user_id: i64, property_id: i64) -> f64 {
        match self.predict(user_id, property_id).await {
            Ok(score) => score,
            Err(e) => {
                tracing::warn!(
                    user_id,
                    property_id,
                    error = %e,
                    "Collaborative scoring failed; falling back to 0"
                );
                0.0
            }
        }
    }

    async fn predict(&self, user_id: i64, property_id: i64) -> AppResult<f64> {
        let target_reviews = self.store.reviews_for_property(property_id).await?;
        let global_average = if target_reviews.is_empty() {
            None
        } else {
            let sum: f64 = target_reviews.iter().map(|r| r.rating).sum();
            Some(sum / target_reviews.len() as f64)
        };

        let own_reviews = self.store.reviews_by_user(user_id).await?;
        if own_reviews.is_empty() {
            return Ok(global_average.unwrap_or(0.0));
        }

        let own_ratings: HashMap<i64, f64> = own_reviews
            .iter()
            .map(|r| (r.property_id, r.rating))
            .collect();
        let rated_properties: Vec<i64> = own_ratings.keys().copied().collect();

        // Pair every co-rater's ratings with the user's own on the shared
        // properties.
        let peer_reviews = self.store.reviews_for_properties(&rated_properties).await?;
        let mut co_ratings: HashMap<i64, Vec<(f64, f64)>> = HashMap::new();
        for review in &peer_reviews {
            if review.user_id == user_id {
                continue;
            }
            if let Some(own) = own_ratings.get(&review.property_id) {
                co_ratings
                    .entry(review.user_id)
                    .or_default()
                    .push((*own, review.rating));
            }
        }

        let mut similarities: HashMap<i64, f64> = HashMap::new();
        for (peer_id, pairs) in co_ratings {
            if pairs.len() < MIN_COMMON_REVIEWS {
                continue;
            }
            if let Some(similarity) = pearson(&pairs) {
                if similarity >= SIMILARITY_THRESHOLD {
                    similarities.insert(peer_id, similarity);
                }
            }
        }

        // Similarity-weighted average of peer ratings on the target
        // property; a zero weight sum means no usable weighted rating.
        let mut weighted_sum = 0.0;
        let mut weight_sum = 0.0;
        for review in &target_reviews {
            if let Some(similarity) = similarities.get(&review.user_id) {
                weighted_sum += review.rating * similarity;
                weight_sum += similarity;
            }
        }

        if weight_sum > 0.0 {
            Ok(weighted_sum / weight_sum)
        } else {
            Ok(global_average.unwrap_or(0.0))
        }
    }
}

/// Pearson correlation of paired samples. `None` when fewer than two pairs
/// or when either side has zero variance (correlation undefined).
fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    let n = pairs.len();
    if n < 2 {
        return None;
    }

    let n = n as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some(covariance / (var_x.sqrt() * var_y.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MockRentalStore;
    use crate::error::AppError;
    use crate::models::Review;

    fn review(user_id: i64, property_id: i64, rating: f64) -> Review {
        Review {
            user_id,
            property_id,
            rating,
        }
    }

    #[test]
    fn test_pearson_perfect_positive() {
        let pairs = vec![(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)];
        let r = pearson(&pairs).unwrap();
        assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let pairs = vec![(1.0, 5.0), (2.0, 4.0), (3.0, 3.0)];
        let r = pearson(&pairs).unwrap();
        assert!((r + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_zero_variance_is_undefined() {
        let pairs = vec![(3.0, 1.0), (3.0, 4.0), (3.0, 5.0)];
        assert!(pearson(&pairs).is_none());
    }

    #[test]
    fn test_pearson_single_pair_is_undefined() {
        assert!(pearson(&[(1.0, 1.0)]).is_none());
    }

    #[tokio::test]
    async fn test_weighted_prediction_from_similar_peer() {
        // User 1 and user 2 rate properties 10, 11, 12 identically, so
        // user 2 is a perfectly-correlated peer; only user 2 rated the
        // target property 99.
        let mut store = MockRentalStore::new();
        store
            .expect_reviews_for_property()
            .returning(|_| Ok(vec![review(2, 99, 4.0), review(3, 99, 1.0)]));
        store.expect_reviews_by_user().returning(|_| {
            Ok(vec![
                review(1, 10, 5.0),
                review(1, 11, 3.0),
                review(1, 12, 1.0),
            ])
        });
        store.expect_reviews_for_properties().returning(|_| {
            Ok(vec![
                review(2, 10, 5.0),
                review(2, 11, 3.0),
                review(2, 12, 1.0),
                // User 3 only co-rated one property: below the threshold
                review(3, 10, 2.0),
            ])
        });

        let scorer = CollaborativeScorer::new(Arc::new(store));
        let score = scorer.predicted_rating(1, 99).await;
        assert!((score - 4.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_falls_back_to_global_average_without_peers() {
        let mut store = MockRentalStore::new();
        store
            .expect_reviews_for_property()
            .returning(|_| Ok(vec![review(7, 99, 5.0), review(8, 99, 3.0)]));
        // Target user has rated nothing, so no similarity substrate exists
        store.expect_reviews_by_user().returning(|_| Ok(vec![]));

        let scorer = CollaborativeScorer::new(Arc::new(store));
        let score = scorer.predicted_rating(1, 99).await;
        assert!((score - 4.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_anticorrelated_peer_is_excluded() {
        let mut store = MockRentalStore::new();
        store
            .expect_reviews_for_property()
            .returning(|_| Ok(vec![review(2, 99, 5.0)]));
        store.expect_reviews_by_user().returning(|_| {
            Ok(vec![
                review(1, 10, 5.0),
                review(1, 11, 3.0),
                review(1, 12, 1.0),
            ])
        });
        // User 2 rates in exactly the opposite direction
        store.expect_reviews_for_properties().returning(|_| {
            Ok(vec![
                review(2, 10, 1.0),
                review(2, 11, 3.0),
                review(2, 12, 5.0),
            ])
        });

        let scorer = CollaborativeScorer::new(Arc::new(store));
        // No similar peer rated property 99, so the global average (the
        // excluded peer's own 5.0 rating) is the fallback.
        let score = scorer.predicted_rating(1, 99).await;
        assert!((score - 5.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_no_reviews_anywhere_yields_zero() {
        let mut store = MockRentalStore::new();
        store.expect_reviews_for_property().returning(|_| Ok(vec![]));
        store.expect_reviews_by_user().returning(|_| Ok(vec![]));

        let scorer = CollaborativeScorer::new(Arc::new(store));
        assert_eq!(scorer.predicted_rating(1, 99).await, 0.0);
    }

    #[tokio::test]
    async fn test_store_failure_degrades_to_zero() {
        let mut store = MockRentalStore::new();
        store
            .expect_reviews_for_property()
            .returning(|_| Err(AppError::Internal("timeout".to_string())));

        let scorer = CollaborativeScorer::new(Arc::new(store));
        assert_eq!(scorer.predicted_rating(1, 99).await, 0.0);
    }
}
