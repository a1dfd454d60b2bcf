use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::{
    db::RentalStore,
    error::{AppError, AppResult},
    models::{
        Property, RecommendationCandidate, RecommendationMeta, RecommendationResponse,
        UserPreferences,
    },
    services::{
        availability::{AvailabilityCalculator, DEFAULT_LOOKAHEAD_DAYS},
        collaborative::CollaborativeScorer,
        scoring,
        signing::{sign_images, UrlSigner, MAX_SIGNED_IMAGES},
    },
};

/// Maximum number of properties returned per request
pub const MAX_RECOMMENDATIONS: usize = 20;
/// Candidates fetched per request, oversampled so availability filtering
/// still leaves a full page
const CANDIDATE_MULTIPLIER: usize = 2;

/// Builds the personalized recommendation feed.
///
/// Per request: fetch candidates (already excluding reviewed and
/// range-conflicting properties), fan out per-candidate scoring, filter on
/// open inventory, blend scores, sort, truncate. Everything is computed at
/// read time against live rows; nothing is precomputed or cached.
#[derive(Clone)]
pub struct RecommendationService {
    store: Arc<dyn RentalStore>,
    signer: Arc<dyn UrlSigner>,
    availability: AvailabilityCalculator,
    collaborative: CollaborativeScorer,
    min_available_days: usize,
}

impl RecommendationService {
    pub fn new(
        store: Arc<dyn RentalStore>,
        signer: Arc<dyn UrlSigner>,
        min_available_days: usize,
    ) -> Self {
        Self {
            availability: AvailabilityCalculator::new(store.clone()),
            collaborative: CollaborativeScorer::new(store.clone()),
            store,
            signer,
            min_available_days,
        }
    }

    pub async fn recommend(
        &self,
        user_id: i64,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
    ) -> AppResult<RecommendationResponse> {
        let date_range = match (check_in, check_out) {
            (Some(start), Some(end)) => {
                if end < start {
                    return Err(AppError::InvalidInput(
                        "checkOut must not precede checkIn".to_string(),
                    ));
                }
                Some((start, end))
            }
            (None, None) => None,
            _ => {
                return Err(AppError::InvalidInput(
                    "checkIn and checkOut must be provided together".to_string(),
                ))
            }
        };

        // Preferences are a hard precondition, not a defaultable input
        let preferences = self.store.preferences(user_id).await?.ok_or_else(|| {
            AppError::NotFound(
                "No preferences found for user; set preferences before requesting recommendations"
                    .to_string(),
            )
        })?;

        let candidates = self
            .store
            .candidate_properties(
                user_id,
                date_range,
                (CANDIDATE_MULTIPLIER * MAX_RECOMMENDATIONS) as i64,
            )
            .await?;

        tracing::info!(
            user_id,
            candidate_count = candidates.len(),
            has_date_range = date_range.is_some(),
            "Scoring recommendation candidates"
        );

        // One task per candidate; a slow or failing candidate never blocks
        // or corrupts its siblings.
        let mut tasks = Vec::with_capacity(candidates.len());
        for property in candidates {
            let service = self.clone();
            let preferences = preferences.clone();
            tasks.push(tokio::spawn(async move {
                service.score_candidate(user_id, property, &preferences).await
            }));
        }

        let mut scored = Vec::new();
        for task in tasks {
            match task.await {
                Ok(Some(candidate)) => scored.push(candidate),
                Ok(None) => {} // below the open-inventory threshold
                Err(e) => {
                    tracing::warn!(error = %e, "Candidate scoring task failed; dropping candidate");
                }
            }
        }

        // Stable sort keeps fetch order on ties, so a single run is
        // deterministic.
        scored.sort_by(|a, b| {
            b.hybrid_score
                .partial_cmp(&a.hybrid_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(MAX_RECOMMENDATIONS);

        tracing::info!(user_id, result_count = scored.len(), "Recommendations ready");

        Ok(RecommendationResponse {
            meta: RecommendationMeta {
                total: scored.len(),
                generated_at: Utc::now(),
                date_range,
            },
            recommended_properties: scored,
        })
    }

    /// Scores one candidate: collaborative rating, signed image URLs and
    /// open dates are computed concurrently, each degrading to its neutral
    /// fallback on failure. Returns `None` when the property lacks enough
    /// open days to be worth showing.
    async fn score_candidate(
        &self,
        user_id: i64,
        property: Property,
        preferences: &UserPreferences,
    ) -> Option<RecommendationCandidate> {
        let image_keys: Vec<String> = property
            .image_keys
            .iter()
            .take(MAX_SIGNED_IMAGES)
            .cloned()
            .collect();

        let (collaborative_score, image_urls, available_dates) = tokio::join!(
            self.collaborative
                .predicted_rating(user_id, property.property_id),
            sign_images(self.signer.clone(), image_keys),
            self.availability
                .available_dates(property.property_id, DEFAULT_LOOKAHEAD_DAYS),
        );

        if available_dates.len() < self.min_available_days {
            tracing::debug!(
                property_id = property.property_id,
                open_days = available_dates.len(),
                "Candidate dropped for insufficient open inventory"
            );
            return None;
        }

        let content = scoring::content_score(&property, preferences);
        let weight = scoring::history_weight(property.review_count);
        let hybrid_score = scoring::hybrid_score(content, collaborative_score, weight);

        Some(RecommendationCandidate {
            next_available_date: available_dates.first().copied(),
            available_dates,
            image_urls,
            collaborative_score,
            hybrid_score,
            property,
        })
    }
}
