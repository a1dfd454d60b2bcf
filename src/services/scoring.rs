use crate::models::{Property, UserPreferences};

/// Weight of the price sub-score in the content score
pub const PRICE_WEIGHT: f64 = 0.5;
/// Weight of the region sub-score in the content score
pub const REGION_WEIGHT: f64 = 0.25;
/// Weight of the property-type sub-score in the content score
pub const TYPE_WEIGHT: f64 = 0.25;
/// Price distance (in currency units) at which the price sub-score floors at 0
pub const PRICE_THRESHOLD: f64 = 1000.0;

const MAX_RATING: f64 = 5.0;
const HISTORY_SATURATION: f64 = 100.0;

/// Similarity between a property's attributes and the user's stated
/// preferences, in `[0, 1]`.
///
/// Weighted sum of three sub-scores: price distance (linear falloff over
/// [`PRICE_THRESHOLD`], floored at 0), exact region match, exact type
/// match. Missing prices coerce to 0 before the distance computation so
/// NaN never propagates.
pub fn content_score(property: &Property, prefs: &UserPreferences) -> f64 {
    let price = sanitize_price(property.price);
    let preferred_price = sanitize_price(prefs.preferred_price);

    let price_score = (1.0 - (price - preferred_price).abs() / PRICE_THRESHOLD).max(0.0);
    let region_score = match prefs.preferred_region.as_deref() {
        Some(region) if region == property.property_region => 1.0,
        _ => 0.0,
    };
    let type_score = match prefs.preferred_type.as_deref() {
        Some(kind) if kind == property.property_type => 1.0,
        _ => 0.0,
    };

    price_score * PRICE_WEIGHT + region_score * REGION_WEIGHT + type_score * TYPE_WEIGHT
}

/// How much the blend leans on collaborative signal, in `[0, 1]`.
///
/// Monotonic in review count: a brand-new user (0 reviews) ranks purely on
/// content similarity, a prolific reviewer (>= 100) purely on peers.
pub fn history_weight(review_count: i64) -> f64 {
    (review_count.max(0) as f64).min(HISTORY_SATURATION) / HISTORY_SATURATION
}

/// Blend of content and collaborative scores, rounded to 2 decimal places.
///
/// The collaborative input arrives on the raw 1-5 rating scale and is
/// rescaled here. Both terms are live; the weight shifts between them with
/// the user's review history.
pub fn hybrid_score(content: f64, collaborative: f64, history_weight: f64) -> f64 {
    let content = content.clamp(0.0, 1.0);
    let collaborative = (collaborative / MAX_RATING).clamp(0.0, 1.0);
    let weight = history_weight.clamp(0.0, 1.0);

    let blended = content * (1.0 - weight) + collaborative * weight;
    (blended * 100.0).round() / 100.0
}

fn sanitize_price(price: Option<f64>) -> f64 {
    match price {
        Some(value) if value.is_finite() => value,
        _ => 0.0,
    }
}
