use std::sync::Arc;

use crate::{
    db::RentalStore,
    services::{AvailabilityCalculator, RecommendationService, UrlSigner},
};

/// Shared application state.
///
/// Store and signer are constructed once at bootstrap and injected here;
/// nothing holds module-level client singletons.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RentalStore>,
    pub recommendations: RecommendationService,
    pub availability: AvailabilityCalculator,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RentalStore>,
        signer: Arc<dyn UrlSigner>,
        min_available_days: usize,
    ) -> Self {
        Self {
            recommendations: RecommendationService::new(store.clone(), signer, min_available_days),
            availability: AvailabilityCalculator::new(store.clone()),
            store,
        }
    }
}
