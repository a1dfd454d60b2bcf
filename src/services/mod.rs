pub mod availability;
pub mod collaborative;
pub mod recommendations;
pub mod scoring;
pub mod signing;

pub use availability::AvailabilityCalculator;
pub use collaborative::CollaborativeScorer;
pub use recommendations::RecommendationService;
pub use signing::{S3UrlSigner, UrlSigner};
