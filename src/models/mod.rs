mod booking;
mod message;
mod preferences;
mod property;
mod recommendation;
mod review;

pub use booking::{Booking, BookingStatus, NewBooking};
pub use message::{ConversationSummary, Message};
pub use preferences::UserPreferences;
pub use property::Property;
pub use recommendation::{
    RecommendationCandidate, RecommendationMeta, RecommendationRequest, RecommendationResponse,
};
pub use review::Review;
