use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Rejected,
}

impl BookingStatus {
    /// Whether the booking blocks the property's calendar.
    /// Cancelled and rejected bookings free their dates.
    pub fn occupies(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled | BookingStatus::Rejected)
    }
}

/// Fields required to create a booking; the id is assigned by the store
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub property_id: i64,
    pub user_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_guests: i32,
    pub total_price: f64,
    pub status: BookingStatus,
}

/// A reservation of a property for a closed date interval
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub booking_id: i64,
    pub property_id: i64,
    pub user_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_guests: i32,
    pub total_price: f64,
    pub status: BookingStatus,
}
