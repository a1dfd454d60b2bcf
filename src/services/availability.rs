use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};

use crate::{db::RentalStore, models::Booking};

/// Forward-looking window over which open dates are computed
pub const DEFAULT_LOOKAHEAD_DAYS: u64 = 30;

/// Computes real-time calendar availability for properties.
///
/// Everything here is fail-closed: a data-access failure yields "no open
/// dates" / "unavailable" rather than an error, so a flaky read can only
/// under-promise inventory, never double-book it.
#[derive(Clone)]
pub struct AvailabilityCalculator {
    store: Arc<dyn RentalStore>,
}

impl AvailabilityCalculator {
    pub fn new(store: Arc<dyn RentalStore>) -> Self {
        Self { store }
    }

    /// Open dates for the property within `[today, today + days_ahead]`,
    /// ascending, at most `days_ahead` entries.
    pub async fn available_dates(&self, property_id: i64, days_ahead: u64) -> Vec<NaiveDate> {
        match self.store.bookings_for_property(property_id).await {
            Ok(bookings) => open_dates(&bookings, Utc::now().date_naive(), days_ahead),
            Err(e) => {
                tracing::warn!(
                    property_id,
                    error = %e,
                    "Availability lookup failed; treating property as fully booked"
                );
                Vec::new()
            }
        }
    }

    /// Whether `[start, end]` is free of active bookings for the property.
    /// Closed-interval semantics: touching endpoints count as a conflict.
    pub async fn is_range_available(
        &self,
        property_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> bool {
        match self.store.bookings_for_property(property_id).await {
            Ok(bookings) => range_is_free(&bookings, start, end),
            Err(e) => {
                tracing::warn!(
                    property_id,
                    error = %e,
                    "Availability check failed; treating range as unavailable"
                );
                false
            }
        }
    }
}

/// Candidate dates across the window minus dates covered by any occupying
/// booking that starts within the window. Date-equality only, no
/// time-of-day granularity.
fn open_dates(bookings: &[Booking], today: NaiveDate, days_ahead: u64) -> Vec<NaiveDate> {
    let window_end = today + Days::new(days_ahead);

    let mut booked: HashSet<NaiveDate> = HashSet::new();
    for booking in bookings {
        if !booking.status.occupies() {
            continue;
        }
        if booking.start_date < today || booking.start_date > window_end {
            continue;
        }
        let mut date = booking.start_date;
        let last = booking.end_date.min(window_end);
        while date <= last {
            booked.insert(date);
            date = date + Days::new(1);
        }
    }

    today
        .iter_days()
        .take_while(|date| *date <= window_end)
        .filter(|date| !booked.contains(date))
        .take(days_ahead as usize)
        .collect()
}

fn range_is_free(bookings: &[Booking], start: NaiveDate, end: NaiveDate) -> bool {
    !bookings.iter().any(|booking| {
        booking.status.occupies() && booking.start_date <= end && booking.end_date >= start
    })
}
