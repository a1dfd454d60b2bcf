use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Booking, BookingStatus, NewBooking},
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub property_id: i64,
    pub booking_start_date: NaiveDate,
    pub booking_end_date: NaiveDate,
    #[serde(default = "default_guests")]
    pub total_guests: i32,
    #[serde(default)]
    pub total_cost: f64,
}

fn default_guests() -> i32 {
    1
}

/// Creates a booking after checking the requested range is still open
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    if request.booking_end_date < request.booking_start_date {
        return Err(AppError::InvalidInput(
            "bookingEndDate must not precede bookingStartDate".to_string(),
        ));
    }

    let open = state
        .availability
        .is_range_available(
            request.property_id,
            request.booking_start_date,
            request.booking_end_date,
        )
        .await;
    if !open {
        return Err(AppError::BookingConflict(
            "Property is already booked for the requested dates".to_string(),
        ));
    }

    let booking = state
        .store
        .create_booking(&NewBooking {
            property_id: request.property_id,
            user_id: user.0,
            start_date: request.booking_start_date,
            end_date: request.booking_end_date,
            total_guests: request.total_guests,
            total_price: request.total_cost,
            status: BookingStatus::Pending,
        })
        .await?;

    tracing::info!(
        booking_id = booking.booking_id,
        property_id = booking.property_id,
        "Booking created"
    );

    Ok((StatusCode::CREATED, Json(booking)))
}

/// Lists the caller's bookings
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = state.store.bookings_for_user(user.0).await?;
    Ok(Json(bookings))
}
