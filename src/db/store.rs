use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{Booking, ConversationSummary, Message, NewBooking, Property, Review, UserPreferences},
};

/// Read/write access to the marketplace tables.
///
/// The recommendation pipeline only ever reads through this trait; writes
/// exist for the preference, booking and messaging surfaces. Handlers and
/// services hold it as `Arc<dyn RentalStore>` so tests can inject doubles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RentalStore: Send + Sync {
    /// The user's stored preferences, if they have ever saved any
    async fn preferences(&self, user_id: i64) -> AppResult<Option<UserPreferences>>;

    /// Explicit upsert of the user's preferences
    async fn save_preferences(&self, user_id: i64, prefs: &UserPreferences) -> AppResult<()>;

    /// Candidate properties for recommendation: never reviewed by the user
    /// and, when a date range is given, free of active bookings overlapping
    /// it. Rows arrive annotated with average rating, distinct-reviewer
    /// count and the earliest future booking date. No ordering guarantee.
    async fn candidate_properties(
        &self,
        user_id: i64,
        date_range: Option<(NaiveDate, NaiveDate)>,
        limit: i64,
    ) -> AppResult<Vec<Property>>;

    async fn bookings_for_property(&self, property_id: i64) -> AppResult<Vec<Booking>>;

    async fn bookings_for_user(&self, user_id: i64) -> AppResult<Vec<Booking>>;

    async fn create_booking(&self, booking: &NewBooking) -> AppResult<Booking>;

    async fn reviews_by_user(&self, user_id: i64) -> AppResult<Vec<Review>>;

    async fn reviews_for_property(&self, property_id: i64) -> AppResult<Vec<Review>>;

    /// All reviews on any of the given properties, the substrate for
    /// peer-similarity computation
    async fn reviews_for_properties(&self, property_ids: &[i64]) -> AppResult<Vec<Review>>;

    async fn property_host(&self, property_id: i64) -> AppResult<Option<i64>>;

    async fn append_message(
        &self,
        property_id: i64,
        host_id: i64,
        sender_id: i64,
        content: &str,
    ) -> AppResult<Message>;

    async fn conversations_for_user(&self, user_id: i64) -> AppResult<Vec<ConversationSummary>>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgRentalStore {
    pool: PgPool,
}

impl PgRentalStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RentalStore for PgRentalStore {
    async fn preferences(&self, user_id: i64) -> AppResult<Option<UserPreferences>> {
        let prefs = sqlx::query_as::<_, UserPreferences>(
            r#"
            SELECT preferred_type, preferred_region, preferred_price
            FROM preferences
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(prefs)
    }

    async fn save_preferences(&self, user_id: i64, prefs: &UserPreferences) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO preferences (user_id, preferred_type, preferred_region, preferred_price)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE
            SET preferred_type = EXCLUDED.preferred_type,
                preferred_region = EXCLUDED.preferred_region,
                preferred_price = EXCLUDED.preferred_price
            "#,
        )
        .bind(user_id)
        .bind(&prefs.preferred_type)
        .bind(&prefs.preferred_region)
        .bind(prefs.preferred_price)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn candidate_properties(
        &self,
        user_id: i64,
        date_range: Option<(NaiveDate, NaiveDate)>,
        limit: i64,
    ) -> AppResult<Vec<Property>> {
        let (check_in, check_out) = match date_range {
            Some((start, end)) => (Some(start), Some(end)),
            None => (None, None),
        };

        // Booking-overlap exclusion applies only when a full range was
        // requested; closed-interval semantics, so touching endpoints
        // conflict.
        let properties = sqlx::query_as::<_, Property>(
            r#"
            SELECT
                p.property_id,
                p.property_type,
                p.title,
                p.property_region,
                p.price,
                p.amenities,
                p.image_keys,
                p.host_id,
                p.created_at,
                COALESCE(
                    (SELECT AVG(r.rating) FROM reviews r WHERE r.property_id = p.property_id),
                    0
                )::float8 AS average_rating,
                (SELECT COUNT(DISTINCT r.user_id) FROM reviews r
                 WHERE r.property_id = p.property_id) AS review_count,
                (SELECT MIN(b.start_date) FROM bookings b
                 WHERE b.property_id = p.property_id
                   AND b.start_date >= CURRENT_DATE
                   AND b.status NOT IN ('cancelled', 'rejected')) AS next_booking_date
            FROM properties p
            WHERE p.property_id NOT IN (
                SELECT property_id FROM reviews WHERE user_id = $1
            )
            AND ($2::date IS NULL OR $3::date IS NULL OR p.property_id NOT IN (
                SELECT property_id FROM bookings
                WHERE status NOT IN ('cancelled', 'rejected')
                  AND start_date <= $3
                  AND end_date >= $2
            ))
            LIMIT $4
            "#,
        )
        .bind(user_id)
        .bind(check_in)
        .bind(check_out)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(properties)
    }

    async fn bookings_for_property(&self, property_id: i64) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT booking_id, property_id, user_id, start_date, end_date,
                   total_guests, total_price, status
            FROM bookings
            WHERE property_id = $1
            "#,
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn bookings_for_user(&self, user_id: i64) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT booking_id, property_id, user_id, start_date, end_date,
                   total_guests, total_price, status
            FROM bookings
            WHERE user_id = $1
            ORDER BY start_date
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn create_booking(&self, booking: &NewBooking) -> AppResult<Booking> {
        let created = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings
                (property_id, user_id, start_date, end_date, total_guests, total_price, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING booking_id, property_id, user_id, start_date, end_date,
                      total_guests, total_price, status
            "#,
        )
        .bind(booking.property_id)
        .bind(booking.user_id)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.total_guests)
        .bind(booking.total_price)
        .bind(booking.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn reviews_by_user(&self, user_id: i64) -> AppResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT user_id, property_id, rating FROM reviews WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    async fn reviews_for_property(&self, property_id: i64) -> AppResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT user_id, property_id, rating FROM reviews WHERE property_id = $1",
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    async fn reviews_for_properties(&self, property_ids: &[i64]) -> AppResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT user_id, property_id, rating FROM reviews WHERE property_id = ANY($1)",
        )
        .bind(property_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    async fn property_host(&self, property_id: i64) -> AppResult<Option<i64>> {
        let host: Option<(i64,)> =
            sqlx::query_as("SELECT host_id FROM properties WHERE property_id = $1")
                .bind(property_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(host.map(|(id,)| id))
    }

    async fn append_message(
        &self,
        property_id: i64,
        host_id: i64,
        sender_id: i64,
        content: &str,
    ) -> AppResult<Message> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (property_id, host_id, sender_id, content)
            VALUES ($1, $2, $3, $4)
            RETURNING message_id, property_id, host_id, sender_id, content, created_at
            "#,
        )
        .bind(property_id)
        .bind(host_id)
        .bind(sender_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    async fn conversations_for_user(&self, user_id: i64) -> AppResult<Vec<ConversationSummary>> {
        let conversations = sqlx::query_as::<_, ConversationSummary>(
            r#"
            SELECT DISTINCT ON (m.property_id, m.host_id, m.sender_id)
                m.property_id,
                p.title AS property_title,
                m.host_id,
                m.sender_id,
                m.content AS last_message,
                m.created_at AS last_sent_at,
                COUNT(*) OVER (
                    PARTITION BY m.property_id, m.host_id, m.sender_id
                ) AS message_count
            FROM messages m
            JOIN properties p ON p.property_id = m.property_id
            WHERE m.sender_id = $1 OR m.host_id = $1
            ORDER BY m.property_id, m.host_id, m.sender_id, m.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(conversations)
    }
}
