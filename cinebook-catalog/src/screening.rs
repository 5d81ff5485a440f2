use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dated showtime of a movie with its own seat inventory.
///
/// Invariant: `0 <= available_seats <= total_seats` at all times. The only
/// code allowed to move `available_seats` is the booking commit path, which
/// decrements it conditionally (see `cinebook_booking::BookingStore`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screening {
    pub screening_id: Uuid,
    pub movie_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub available_seats: i32,
    pub total_seats: i32,
    /// Multiplier on the movie's net amount, e.g. 1.2 for premium slots.
    pub price_modifier: f64,
    pub created_at: DateTime<Utc>,
}

impl Screening {
    pub fn new(
        movie_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
        total_seats: i32,
        price_modifier: f64,
    ) -> Self {
        Self {
            screening_id: Uuid::new_v4(),
            movie_id,
            date,
            time,
            available_seats: total_seats,
            total_seats,
            price_modifier,
            created_at: Utc::now(),
        }
    }
}
