use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cinebook_booking::{Booking, BookingSnack, BookingStatus, BookingStore};
use cinebook_core::StoreError;
use uuid::Uuid;

use crate::database::PgStore;
use crate::db_error;

#[derive(sqlx::FromRow)]
struct BookingRow {
    booking_id: Uuid,
    user_id: Uuid,
    screening_id: Uuid,
    seats_booked: i32,
    status: String,
    total_amount: i64,
    snacks_total: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = StoreError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            booking_id: row.booking_id,
            user_id: row.user_id,
            screening_id: row.screening_id,
            seats_booked: row.seats_booked,
            status: row.status.parse::<BookingStatus>().map_err(StoreError::Backend)?,
            total_amount: row.total_amount,
            snacks_total: row.snacks_total,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct BookingSnackRow {
    booking_id: Uuid,
    snack_id: Uuid,
    quantity: i32,
    price_per_item: i64,
}

impl From<BookingSnackRow> for BookingSnack {
    fn from(row: BookingSnackRow) -> Self {
        BookingSnack {
            booking_id: row.booking_id,
            snack_id: row.snack_id,
            quantity: row.quantity,
            price_per_item: row.price_per_item,
        }
    }
}

const BOOKING_COLUMNS: &str = "booking_id, user_id, screening_id, seats_booked, status, total_amount, snacks_total, created_at, updated_at";

#[async_trait]
impl BookingStore for PgStore {
    async fn commit_booking(
        &self,
        booking: &Booking,
        snacks: &[BookingSnack],
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        // Conditional decrement: the availability check and the write are
        // one statement, so concurrent requests serialize on the row and
        // the counter can never go negative.
        let updated = sqlx::query(
            r#"
            UPDATE screenings
            SET available_seats = available_seats - $2
            WHERE screening_id = $1 AND available_seats >= $2
            "#,
        )
        .bind(booking.screening_id)
        .bind(booking.seats_booked)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        if updated.rows_affected() == 0 {
            let available: Option<i32> =
                sqlx::query_scalar("SELECT available_seats FROM screenings WHERE screening_id = $1")
                    .bind(booking.screening_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(db_error)?;

            // Dropping the transaction rolls it back.
            return Err(match available {
                Some(available) => StoreError::SeatConflict {
                    requested: booking.seats_booked,
                    available,
                },
                None => StoreError::NotFound(format!("screening {}", booking.screening_id)),
            });
        }

        sqlx::query(&format!(
            "INSERT INTO bookings ({BOOKING_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
        ))
        .bind(booking.booking_id)
        .bind(booking.user_id)
        .bind(booking.screening_id)
        .bind(booking.seats_booked)
        .bind(booking.status.as_str())
        .bind(booking.total_amount)
        .bind(booking.snacks_total)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        for item in snacks {
            sqlx::query(
                r#"
                INSERT INTO booking_snacks (booking_id, snack_id, quantity, price_per_item)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(item.booking_id)
            .bind(item.snack_id)
            .bind(item.quantity)
            .bind(item.price_per_item)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)
    }

    async fn get_booking(&self, booking_id: Uuid) -> Result<Option<Booking>, StoreError> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE booking_id = $1"
        ))
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;
        row.map(Booking::try_from).transpose()
    }

    async fn bookings_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, StoreError> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;
        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn snacks_for_booking(
        &self,
        booking_id: Uuid,
    ) -> Result<Vec<BookingSnack>, StoreError> {
        let rows = sqlx::query_as::<_, BookingSnackRow>(
            "SELECT booking_id, snack_id, quantity, price_per_item FROM booking_snacks WHERE booking_id = $1",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(rows.into_iter().map(BookingSnack::from).collect())
    }
}
