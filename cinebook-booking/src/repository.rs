use async_trait::async_trait;
use cinebook_core::StoreError;
use uuid::Uuid;

use crate::models::{Booking, BookingSnack};

/// Persistence for bookings and their snack line items.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Persist a booking, its line items, and the matching seat decrement
    /// as one all-or-nothing unit.
    ///
    /// The decrement is conditional: it succeeds only while the screening
    /// still has `seats_booked` seats available, with the check and the
    /// write applied in one indivisible store operation. On a capacity
    /// conflict the store returns `StoreError::SeatConflict` untouched —
    /// no booking row, no decrement.
    async fn commit_booking(
        &self,
        booking: &Booking,
        snacks: &[BookingSnack],
    ) -> Result<(), StoreError>;

    async fn get_booking(&self, booking_id: Uuid) -> Result<Option<Booking>, StoreError>;

    async fn bookings_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, StoreError>;

    async fn snacks_for_booking(&self, booking_id: Uuid)
        -> Result<Vec<BookingSnack>, StoreError>;
}
