use chrono::{DateTime, Utc};
use cinebook_core::Amount;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status: {other}")),
        }
    }
}

/// A durable reservation: one user, one screening, N seats.
///
/// Created together with its seat decrement as a single atomic unit; see
/// `BookingStore::commit_booking`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub screening_id: Uuid,
    pub seats_booked: i32,
    pub status: BookingStatus,
    /// Final charged amount, tickets plus snacks.
    pub total_amount: Amount,
    pub snacks_total: Amount,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        user_id: Uuid,
        screening_id: Uuid,
        seats_booked: i32,
        total_amount: Amount,
        snacks_total: Amount,
    ) -> Self {
        let now = Utc::now();
        Self {
            booking_id: Uuid::new_v4(),
            user_id,
            screening_id,
            seats_booked,
            status: BookingStatus::Confirmed,
            total_amount,
            snacks_total,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A snack line item. `price_per_item` is the catalog price captured at
/// booking time; later catalog edits never touch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSnack {
    pub booking_id: Uuid,
    pub snack_id: Uuid,
    pub quantity: i32,
    pub price_per_item: Amount,
}

/// Body of `POST /api/book`.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub screening_id: Uuid,
    pub seats_booked: i32,
    #[serde(default)]
    pub snacks: Vec<SnackSelection>,
    /// Client-declared total. Advisory only; the engine recomputes and
    /// rejects a disagreeing figure.
    #[serde(default)]
    pub total_amount: Option<Amount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnackSelection {
    pub snack_id: Uuid,
    pub quantity: i32,
}

/// What a successful booking returns to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct BookingReceipt {
    pub booking_id: Uuid,
    pub total_amount: Amount,
    pub snacks_total: Amount,
}
