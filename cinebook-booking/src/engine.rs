use std::sync::Arc;

use cinebook_catalog::{CatalogRepository, SnackRepository};
use cinebook_core::{money, Amount, StoreError};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{Booking, BookingReceipt, BookingRequest, BookingSnack};
use crate::repository::BookingStore;

/// Server-side booking limits.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRules {
    pub max_seats_per_booking: i32,
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            max_seats_per_booking: 10,
        }
    }
}

/// Converts a validated booking request into a durable reservation.
///
/// The engine recomputes the price from the catalog, never trusting the
/// client figure, and delegates the seat decrement + booking insert to the
/// store as one atomic unit. No retries: every failure is terminal for the
/// request.
pub struct BookingEngine {
    catalog: Arc<dyn CatalogRepository>,
    snacks: Arc<dyn SnackRepository>,
    store: Arc<dyn BookingStore>,
    rules: BookingRules,
}

impl BookingEngine {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        snacks: Arc<dyn SnackRepository>,
        store: Arc<dyn BookingStore>,
        rules: BookingRules,
    ) -> Self {
        Self {
            catalog,
            snacks,
            store,
            rules,
        }
    }

    pub async fn book(
        &self,
        user_id: Uuid,
        request: BookingRequest,
    ) -> Result<BookingReceipt, BookingError> {
        if request.seats_booked < 1 {
            return Err(BookingError::Validation("Invalid booking data".to_string()));
        }
        if request.seats_booked > self.rules.max_seats_per_booking {
            return Err(BookingError::Validation(format!(
                "Cannot book more than {} seats at once",
                self.rules.max_seats_per_booking
            )));
        }

        let screening = self
            .catalog
            .get_screening(request.screening_id)
            .await
            .map_err(BookingError::Storage)?
            .ok_or(BookingError::ScreeningNotFound(request.screening_id))?;

        // Advisory fast-path; the commit below re-checks atomically.
        if request.seats_booked > screening.available_seats {
            return Err(BookingError::SeatsUnavailable {
                requested: request.seats_booked,
                available: screening.available_seats,
            });
        }

        let movie = self
            .catalog
            .get_movie(screening.movie_id)
            .await
            .map_err(BookingError::Storage)?
            .ok_or_else(|| {
                BookingError::Storage(StoreError::NotFound(format!(
                    "movie {} for screening {}",
                    screening.movie_id, screening.screening_id
                )))
            })?;

        // Per-seat price is rounded before multiplying by the seat count.
        let price_per_seat = money::apply_modifier(movie.net_amount, screening.price_modifier);
        let ticket_subtotal = price_per_seat * Amount::from(request.seats_booked);

        let (priced_snacks, snacks_total) = self.price_snacks(&request).await?;

        let total_amount = ticket_subtotal + snacks_total;
        if let Some(declared) = request.total_amount {
            if declared != total_amount {
                warn!(
                    declared,
                    computed = total_amount,
                    "rejecting booking with mismatched client total"
                );
                return Err(BookingError::Validation(format!(
                    "Total amount mismatch: expected {total_amount}"
                )));
            }
        }

        let booking = Booking::new(
            user_id,
            request.screening_id,
            request.seats_booked,
            total_amount,
            snacks_total,
        );
        let items: Vec<BookingSnack> = priced_snacks
            .into_iter()
            .map(|(snack_id, quantity, price_per_item)| BookingSnack {
                booking_id: booking.booking_id,
                snack_id,
                quantity,
                price_per_item,
            })
            .collect();

        match self.store.commit_booking(&booking, &items).await {
            Ok(()) => {
                info!(booking_id = %booking.booking_id, total_amount, "booking confirmed");
                Ok(BookingReceipt {
                    booking_id: booking.booking_id,
                    total_amount,
                    snacks_total,
                })
            }
            // Lost the race between the fast-path check and the commit.
            Err(StoreError::SeatConflict {
                requested,
                available,
            }) => Err(BookingError::SeatsUnavailable {
                requested,
                available,
            }),
            Err(StoreError::NotFound(_)) => {
                Err(BookingError::ScreeningNotFound(request.screening_id))
            }
            Err(other) => Err(BookingError::Storage(other)),
        }
    }

    /// Resolve snack selections to priced line items.
    ///
    /// Duplicate snack ids are merged by summing quantities, zero
    /// quantities are dropped, and unknown ids are skipped. Prices are
    /// captured here, once, as the line-item snapshot.
    async fn price_snacks(
        &self,
        request: &BookingRequest,
    ) -> Result<(Vec<(Uuid, i32, Amount)>, Amount), BookingError> {
        let mut merged: Vec<(Uuid, i32)> = Vec::new();
        for selection in &request.snacks {
            if selection.quantity < 0 {
                return Err(BookingError::Validation(
                    "Invalid snack quantity".to_string(),
                ));
            }
            if selection.quantity == 0 {
                continue;
            }
            match merged.iter_mut().find(|(id, _)| *id == selection.snack_id) {
                Some((_, quantity)) => *quantity += selection.quantity,
                None => merged.push((selection.snack_id, selection.quantity)),
            }
        }

        let mut priced = Vec::with_capacity(merged.len());
        let mut snacks_total: Amount = 0;
        for (snack_id, quantity) in merged {
            let snack = match self
                .snacks
                .get_snack(snack_id)
                .await
                .map_err(BookingError::Storage)?
            {
                Some(snack) => snack,
                None => continue,
            };
            snacks_total += snack.price * Amount::from(quantity);
            priced.push((snack_id, quantity, snack.price));
        }

        Ok((priced, snacks_total))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Screening not found: {0}")]
    ScreeningNotFound(Uuid),

    #[error("Only {available} seats available")]
    SeatsUnavailable {
        requested: i32,
        available: i32,
    },

    #[error("{0}")]
    Validation(String),

    #[error("Storage failure: {0}")]
    Storage(StoreError),
}
