use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use cinebook_booking::{Booking, BookingRequest, BookingSnack};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::{session_auth_middleware, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct BookResponse {
    success: bool,
    booking_id: Uuid,
    message: String,
}

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/book", post(create_booking))
        .route("/api/bookings", get(my_bookings))
        .route("/api/bookings/{id}/snacks", get(booking_snacks))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_middleware,
        ))
}

async fn create_booking(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<BookResponse>, AppError> {
    let receipt = state.engine.book(user.0, request).await?;

    info!(booking_id = %receipt.booking_id, user_id = %user.0, "booking created");

    Ok(Json(BookResponse {
        success: true,
        booking_id: receipt.booking_id,
        message: "Booking confirmed successfully".to_string(),
    }))
}

async fn my_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = state.bookings.bookings_for_user(user.0).await?;
    Ok(Json(bookings))
}

async fn booking_snacks(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<Vec<BookingSnack>>, AppError> {
    // Another user's booking is indistinguishable from a missing one.
    let booking = state
        .bookings
        .get_booking(booking_id)
        .await?
        .filter(|booking| booking.user_id == user.0)
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    let items = state.bookings.snacks_for_booking(booking.booking_id).await?;
    Ok(Json(items))
}
