use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{auth::AuthUser, json::ApiJson};
use crate::api::dtos::{
    requests::CreateBookingRequest,
    responses::{BookingCreatedResponse, BookingsResponse},
};
use crate::domain::services::ledger::NewBooking;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    AuthUser { user, .. }: AuthUser,
    ApiJson(payload): ApiJson<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let request = NewBooking {
        event_id: payload.event_id.unwrap_or_default(),
        quantity: payload.quantity.unwrap_or(0),
        total_amount: payload.total_amount,
    };
    info!("create_booking: {} x {} for user {}", request.quantity, request.event_id, user.id);

    let booking = state.ledger.create_booking(&user.id, request).await?;

    Ok(Json(BookingCreatedResponse { success: true, booking }))
}

pub async fn list_user_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser { user, .. }: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.ledger.list_user_bookings(&user.id).await?;
    Ok(Json(BookingsResponse { bookings }))
}
