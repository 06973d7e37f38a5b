use std::collections::HashMap;
use std::sync::Arc;
use crate::domain::{
    models::booking::{Booking, BookingWithEvent},
    ports::{BookingRepository, EventRepository},
};
use crate::error::AppError;
use tracing::info;

pub struct NewBooking {
    pub event_id: String,
    pub quantity: i64,
    pub total_amount: Option<f64>,
}

/// Ticket inventory and the bookings drawn against it.
pub struct BookingLedger {
    event_repo: Arc<dyn EventRepository>,
    booking_repo: Arc<dyn BookingRepository>,
}

impl BookingLedger {
    pub fn new(event_repo: Arc<dyn EventRepository>, booking_repo: Arc<dyn BookingRepository>) -> Self {
        Self { event_repo, booking_repo }
    }

    pub async fn create_booking(&self, user_id: &str, request: NewBooking) -> Result<BookingWithEvent, AppError> {
        if request.event_id.is_empty() || request.quantity < 1 {
            return Err(AppError::Validation("Event ID and valid quantity are required".into()));
        }
        let quantity = i32::try_from(request.quantity)
            .map_err(|_| AppError::Validation("Quantity is too large".into()))?;

        let event = self.event_repo.find_by_id(&request.event_id).await?
            .ok_or(AppError::NotFound("Event not found".into()))?;

        // Fast rejection; the repository re-checks under its own guard.
        if event.available_tickets < quantity {
            return Err(AppError::insufficient_tickets(event.available_tickets));
        }

        let total_price = resolve_total_price(request.total_amount, event.price, quantity)?;
        let booking = Booking::new(user_id.to_string(), event.id.clone(), quantity, total_price);

        let reservation = self.booking_repo.reserve(&booking).await?;

        info!(
            "Booking confirmed: {} ({} x {}) for user {}, {} tickets left",
            reservation.booking.id,
            quantity,
            reservation.event.id,
            user_id,
            reservation.event.available_tickets
        );

        Ok(BookingWithEvent {
            event: Some(reservation.event.snapshot()),
            booking: reservation.booking,
        })
    }

    pub async fn list_user_bookings(&self, user_id: &str) -> Result<Vec<BookingWithEvent>, AppError> {
        let bookings = self.booking_repo.list_by_user(user_id).await?;
        let events: HashMap<String, _> = self.event_repo.list().await?
            .into_iter()
            .map(|e| (e.id.clone(), e))
            .collect();

        Ok(bookings
            .into_iter()
            .map(|booking| BookingWithEvent {
                event: events.get(&booking.event_id).map(|e| e.snapshot_with_image()),
                booking,
            })
            .collect())
    }
}

/// A positive client-supplied amount wins; otherwise price times quantity.
fn resolve_total_price(total_amount: Option<f64>, price: f64, quantity: i32) -> Result<f64, AppError> {
    match total_amount {
        Some(amount) if !amount.is_finite() || amount < 0.0 => {
            Err(AppError::Validation("totalAmount must be a non-negative number".into()))
        }
        Some(amount) if amount > 0.0 => Ok(amount),
        _ => Ok(price * f64::from(quantity)),
    }
}
