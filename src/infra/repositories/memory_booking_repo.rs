use crate::domain::{models::booking::{Booking, Reservation}, ports::BookingRepository};
use crate::error::AppError;
use super::memory_store::MemoryStore;
use async_trait::async_trait;

pub struct MemoryBookingRepo {
    store: MemoryStore,
}

impl MemoryBookingRepo {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepo {
    async fn reserve(&self, booking: &Booking) -> Result<Reservation, AppError> {
        let mut tables = self.store.write().await;

        let event = tables.events.get_mut(&booking.event_id)
            .ok_or(AppError::NotFound("Event not found".into()))?;

        if event.available_tickets < booking.quantity {
            return Err(AppError::insufficient_tickets(event.available_tickets));
        }
        event.available_tickets -= booking.quantity;
        let event = event.clone();

        tables.bookings.push(booking.clone());

        Ok(Reservation { booking: booking.clone(), event })
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError> {
        Ok(self.store.read().await.bookings.iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Booking>, AppError> {
        Ok(self.store.read().await.bookings.clone())
    }
}
