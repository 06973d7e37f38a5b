use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use super::event::{Event, EventSnapshot};

pub const BOOKING_CONFIRMED: &str = "Confirmed";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    pub quantity: i32,
    pub total_price: f64,
    pub booking_date: DateTime<Utc>,
    pub status: String,
}

impl Booking {
    pub fn new(user_id: String, event_id: String, quantity: i32, total_price: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            event_id,
            quantity,
            total_price,
            booking_date: Utc::now(),
            status: BOOKING_CONFIRMED.to_string(),
        }
    }
}

/// Result of an atomic reserve: the stored booking and the event after the decrement.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub booking: Booking,
    pub event: Event,
}

#[derive(Debug, Serialize, Clone)]
pub struct BookingWithEvent {
    #[serde(flatten)]
    pub booking: Booking,
    pub event: Option<EventSnapshot>,
}
