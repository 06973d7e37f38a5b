use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

pub const EVENT_STATUS_ACTIVE: &str = "active";
pub const EVENT_STATUS_SOLD_OUT: &str = "sold-out";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date_time: DateTime<Utc>,
    pub location: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub total_tickets: i32,
    pub available_tickets: i32,
    pub price: f64,
    pub image_url: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewEventParams {
    pub title: String,
    pub description: String,
    pub date_time: DateTime<Utc>,
    pub location: String,
    pub event_type: String,
    pub capacity: i32,
    pub price: f64,
    pub image_url: String,
    pub status: String,
}

impl Event {
    pub fn new(params: NewEventParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            description: params.description,
            date_time: params.date_time,
            location: params.location,
            event_type: params.event_type,
            total_tickets: params.capacity,
            available_tickets: params.capacity,
            price: params.price,
            image_url: params.image_url,
            status: params.status,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_tickets_left(&self) -> bool {
        self.available_tickets > 0
    }

    pub fn snapshot(&self) -> EventSnapshot {
        EventSnapshot {
            title: self.title.clone(),
            date_time: self.date_time,
            location: self.location.clone(),
            image_url: None,
        }
    }

    pub fn snapshot_with_image(&self) -> EventSnapshot {
        EventSnapshot {
            image_url: Some(self.image_url.clone()),
            ..self.snapshot()
        }
    }
}

/// Event fields copied onto booking responses.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventSnapshot {
    pub title: String,
    pub date_time: DateTime<Utc>,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
