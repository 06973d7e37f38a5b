use axum::{extract::State, http::{Method, Uri}, response::IntoResponse, Json};
use crate::api::handlers::health;
use crate::state::AppState;
use crate::api::dtos::{
    requests::CreateEventRequest,
    responses::{EventCreatedResponse, EventsResponse},
};
use crate::api::extractors::{auth::AdminUser, json::ApiJson};
use crate::domain::models::event::{Event, NewEventParams, EVENT_STATUS_ACTIVE};
use crate::domain::services::stats::{admin_event_views, compute_stats, user_analytics, Snapshot};
use crate::error::AppError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::sync::Arc;
use tracing::info;

const DEFAULT_CAPACITY: i32 = 100;
const DEFAULT_CATEGORY: &str = "General";

/// Unmatched admin paths and methods still require an admin before the API description is shown.
pub async fn admin_index(
    AdminUser(_admin): AdminUser,
    method: Method,
    uri: Uri,
) -> impl IntoResponse {
    health::api_index(method, uri).await
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list().await?;
    let bookings = state.booking_repo.list().await?;
    let users = state.user_repo.list().await?;
    let activities = state.activity_repo.list().await?;
    let active_sessions = state.session_repo.count_active().await?;

    let snapshot = Snapshot {
        events: &events,
        bookings: &bookings,
        users: &users,
        activities: &activities,
        active_sessions,
    };

    Ok(Json(compute_stats(&snapshot, Utc::now().date_naive())))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let users = state.user_repo.list().await?;
    let activities = state.activity_repo.list().await?;
    let active_sessions = state.session_repo.count_active().await?;

    let snapshot = Snapshot {
        events: &[],
        bookings: &[],
        users: &users,
        activities: &activities,
        active_sessions,
    };

    Ok(Json(user_analytics(&snapshot)))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list().await?;
    let bookings = state.booking_repo.list().await?;
    Ok(Json(EventsResponse { events: admin_event_views(&events, &bookings) }))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    ApiJson(payload): ApiJson<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let required = || AppError::Validation("Title, date, location, and price are required".into());

    let title = payload.title.filter(|t| !t.trim().is_empty()).ok_or_else(required)?;
    let date = payload.date.filter(|d| !d.trim().is_empty()).ok_or_else(required)?;
    let location = payload.location.filter(|l| !l.trim().is_empty()).ok_or_else(required)?;
    let price = payload.price.ok_or_else(required)?
        .parse()
        .filter(|p| p.is_finite())
        .ok_or(AppError::Validation("Price must be a number".into()))?;

    if price < 0.0 {
        return Err(AppError::Validation("Price must not be negative".into()));
    }

    let date_time = parse_event_date(&date)
        .ok_or(AppError::Validation("Invalid date format".into()))?;

    let capacity = match payload.capacity {
        None | Some(0) => DEFAULT_CAPACITY,
        Some(c) if c < 0 => return Err(AppError::Validation("Capacity must be positive".into())),
        Some(c) => i32::try_from(c).map_err(|_| AppError::Validation("Capacity is too large".into()))?,
    };

    let event = Event::new(NewEventParams {
        title,
        description: payload.description.unwrap_or_default(),
        date_time,
        location,
        event_type: payload.category.filter(|c| !c.is_empty()).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        capacity,
        price,
        image_url: payload.image_url.unwrap_or_default(),
        status: payload.status.filter(|s| !s.is_empty()).unwrap_or_else(|| EVENT_STATUS_ACTIVE.to_string()),
    });

    let created = state.event_repo.create(&event).await?;

    info!("Event created: {} ({}) by admin {}", created.title, created.id, admin.id);

    Ok(Json(EventCreatedResponse { success: true, event: created }))
}

/// Accepts RFC 3339, a `datetime-local` form value, or a bare date (midnight UTC).
fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn event_dates_accept_common_formats() {
        let rfc = parse_event_date("2025-06-01T18:30:00+05:30").unwrap();
        assert_eq!(rfc.hour(), 13);

        let local = parse_event_date("2025-06-01T18:30").unwrap();
        assert_eq!((local.hour(), local.minute()), (18, 30));

        let bare = parse_event_date("2025-06-01").unwrap();
        assert_eq!((bare.day(), bare.hour()), (1, 0));

        assert!(parse_event_date("next friday").is_none());
    }
}
