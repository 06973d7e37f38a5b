use serde::Serialize;
use crate::domain::models::{booking::BookingWithEvent, event::Event, user::User};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_admin: user.is_admin,
        }
    }
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct EventsResponse<T: Serialize> {
    pub events: Vec<T>,
}

#[derive(Serialize)]
pub struct EventResponse {
    pub event: Event,
}

#[derive(Serialize)]
pub struct EventCreatedResponse {
    pub success: bool,
    pub event: Event,
}

#[derive(Serialize)]
pub struct BookingCreatedResponse {
    pub success: bool,
    pub booking: BookingWithEvent,
}

#[derive(Serialize)]
pub struct BookingsResponse {
    pub bookings: Vec<BookingWithEvent>,
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
    pub endpoints: &'static [&'static str],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIndexResponse {
    pub message: &'static str,
    pub path: String,
    pub method: String,
    pub version: &'static str,
    pub features: &'static [&'static str],
    pub available_endpoints: &'static [&'static str],
    pub currency: &'static str,
    pub region: &'static str,
}
