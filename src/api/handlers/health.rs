use axum::{http::{Method, Uri}, response::IntoResponse, Json};
use chrono::Utc;
use crate::api::dtos::responses::{ApiIndexResponse, HealthResponse};

const HEALTH_ENDPOINTS: &[&str] = &["health", "events", "signin", "signup", "bookings"];

const AVAILABLE_ENDPOINTS: &[&str] = &[
    "/health",
    "/events",
    "/signin",
    "/signup",
    "/auth/social",
    "/auth/logout",
    "/bookings",
    "/user/bookings",
    "/admin/stats",
    "/admin/events",
    "/admin/users",
];

const FEATURES: &[&str] = &[
    "User Authentication (Email/Password + Social)",
    "Event Management",
    "Booking System",
    "Admin Dashboard",
    "User Analytics",
    "Session Management",
];

pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        message: "EventHub API is running",
        timestamp: Utc::now().to_rfc3339(),
        endpoints: HEALTH_ENDPOINTS,
    })
}

/// Fallback for unmatched paths: describes the API instead of a 404.
pub async fn api_index(method: Method, uri: Uri) -> impl IntoResponse {
    Json(ApiIndexResponse {
        message: "EventHub API - Indian Event Management Platform",
        path: uri.path().to_string(),
        method: method.to_string(),
        version: env!("CARGO_PKG_VERSION"),
        features: FEATURES,
        available_endpoints: AVAILABLE_ENDPOINTS,
        currency: "INR (₹)",
        region: "India",
    })
}
