use axum::{
    body::Body,
    extract::Request,
    middleware::from_fn,
    routing::{any, get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{admin, auth, booking, event, health};
use crate::api::middleware::{answer_options, create_cors_layer};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    // A known path hit with an unsupported method falls through to the API
    // description, like an unknown path does. Admin paths stay gated.
    Router::new()
        .route("/health", get(health::health_check).fallback(health::api_index))

        // Catalogue
        .route("/events", get(event::list_events).fallback(health::api_index))
        .route("/events/{id}", get(event::get_event).fallback(health::api_index))

        // Auth
        .route("/signup", post(auth::signup).fallback(health::api_index))
        .route("/signin", post(auth::signin).fallback(health::api_index))
        .route("/auth/social", post(auth::social_login).fallback(health::api_index))
        .route("/auth/logout", post(auth::logout).fallback(health::api_index))

        // Bookings
        .route("/bookings", post(booking::create_booking).fallback(health::api_index))
        .route("/user/bookings", get(booking::list_user_bookings).fallback(health::api_index))

        // Admin
        .route("/admin/stats", get(admin::get_stats).fallback(admin::admin_index))
        .route(
            "/admin/events",
            get(admin::list_events).post(admin::create_event).fallback(admin::admin_index),
        )
        .route("/admin/users", get(admin::list_users).fallback(admin::admin_index))
        .route("/admin", any(admin::admin_index))
        .route("/admin/{*rest}", any(admin::admin_index))

        .fallback(health::api_index)
        .layer(from_fn(answer_options))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(create_cors_layer())
        .with_state(state)
}
