mod common;

use axum::http::StatusCode;
use common::TestApp;
use eventhub_backend::domain::services::ledger::NewBooking;
use serde_json::json;
use tokio::task::JoinSet;

const CAPACITY: i64 = 20;
const ATTEMPTS: usize = 60;

async fn race_for_tickets(app: &TestApp) {
    let event_id = app.create_event("Race Night", CAPACITY, 100.0).await;

    let mut set = JoinSet::new();
    for i in 0..ATTEMPTS {
        let ledger = app.state.ledger.clone();
        let event_id = event_id.clone();
        set.spawn(async move {
            ledger.create_booking(&format!("racer-{}", i), NewBooking {
                event_id,
                quantity: 1,
                total_amount: None,
            }).await
        });
    }

    let mut confirmed = 0;
    let mut rejected = 0;
    while let Some(res) = set.join_next().await {
        match res.unwrap() {
            Ok(_) => confirmed += 1,
            Err(e) => {
                assert!(e.to_string().contains("Not enough tickets available"), "unexpected error: {}", e);
                rejected += 1;
            }
        }
    }

    assert_eq!(confirmed, CAPACITY as usize, "exactly capacity bookings should win");
    assert_eq!(rejected, ATTEMPTS - CAPACITY as usize);

    let event = app.state.event_repo.find_by_id(&event_id).await.unwrap().unwrap();
    assert_eq!(event.available_tickets, 0);

    let booked: i32 = app.state.booking_repo.list().await.unwrap()
        .iter()
        .filter(|b| b.event_id == event_id)
        .map(|b| b.quantity)
        .sum();
    assert_eq!(i64::from(booked), CAPACITY);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_memory_store_never_oversells() {
    let app = TestApp::new().await;
    race_for_tickets(&app).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sqlite_store_never_oversells() {
    let app = TestApp::sqlite().await;
    race_for_tickets(&app).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_http_bookings_respect_inventory() {
    let app = TestApp::new().await;
    let token = app.user_token().await;
    let event_id = app.create_event("Burst Gig", 5, 100.0).await;

    let mut set = JoinSet::new();
    for _ in 0..15 {
        let router = app.router.clone();
        let token = token.clone();
        let event_id = event_id.clone();
        set.spawn(async move {
            use axum::{body::Body, http::{header, Request}};
            use tower::ServiceExt;

            let res = router.oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/bookings")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({ "eventId": event_id, "quantity": 1 }).to_string()))
                    .unwrap()
            ).await.unwrap();
            res.status()
        });
    }

    let mut ok = 0;
    while let Some(status) = set.join_next().await {
        match status.unwrap() {
            StatusCode::OK => ok += 1,
            other => assert_eq!(other, StatusCode::BAD_REQUEST),
        }
    }
    assert_eq!(ok, 5);

    let (_, event) = app.send("GET", &format!("/events/{}", event_id), None, None).await;
    assert_eq!(event["event"]["availableTickets"], 0);
}
