mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_admin_routes_reject_non_admins() {
    let app = TestApp::new().await;
    let user = app.user_token().await;

    for uri in ["/admin/stats", "/admin/users", "/admin/events"] {
        let (status, body) = app.send("GET", uri, Some(&user), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);
        assert_eq!(body["error"], "Admin access required");

        let (status, _) = app.send("GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
    }

    let (status, _) = app.send("POST", "/admin/events", Some(&user), Some(json!({
        "title": "Sneaky", "date": "2030-01-01", "location": "X", "price": 1
    }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, events) = app.send("GET", "/events", None, None).await;
    assert_eq!(events["events"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_stats_reflect_bookings_and_signups() {
    let app = TestApp::new().await;
    let (_, token) = app.signup("Ravi").await;

    app.send("POST", "/bookings", Some(&token), Some(json!({ "eventId": "3", "quantity": 25 }))).await;
    app.send("POST", "/bookings", Some(&token), Some(json!({ "eventId": "5", "quantity": 2 }))).await;

    let admin = app.admin_token().await;
    let (status, stats) = app.send("GET", "/admin/stats", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(stats["totalEvents"], 5);
    assert_eq!(stats["totalBookings"], 2);
    assert_eq!(stats["totalRevenue"], 25.0 * 1500.0 + 2.0 * 300.0);
    // Event "3" is now sold out.
    assert_eq!(stats["activeEvents"], 4);
    assert_eq!(stats["totalUsers"], 3);
    assert_eq!(stats["activeUsers"], 2);
    assert_eq!(stats["totalSignups"], 1);
    assert_eq!(stats["todaySignups"], 1);

    let recent = stats["recentActivity"].as_array().unwrap();
    assert!(!recent.is_empty() && recent.len() <= 10);
    assert_eq!(recent[0]["action"], "login");
}

#[tokio::test]
async fn test_admin_users_include_analytics() {
    let app = TestApp::new().await;
    app.send("POST", "/auth/social", None, Some(json!({ "provider": "google" }))).await;

    let admin = app.admin_token().await;
    let (status, body) = app.send("GET", "/admin/users", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 3);
    assert!(users.iter().all(|u| u.get("passwordHash").is_none()));
    assert_eq!(body["stats"]["adminUsers"], 1);
    assert_eq!(body["stats"]["socialUsers"], 1);
    assert_eq!(body["stats"]["verifiedUsers"], 1);
    assert_eq!(body["signupStats"]["total"], 1);
}

#[tokio::test]
async fn test_create_event_defaults_and_listing() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, body) = app.send("POST", "/admin/events", Some(&admin), Some(json!({
        "title": "Open Mic",
        "date": "2030-02-14",
        "location": "Cafe Mondegar, Mumbai",
        "price": "350"
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let event = &body["event"];
    assert_eq!(event["totalTickets"], 100);
    assert_eq!(event["availableTickets"], 100);
    assert_eq!(event["price"], 350.0);
    assert_eq!(event["type"], "General");
    assert_eq!(event["status"], "active");
    let id = event["id"].as_str().unwrap().to_string();

    let (status, body) = app.send("GET", "/admin/events", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 6);
    let created = events.iter().find(|e| e["id"] == id.as_str()).unwrap();
    assert_eq!(created["bookingsCount"], 0);
    assert_eq!(created["capacity"], 100);
    assert_eq!(created["category"], "General");

    let (_, public) = app.send("GET", &format!("/events/{}", id), None, None).await;
    assert_eq!(public["event"]["title"], "Open Mic");
}

#[tokio::test]
async fn test_create_event_validation() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let cases = [
        (json!({ "date": "2030-01-01", "location": "X", "price": 10 }), "Title, date, location, and price are required"),
        (json!({ "title": "T", "date": "2030-01-01", "location": "X" }), "Title, date, location, and price are required"),
        (json!({ "title": "T", "date": "2030-01-01", "location": "X", "price": "free" }), "Price must be a number"),
        (json!({ "title": "T", "date": "someday", "location": "X", "price": 10 }), "Invalid date format"),
        (json!({ "title": "T", "date": "2030-01-01", "location": "X", "price": 10, "capacity": -5 }), "Capacity must be positive"),
    ];

    for (payload, expected) in cases {
        let (status, body) = app.send("POST", "/admin/events", Some(&admin), Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], expected);
    }
}

#[tokio::test]
async fn test_unknown_admin_paths_are_gated() {
    let app = TestApp::new().await;
    let user = app.user_token().await;
    let admin = app.admin_token().await;

    for uri in ["/admin", "/admin/anything", "/admin/reports/2025"] {
        let (status, body) = app.send("GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["error"], "Authorization required");

        let (status, _) = app.send("GET", uri, Some(&user), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);

        let (status, body) = app.send("GET", uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body["path"], uri);
    }
}

#[tokio::test]
async fn test_admin_paths_with_other_methods_stay_gated() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, _) = app.send("POST", "/admin/stats", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.send("DELETE", "/admin/events", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["path"], "/admin/events");
    assert_eq!(body["method"], "DELETE");
}

#[tokio::test]
async fn test_create_event_rejects_mistyped_capacity_with_json_error() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, body) = app.send("POST", "/admin/events", Some(&admin), Some(json!({
        "title": "Form Post",
        "date": "2030-01-01",
        "location": "X",
        "price": 10,
        "capacity": "50"
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("capacity"));
}
