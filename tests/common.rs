use eventhub_backend::{
    api::router::create_router,
    config::Config,
    infra::{
        factory::{connect_sqlite, memory_repositories, sqlite_repositories},
        repositories::memory_store::MemoryStore,
        seed::{seed_demo_data, DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD, DEMO_USER_EMAIL, DEMO_USER_PASSWORD},
    },
    state::{AppState, Repositories},
};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub db_filename: Option<String>,
}

fn test_config(database_url: &str) -> Config {
    Config {
        database_url: database_url.to_string(),
        port: 0,
        jwt_secret: "test-secret".to_string(),
        token_ttl_hours: 24,
        session_sweep_secs: 3600,
        seed_demo_data: true,
    }
}

#[allow(dead_code)]
impl TestApp {
    /// In-memory store with the demo accounts and sample events loaded.
    pub async fn new() -> Self {
        let config = test_config("memory");
        Self::build(config, memory_repositories(MemoryStore::new()), None).await
    }

    /// Same app over a throwaway SQLite file, removed on drop.
    pub async fn sqlite() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let pool = connect_sqlite(&db_url)
            .await
            .expect("Failed to open test db");

        let config = test_config(&db_url);
        Self::build(config, sqlite_repositories(pool), Some(db_filename)).await
    }

    async fn build(config: Config, repos: Repositories, db_filename: Option<String>) -> Self {
        let state = Arc::new(AppState::new(config, repos));
        seed_demo_data(&state).await.expect("Failed to seed demo data");

        let router = create_router(state.clone());

        Self { router, state, db_filename }
    }

    pub async fn send(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self.router.clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn signin(&self, email: &str, password: &str) -> String {
        let (status, body) = self.send("POST", "/signin", None, Some(json!({
            "email": email,
            "password": password
        }))).await;

        if status != StatusCode::OK {
            panic!("Signin failed in test helper: status {} body {}", status, body);
        }
        body["token"].as_str().expect("No token in signin response").to_string()
    }

    /// Registers a fresh account and returns (user id, token).
    pub async fn signup(&self, first_name: &str) -> (String, String) {
        let email = format!("{}-{}@example.com", first_name.to_lowercase(), Uuid::new_v4());
        let (status, body) = self.send("POST", "/signup", None, Some(json!({
            "email": email,
            "password": "secret-pass",
            "firstName": first_name,
            "lastName": "Tester"
        }))).await;

        if status != StatusCode::OK {
            panic!("Signup failed in test helper: status {} body {}", status, body);
        }
        (
            body["user"]["id"].as_str().unwrap().to_string(),
            body["token"].as_str().unwrap().to_string(),
        )
    }

    pub async fn user_token(&self) -> String {
        self.signin(DEMO_USER_EMAIL, DEMO_USER_PASSWORD).await
    }

    pub async fn admin_token(&self) -> String {
        self.signin(DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD).await
    }

    /// Creates an event through the admin API and returns its id.
    pub async fn create_event(&self, title: &str, capacity: i64, price: f64) -> String {
        let admin = self.admin_token().await;
        let (status, body) = self.send("POST", "/admin/events", Some(&admin), Some(json!({
            "title": title,
            "description": "Test event",
            "date": "2030-06-01T19:00",
            "location": "Test Hall",
            "price": price,
            "capacity": capacity,
            "category": "Concert"
        }))).await;

        if status != StatusCode::OK {
            panic!("Event creation failed in test helper: status {} body {}", status, body);
        }
        body["event"]["id"].as_str().unwrap().to_string()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(db_filename) = &self.db_filename {
            let _ = std::fs::remove_file(db_filename);
            let _ = std::fs::remove_file(format!("{}-wal", db_filename));
            let _ = std::fs::remove_file(format!("{}-shm", db_filename));
        }
    }
}
