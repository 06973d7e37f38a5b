use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::error::AppError;
use crate::infra::seed::seed_demo_data;
use crate::state::{AppState, Repositories};
use crate::infra::repositories::{
    memory_store::MemoryStore,
    memory_activity_repo::MemoryActivityRepo, memory_booking_repo::MemoryBookingRepo,
    memory_event_repo::MemoryEventRepo, memory_session_repo::MemorySessionRepo,
    memory_user_repo::MemoryUserRepo,
    sqlite_activity_repo::SqliteActivityRepo, sqlite_booking_repo::SqliteBookingRepo,
    sqlite_event_repo::SqliteEventRepo, sqlite_session_repo::SqliteSessionRepo,
    sqlite_user_repo::SqliteUserRepo,
};

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let repos = if config.uses_memory_store() {
        info!("Initializing in-memory store...");
        memory_repositories(MemoryStore::new())
    } else if config.database_url.starts_with("sqlite:") {
        info!("Initializing SQLite connection with WAL Mode...");
        let pool = connect_sqlite(&config.database_url).await?;
        sqlite_repositories(pool)
    } else {
        return Err(AppError::Config(format!(
            "Unsupported DATABASE_URL (expected `memory` or `sqlite:`): {}",
            config.database_url
        )));
    };

    let state = AppState::new(config.clone(), repos);

    if config.seed_demo_data {
        seed_demo_data(&state).await?;
    }

    Ok(state)
}

pub fn memory_repositories(store: MemoryStore) -> Repositories {
    Repositories {
        users: Arc::new(MemoryUserRepo::new(store.clone())),
        events: Arc::new(MemoryEventRepo::new(store.clone())),
        bookings: Arc::new(MemoryBookingRepo::new(store.clone())),
        sessions: Arc::new(MemorySessionRepo::new(store.clone())),
        activities: Arc::new(MemoryActivityRepo::new(store)),
    }
}

pub fn sqlite_repositories(pool: SqlitePool) -> Repositories {
    Repositories {
        users: Arc::new(SqliteUserRepo::new(pool.clone())),
        events: Arc::new(SqliteEventRepo::new(pool.clone())),
        bookings: Arc::new(SqliteBookingRepo::new(pool.clone())),
        sessions: Arc::new(SqliteSessionRepo::new(pool.clone())),
        activities: Arc::new(SqliteActivityRepo::new(pool)),
    }
}

pub async fn connect_sqlite(database_url: &str) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;

    sqlx::migrate!("./migrations/sqlite").run(&pool).await?;
    Ok(pool)
}
