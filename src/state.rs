use std::sync::Arc;
use chrono::Duration;
use crate::config::Config;
use crate::domain::ports::{
    ActivityRepository, BookingRepository, EventRepository, SessionRepository, UserRepository,
};
use crate::domain::services::{auth_service::AuthService, ledger::BookingLedger};

/// One storage backend's worth of repositories.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub events: Arc<dyn EventRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub activities: Arc<dyn ActivityRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub session_repo: Arc<dyn SessionRepository>,
    pub activity_repo: Arc<dyn ActivityRepository>,
    pub auth_service: Arc<AuthService>,
    pub ledger: Arc<BookingLedger>,
}

impl AppState {
    pub fn new(config: Config, repos: Repositories) -> Self {
        let auth_service = Arc::new(AuthService::new(
            repos.sessions.clone(),
            &config.jwt_secret,
            Duration::hours(config.token_ttl_hours),
        ));
        let ledger = Arc::new(BookingLedger::new(repos.events.clone(), repos.bookings.clone()));

        Self {
            config,
            user_repo: repos.users,
            event_repo: repos.events,
            booking_repo: repos.bookings,
            session_repo: repos.sessions,
            activity_repo: repos.activities,
            auth_service,
            ledger,
        }
    }
}
