use crate::domain::models::{
    activity::Activity, booking::{Booking, Reservation}, event::Event,
    session::UserSession, user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the email is already registered.
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    /// Stamps `last_login` and bumps `login_count`, returning the updated row.
    async fn record_login(&self, id: &str, at: DateTime<Utc>) -> Result<User, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self) -> Result<Vec<Event>, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Checks availability, decrements the event counter and stores the booking
    /// as one atomic step. Nothing is written when the check fails.
    async fn reserve(&self, booking: &Booking) -> Result<Reservation, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn list(&self) -> Result<Vec<Booking>, AppError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &UserSession) -> Result<UserSession, AppError>;
    async fn find_by_id(&self, session_id: &str) -> Result<Option<UserSession>, AppError>;
    async fn touch(&self, session_id: &str, at: DateTime<Utc>) -> Result<(), AppError>;
    /// Returns false when the session did not exist or was already inactive.
    async fn deactivate(&self, session_id: &str) -> Result<bool, AppError>;
    /// Removes every session, active or not, created before `issued_before`.
    async fn purge_issued_before(&self, issued_before: DateTime<Utc>) -> Result<u64, AppError>;
    async fn count_active(&self) -> Result<usize, AppError>;
}

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn record(&self, activity: &Activity) -> Result<(), AppError>;
    /// All entries, oldest first.
    async fn list(&self) -> Result<Vec<Activity>, AppError>;
}
