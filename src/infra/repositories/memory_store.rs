use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use crate::domain::models::{
    activity::Activity, booking::Booking, event::Event, session::UserSession, user::User,
};

/// Process-local tables shared by the memory repositories.
///
/// A single lock covers every table, so a repository holding the write guard
/// sees and mutates a consistent view (the booking reserve relies on this).
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

#[derive(Default)]
pub struct Tables {
    pub users: HashMap<String, User>,
    pub user_emails: HashMap<String, String>,
    pub events: HashMap<String, Event>,
    pub bookings: Vec<Booking>,
    pub sessions: HashMap<String, UserSession>,
    pub activities: Vec<Activity>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}
