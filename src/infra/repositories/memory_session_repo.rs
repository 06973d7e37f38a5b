use crate::domain::{models::session::UserSession, ports::SessionRepository};
use crate::error::AppError;
use super::memory_store::MemoryStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub struct MemorySessionRepo {
    store: MemoryStore,
}

impl MemorySessionRepo {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepo {
    async fn create(&self, session: &UserSession) -> Result<UserSession, AppError> {
        self.store.write().await.sessions.insert(session.session_id.clone(), session.clone());
        Ok(session.clone())
    }

    async fn find_by_id(&self, session_id: &str) -> Result<Option<UserSession>, AppError> {
        Ok(self.store.read().await.sessions.get(session_id).cloned())
    }

    async fn touch(&self, session_id: &str, at: DateTime<Utc>) -> Result<(), AppError> {
        if let Some(session) = self.store.write().await.sessions.get_mut(session_id) {
            session.last_activity = at;
        }
        Ok(())
    }

    async fn deactivate(&self, session_id: &str) -> Result<bool, AppError> {
        let mut tables = self.store.write().await;
        match tables.sessions.get_mut(session_id) {
            Some(session) if session.is_active => {
                session.is_active = false;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn purge_issued_before(&self, issued_before: DateTime<Utc>) -> Result<u64, AppError> {
        let mut tables = self.store.write().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|_, session| session.created_at >= issued_before);
        Ok((before - tables.sessions.len()) as u64)
    }

    async fn count_active(&self) -> Result<usize, AppError> {
        Ok(self.store.read().await.sessions.values().filter(|s| s.is_active).count())
    }
}
