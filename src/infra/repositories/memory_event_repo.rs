use crate::domain::{models::event::Event, ports::EventRepository};
use crate::error::AppError;
use super::memory_store::MemoryStore;
use async_trait::async_trait;

pub struct MemoryEventRepo {
    store: MemoryStore,
}

impl MemoryEventRepo {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl EventRepository for MemoryEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        let mut tables = self.store.write().await;
        if tables.events.contains_key(&event.id) {
            return Err(AppError::Conflict(format!("Event {} already exists", event.id)));
        }
        tables.events.insert(event.id.clone(), event.clone());
        Ok(event.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        Ok(self.store.read().await.events.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Event>, AppError> {
        let mut events: Vec<Event> = self.store.read().await.events.values().cloned().collect();
        events.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(events)
    }
}
