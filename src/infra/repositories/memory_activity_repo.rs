use crate::domain::{models::activity::Activity, ports::ActivityRepository};
use crate::error::AppError;
use super::memory_store::MemoryStore;
use async_trait::async_trait;

pub struct MemoryActivityRepo {
    store: MemoryStore,
}

impl MemoryActivityRepo {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActivityRepository for MemoryActivityRepo {
    async fn record(&self, activity: &Activity) -> Result<(), AppError> {
        self.store.write().await.activities.push(activity.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Activity>, AppError> {
        Ok(self.store.read().await.activities.clone())
    }
}
