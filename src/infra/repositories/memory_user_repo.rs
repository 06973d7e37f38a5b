use crate::domain::{models::user::User, ports::UserRepository};
use crate::error::AppError;
use super::memory_store::MemoryStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub struct MemoryUserRepo {
    store: MemoryStore,
}

impl MemoryUserRepo {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepo {
    async fn create(&self, user: &User) -> Result<User, AppError> {
        let mut tables = self.store.write().await;
        if tables.user_emails.contains_key(&user.email) || tables.users.contains_key(&user.id) {
            return Err(AppError::Conflict("User already exists with this email".into()));
        }
        tables.user_emails.insert(user.email.clone(), user.id.clone());
        tables.users.insert(user.id.clone(), user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.store.read().await.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.store.read().await;
        Ok(tables.user_emails.get(email).and_then(|id| tables.users.get(id)).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let mut users: Vec<User> = self.store.read().await.users.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn record_login(&self, id: &str, at: DateTime<Utc>) -> Result<User, AppError> {
        let mut tables = self.store.write().await;
        let user = tables.users.get_mut(id)
            .ok_or(AppError::NotFound("User not found".into()))?;
        user.last_login = Some(at);
        user.login_count += 1;
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_email_conflicts_and_logins_accumulate() {
        let repo = MemoryUserRepo::new(MemoryStore::new());
        let user = User::new("a@x.com".into(), String::new(), "A".into(), String::new());
        repo.create(&user).await.unwrap();

        let twin = User::new("a@x.com".into(), String::new(), "B".into(), String::new());
        assert!(matches!(repo.create(&twin).await, Err(AppError::Conflict(_))));

        let updated = repo.record_login(&user.id, Utc::now()).await.unwrap();
        assert_eq!(updated.login_count, 2);
        assert!(repo.record_login("missing", Utc::now()).await.is_err());
    }
}
