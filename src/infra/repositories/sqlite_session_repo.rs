use crate::domain::{models::session::UserSession, ports::SessionRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct SqliteSessionRepo { pool: SqlitePool }
impl SqliteSessionRepo { pub fn new(pool: SqlitePool) -> Self { Self { pool } } }

#[async_trait]
impl SessionRepository for SqliteSessionRepo {
    async fn create(&self, session: &UserSession) -> Result<UserSession, AppError> {
        sqlx::query_as::<_, UserSession>(
            "INSERT INTO user_sessions (session_id, user_id, created_at, last_activity, is_active) VALUES (?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&session.session_id)
            .bind(&session.user_id)
            .bind(session.created_at)
            .bind(session.last_activity)
            .bind(session.is_active)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, session_id: &str) -> Result<Option<UserSession>, AppError> {
        sqlx::query_as::<_, UserSession>("SELECT * FROM user_sessions WHERE session_id = ?")
            .bind(session_id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn touch(&self, session_id: &str, at: DateTime<Utc>) -> Result<(), AppError> {
        sqlx::query("UPDATE user_sessions SET last_activity = ? WHERE session_id = ?")
            .bind(at)
            .bind(session_id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn deactivate(&self, session_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE user_sessions SET is_active = 0 WHERE session_id = ? AND is_active = 1")
            .bind(session_id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }

    async fn purge_issued_before(&self, issued_before: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE created_at < ?")
            .bind(issued_before)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }

    async fn count_active(&self) -> Result<usize, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_sessions WHERE is_active = 1")
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(count as usize)
    }
}
