use crate::domain::{models::activity::Activity, ports::ActivityRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

pub struct SqliteActivityRepo { pool: SqlitePool }
impl SqliteActivityRepo { pub fn new(pool: SqlitePool) -> Self { Self { pool } } }

fn map_row(row: &SqliteRow) -> Result<Activity, AppError> {
    let details: String = row.try_get("details").map_err(AppError::Database)?;
    let timestamp: DateTime<Utc> = row.try_get("timestamp").map_err(AppError::Database)?;
    Ok(Activity {
        id: row.try_get("id").map_err(AppError::Database)?,
        user_id: row.try_get("user_id").map_err(AppError::Database)?,
        action: row.try_get("action").map_err(AppError::Database)?,
        timestamp,
        details: serde_json::from_str(&details)
            .map_err(|e| AppError::InternalWithMsg(format!("Corrupt activity details: {}", e)))?,
    })
}

#[async_trait]
impl ActivityRepository for SqliteActivityRepo {
    async fn record(&self, activity: &Activity) -> Result<(), AppError> {
        sqlx::query("INSERT INTO activities (id, user_id, action, timestamp, details) VALUES (?, ?, ?, ?, ?)")
            .bind(&activity.id)
            .bind(&activity.user_id)
            .bind(&activity.action)
            .bind(activity.timestamp)
            .bind(activity.details.to_string())
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Activity>, AppError> {
        let rows = sqlx::query("SELECT id, user_id, action, timestamp, details FROM activities ORDER BY timestamp ASC, id ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;
        rows.iter().map(map_row).collect()
    }
}
