use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const EMAIL_PROVIDER: &str = "email";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub login_count: i32,
    pub is_email_verified: bool,
    pub auth_provider: String,
}

impl User {
    /// A fresh email/password account. Sign-up counts as the first login.
    pub fn new(email: String, password_hash: String, first_name: String, last_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            password_hash,
            first_name,
            last_name,
            is_admin: false,
            created_at: now,
            last_login: Some(now),
            login_count: 1,
            is_email_verified: false,
            auth_provider: EMAIL_PROVIDER.to_string(),
        }
    }

    pub fn is_social(&self) -> bool {
        self.auth_provider != EMAIL_PROVIDER
    }

    pub fn display_name(&self) -> &str {
        if self.first_name.is_empty() { "User" } else { &self.first_name }
    }
}
