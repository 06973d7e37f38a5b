use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

pub const ACTION_SIGNUP: &str = "signup";
pub const ACTION_LOGIN: &str = "login";
pub const ACTION_FAILED_LOGIN: &str = "failed_login";
pub const ACTION_LOGOUT: &str = "logout";

/// Failed logins for unregistered emails are filed under this user id.
pub const UNKNOWN_USER: &str = "unknown";

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub user_id: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub details: Value,
}

impl Activity {
    pub fn new(user_id: &str, action: &str, details: Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            action: action.to_string(),
            timestamp: Utc::now(),
            details,
        }
    }
}
