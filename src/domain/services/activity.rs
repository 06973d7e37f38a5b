use crate::domain::{models::activity::Activity, ports::ActivityRepository};
use serde_json::Value;
use tracing::{info, warn};

/// Appends to the login history. Failures are logged, never surfaced to the caller.
pub async fn track(repo: &dyn ActivityRepository, user_id: &str, action: &str, details: Value) {
    let activity = Activity::new(user_id, action, details);
    match repo.record(&activity).await {
        Ok(()) => info!("User Activity: {} - {} at {}", user_id, action, activity.timestamp.to_rfc3339()),
        Err(e) => warn!("Failed to record activity {} for {}: {:?}", action, user_id, e),
    }
}
