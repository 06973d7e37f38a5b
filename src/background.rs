use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};
use crate::state::AppState;

/// Periodically retires sessions whose tokens can no longer verify, so the
/// active-user count reflects live sessions only.
pub async fn start_session_sweeper(state: Arc<AppState>) {
    let interval = Duration::from_secs(state.config.session_sweep_secs.max(1));
    info!("Starting session sweeper (every {:?})...", interval);

    loop {
        sleep(interval).await;
        sweep_once(&state)
            .instrument(info_span!("session_sweep"))
            .await;
    }
}

pub async fn sweep_once(state: &AppState) {
    match state.auth_service.sweep_expired_sessions().await {
        Ok(0) => {}
        Ok(count) => info!("Purged {} expired sessions", count),
        Err(e) => error!("Session sweep failed: {:?}", e),
    }
}
