use std::{env, time::Duration};

use tokio::time;
use tracing::{debug, info};

use crate::repository::SharedRepository;

fn env_secs(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Periodically evicts games nobody has touched for a while. Runs until the
/// process exits.
pub async fn start_cleanup_task(repository: SharedRepository) {
    let cleanup_interval_secs = env_secs("CLEANUP_INTERVAL_SECONDS", 60);
    let idle_timeout_secs = env_secs("IDLE_GAME_TIMEOUT_SECONDS", 600);

    let mut interval = time::interval(Duration::from_secs(cleanup_interval_secs));
    let idle_timeout = Duration::from_secs(idle_timeout_secs);

    info!(
        "started game cleanup task: checking every {}s, idle timeout {}s",
        cleanup_interval_secs, idle_timeout_secs
    );

    loop {
        interval.tick().await;

        let removed = repository.sweep_idle(idle_timeout);
        for id in &removed {
            debug!("evicted idle game {}", id);
        }
        if !removed.is_empty() {
            info!("evicted {} idle games", removed.len());
        }
    }
}
