use crate::state::messages::LoaderRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Re-reads the tournament file on a fixed period so edits show up live.
/// Unchanged data is cheap: the session keeps its cached layout.
pub struct PeriodicRefresher {
    loader_requests: mpsc::Sender<LoaderRequest>,
    every: Duration,
}

impl PeriodicRefresher {
    pub fn new(loader_requests: mpsc::Sender<LoaderRequest>, every: Duration) -> Self {
        Self { loader_requests, every }
    }

    pub async fn run(self) {
        let mut reload_interval = interval(self.every);
        // Skip the immediate first tick so startup loading isn't double-triggered.
        reload_interval.tick().await;

        loop {
            reload_interval.tick().await;
            if self.loader_requests.send(LoaderRequest::Reload).await.is_err() {
                break;
            }
        }
    }
}
