pub mod data_loader;

use std::collections::HashMap;
use std::future::Future;
use tokio::task::JoinHandle;

/// Manages background tasks for data loading
/// Tracks running tasks and provides cancellation support
pub struct BackgroundTaskManager {
    tasks: HashMap<String, JoinHandle<()>>,
}

impl BackgroundTaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    /// Spawn a background data loading task
    /// If a task with the same ID already exists, it will be cancelled first
    pub fn spawn_load_task<F>(&mut self, task_id: String, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        // Cancel existing task with same ID (prevents stale data)
        if let Some(handle) = self.tasks.remove(&task_id) {
            handle.abort();
        }

        // Spawn new task
        let handle = tokio::spawn(future);
        self.tasks.insert(task_id, handle);
    }

    /// Cancel a single task by ID, e.g. a pending debounced search
    pub fn cancel_task(&mut self, task_id: &str) {
        if let Some(handle) = self.tasks.remove(task_id) {
            handle.abort();
        }
    }

    /// Cancel all running tasks (used on shutdown)
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl Default for BackgroundTaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BackgroundTaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::data_loader::{DataLoader, SEARCH_DEBOUNCE};
    use crate::events::DataEvent;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use traveler_api::Client;

    // Points at a closed local port so a request that does fire fails
    // fast instead of reaching the network
    fn test_loader() -> (DataLoader, mpsc::UnboundedReceiver<DataEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let client = Arc::new(Client::with_base_url("http://127.0.0.1:9", "test-token"));
        (DataLoader::new(client, tx), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn respawning_the_search_task_aborts_the_pending_one() {
        let (loader, mut rx) = test_loader();
        let mut manager = BackgroundTaskManager::new();

        let first = loader.clone();
        manager.spawn_load_task("place-search".to_string(), async move {
            first.search_places("lou".to_string(), 1).await;
        });
        tokio::time::advance(Duration::from_millis(200)).await;

        // A newer keystroke respawns under the same task id, aborting
        // the first query mid-debounce
        let second = loader.clone();
        manager.spawn_load_task("place-search".to_string(), async move {
            second.search_places("louv".to_string(), 2).await;
        });
        tokio::time::advance(SEARCH_DEBOUNCE).await;

        let event = rx.recv().await.expect("surviving query should answer");
        match event {
            DataEvent::SearchResultsLoaded { seq, .. } | DataEvent::SearchFailed { seq, .. } => {
                assert_eq!(seq, 2)
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(rx.try_recv().is_err(), "aborted query must not answer");
    }

    #[tokio::test(start_paused = true)]
    async fn cancelling_a_pending_search_stops_it() {
        let (loader, mut rx) = test_loader();
        let mut manager = BackgroundTaskManager::new();

        let l = loader.clone();
        manager.spawn_load_task("place-search".to_string(), async move {
            l.search_places("lou".to_string(), 1).await;
        });
        tokio::time::advance(Duration::from_millis(100)).await;
        manager.cancel_task("place-search");

        tokio::time::advance(SEARCH_DEBOUNCE).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }
}
