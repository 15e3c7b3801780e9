use std::collections::HashMap;
use tokio::task::JoinHandle;

/// Keyed background tasks. Spawning under an existing key aborts the old
/// task, which is also how search debouncing works: each keystroke re-keys a
/// delayed task and only the last one survives its delay.
#[derive(Default)]
pub struct TaskManager {
    tasks: HashMap<String, JoinHandle<()>>,
}

impl TaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    pub fn spawn(&mut self, key: &str, task: JoinHandle<()>) {
        if let Some(handle) = self.tasks.insert(key.to_string(), task) {
            handle.abort();
        }
    }

    pub fn abort(&mut self, key: &str) {
        if let Some(handle) = self.tasks.remove(key) {
            handle.abort();
        }
    }

    pub fn abort_all(&mut self) {
        for handle in self.tasks.values() {
            handle.abort();
        }
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn respawning_under_a_key_supersedes_the_old_task() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut tasks = TaskManager::new();

        for query in ["abc", "abcd"] {
            let fired = fired.clone();
            let query = query.to_string();
            tasks.spawn(
                "debounce",
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(300)).await;
                    let _ = query;
                    fired.fetch_add(1, Ordering::SeqCst);
                }),
            );
            settle().await;
        }

        tokio::time::advance(Duration::from_millis(400)).await;
        settle().await;

        // Only the superseding task's delay elapsed.
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn abort_cancels_a_pending_task() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut tasks = TaskManager::new();

        let flag = fired.clone();
        tasks.spawn(
            "fetch",
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(100)).await;
                flag.fetch_add(1, Ordering::SeqCst);
            }),
        );
        settle().await;
        tasks.abort("fetch");

        tokio::time::advance(Duration::from_millis(200)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
