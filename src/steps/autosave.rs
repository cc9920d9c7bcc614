//! Debounced auto-save — a cancellable scheduled commit.
//!
//! At most one commit is pending at a time: scheduling a new one aborts the
//! previous task, so rapid edits within the debounce window coalesce into a
//! single store write.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Owns the pending auto-save task for one active step controller.
#[derive(Debug)]
pub struct AutoSave {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl AutoSave {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Run `commit` after the debounce window, superseding any pending commit.
    pub fn schedule<F>(&mut self, commit: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            commit.await;
        }));
    }

    /// Abort the pending commit, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                handle.abort();
            }
        }
    }

    /// Whether a commit is scheduled and has not run yet.
    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for AutoSave {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn commits_after_the_debounce_window() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut autosave = AutoSave::new(Duration::from_millis(400));

        let counter = Arc::clone(&hits);
        autosave.schedule(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(399)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(!autosave.has_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_edits_coalesce_into_one_commit() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut autosave = AutoSave::new(Duration::from_millis(400));

        for _ in 0..5 {
            let counter = Arc::clone(&hits);
            autosave.schedule(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_the_pending_commit() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut autosave = AutoSave::new(Duration::from_millis(400));

        let counter = Arc::clone(&hits);
        autosave.schedule(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(autosave.has_pending());

        autosave.cancel();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(!autosave.has_pending());
    }
}
