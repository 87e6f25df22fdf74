//! # View-model Task Scopes
//!
//! ## Lifetime Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ViewModelScope (one per screen, cancelled on drop)                     │
//! │  ├── launch(fut)          independent action tasks                      │
//! │  └── TaskSlot             one task at a time; a newer launch cancels    │
//! │      ├── launch(fut)      the previous one (validation passes)          │
//! │      └── debounce(d, fut) quiet period first (search, address lookup)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tasks never outlive their screen: every spawned future races the scope's
//! [`CancellationToken`] and is abandoned at its next suspension point once
//! the token fires.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Task group tied to one screen.
#[derive(Debug, Default)]
pub struct ViewModelScope {
    token: CancellationToken,
}

impl ViewModelScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `fut` on the runtime; it stops when the scope is cancelled.
    pub fn launch<F>(&self, fut: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        spawn_until(self.token.clone(), fut)
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }
}

impl Drop for ViewModelScope {
    fn drop(&mut self) {
        trace!("View-model scope dropped, cancelling tasks");
        self.token.cancel();
    }
}

fn spawn_until<F>(token: CancellationToken, fut: F) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            _ = fut => {}
        }
    })
}

// =============================================================================
// Task Slot
// =============================================================================

/// Holds at most one running task; launching supersedes the previous one.
#[derive(Debug, Default)]
pub struct TaskSlot {
    current: Mutex<Option<CancellationToken>>,
}

impl TaskSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the running task, if any, and starts `fut` in its place.
    pub fn launch<F>(&self, scope: &ViewModelScope, fut: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = scope.child_token();
        let previous = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }
        spawn_until(token, fut)
    }

    /// Runs `fut` after `delay` unless another launch arrives first.
    pub fn debounce<F>(&self, scope: &ViewModelScope, delay: Duration, fut: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.launch(scope, async move {
            tokio::time::sleep(delay).await;
            fut.await;
        })
    }

    pub fn cancel(&self) {
        if let Some(token) = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_dropping_scope_cancels_pending_work() {
        let ran = Arc::new(AtomicUsize::new(0));
        let scope = ViewModelScope::new();

        let counter = ran.clone();
        let handle = scope.launch(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            counter.fetch_add(1, Ordering::SeqCst);
        });

        drop(scope);
        handle.await.unwrap();
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_runs_only_last_input() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let scope = ViewModelScope::new();
        let slot = TaskSlot::new();

        let mut handles = Vec::new();
        for query in ["p", "pi", "piz"] {
            let seen = seen.clone();
            handles.push(slot.debounce(&scope, Duration::from_millis(500), async move {
                seen.lock().unwrap().push(query);
            }));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(*seen.lock().unwrap(), vec!["piz"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slot_cancel_stops_running_task() {
        let ran = Arc::new(AtomicUsize::new(0));
        let scope = ViewModelScope::new();
        let slot = TaskSlot::new();

        let counter = ran.clone();
        let handle = slot.debounce(&scope, Duration::from_millis(500), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        slot.cancel();
        handle.await.unwrap();

        assert_eq!(ran.load(Ordering::SeqCst), 0);
        assert!(!scope.is_cancelled());
    }
}
