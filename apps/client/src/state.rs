//! Latest-wins screen state.

use std::sync::Arc;

use tokio::sync::watch;

/// Snapshot of one screen's state.
///
/// Updates replace the whole snapshot atomically; subscribers always see the
/// newest value and may skip intermediate ones.
#[derive(Debug)]
pub struct StateHolder<S> {
    tx: Arc<watch::Sender<S>>,
}

impl<S> Clone for StateHolder<S> {
    fn clone(&self) -> Self {
        StateHolder {
            tx: self.tx.clone(),
        }
    }
}

impl<S: Clone> StateHolder<S> {
    pub fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        StateHolder { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> S {
        self.tx.borrow().clone()
    }

    /// Reads a projection without cloning the whole snapshot.
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.tx.borrow())
    }

    pub fn update(&self, f: impl FnOnce(&mut S)) {
        self.tx.send_modify(f);
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_see_latest_snapshot() {
        let holder = StateHolder::new(0u32);
        let mut rx = holder.subscribe();

        holder.update(|v| *v = 1);
        holder.update(|v| *v += 1);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 2);
        assert_eq!(holder.get(), 2);
        assert!(holder.with(|v| *v == 2));
    }
}
