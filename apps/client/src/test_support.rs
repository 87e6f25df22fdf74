//! Helpers shared by view-model and navigation tests.

use std::sync::Arc;
use std::time::Duration;

use multicourse_domain::testing::FakeRepositories;
use multicourse_domain::Repositories;
use tokio::sync::{mpsc, watch};

use crate::app::Dependencies;
use crate::config::UiSettings;
use crate::navigation::{NavCommand, Navigator};
use crate::usecases::UseCases;

const WAIT: Duration = Duration::from_secs(5);

/// Dependencies over `fakes`, with short debounce windows.
pub fn deps(fakes: &FakeRepositories) -> (Dependencies, mpsc::UnboundedReceiver<NavCommand>) {
    let (navigator, rx) = Navigator::channel();
    let deps = Dependencies {
        use_cases: Arc::new(UseCases::new(&Repositories::from(fakes))),
        navigator,
        ui: UiSettings {
            search_debounce_ms: 20,
            address_debounce_ms: 20,
        },
    };
    (deps, rx)
}

/// Waits until the snapshot satisfies `pred` and returns it.
pub async fn wait_for<S: Clone>(rx: &mut watch::Receiver<S>, pred: impl FnMut(&S) -> bool) -> S {
    let snapshot = tokio::time::timeout(WAIT, rx.wait_for(pred))
        .await
        .expect("timed out waiting for state")
        .expect("state holder dropped");
    snapshot.clone()
}

pub async fn next_command(rx: &mut mpsc::UnboundedReceiver<NavCommand>) -> NavCommand {
    tokio::time::timeout(WAIT, rx.recv())
        .await
        .expect("timed out waiting for navigation")
        .expect("navigator dropped")
}
