//! Favourites tab. Follows the favourites table; every write re-queries.

use std::sync::Arc;

use multicourse_core::{MenuItem, PriceCurrency};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::app::Dependencies;
use crate::navigation::Navigator;
use crate::scope::ViewModelScope;
use crate::state::StateHolder;
use crate::usecases::UseCases;

#[derive(Debug, Clone, PartialEq)]
pub struct FavouritesState {
    pub items: Vec<MenuItem>,
    pub currency: PriceCurrency,
    pub is_loading: bool,
}

impl Default for FavouritesState {
    fn default() -> Self {
        FavouritesState {
            items: Vec::new(),
            currency: PriceCurrency::default(),
            is_loading: true,
        }
    }
}

struct Inner {
    use_cases: Arc<UseCases>,
    state: StateHolder<FavouritesState>,
}

pub struct FavouritesViewModel {
    inner: Arc<Inner>,
    navigator: Navigator,
    scope: ViewModelScope,
}

impl FavouritesViewModel {
    pub fn new(deps: &Dependencies) -> Self {
        let vm = FavouritesViewModel {
            inner: Arc::new(Inner {
                use_cases: deps.use_cases.clone(),
                state: StateHolder::new(FavouritesState::default()),
            }),
            navigator: deps.navigator.clone(),
            scope: ViewModelScope::new(),
        };

        let inner = vm.inner.clone();
        vm.scope.launch(async move { inner.observe().await });
        vm
    }

    pub fn state(&self) -> FavouritesState {
        self.inner.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<FavouritesState> {
        self.inner.state.subscribe()
    }

    pub fn on_favourite_item_click(&self, item_id: &str) {
        self.navigator.open_details(item_id);
    }

    pub fn on_back_click(&self) {
        self.navigator.move_back();
    }
}

impl Inner {
    /// Runs until the scope is cancelled.
    async fn observe(&self) {
        if let Ok(currency) = self.use_cases.get_price_currency.execute().await {
            self.state.update(|s| s.currency = currency);
        }

        // Subscribed before the first read; a write in between still wakes the loop.
        let mut changes = self.use_cases.get_favourite_menu_items.subscribe();
        loop {
            match self.use_cases.get_favourite_menu_items.execute().await {
                Ok(items) => {
                    debug!(count = items.len(), "Favourites refreshed");
                    self.state.update(|s| {
                        s.items = items;
                        s.is_loading = false;
                    });
                }
                Err(e) => {
                    warn!(error = %e, "Could not load favourites");
                    self.state.update(|s| s.is_loading = false);
                }
            }

            if changes.changed().await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavCommand;
    use crate::test_support::{deps, next_command, wait_for};
    use multicourse_domain::testing::FakeRepositories;

    #[tokio::test]
    async fn test_follows_favourite_writes() {
        let fakes = FakeRepositories::new();
        fakes.state().favourites = vec!["cola".into()];
        let (deps, _nav) = deps(&fakes);

        let vm = FavouritesViewModel::new(&deps);
        let state = wait_for(&mut vm.subscribe(), |s| !s.is_loading).await;
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id, "cola");

        deps.use_cases
            .add_to_favourite
            .execute("margherita")
            .await
            .unwrap();
        let state = wait_for(&mut vm.subscribe(), |s| s.items.len() == 2).await;
        assert_eq!(state.items[1].id, "margherita");

        deps.use_cases
            .remove_from_favourite
            .execute("cola")
            .await
            .unwrap();
        let state = wait_for(&mut vm.subscribe(), |s| s.items.len() == 1).await;
        assert_eq!(state.items[0].id, "margherita");
    }

    #[tokio::test]
    async fn test_navigation() {
        let fakes = FakeRepositories::new();
        let (deps, mut nav) = deps(&fakes);
        let vm = FavouritesViewModel::new(&deps);

        vm.on_favourite_item_click("cola");
        vm.on_back_click();

        assert_eq!(
            next_command(&mut nav).await,
            NavCommand::ShowDialog(multicourse_core::navigation::Configuration::Details {
                id: "cola".into()
            })
        );
        assert_eq!(next_command(&mut nav).await, NavCommand::Pop);
    }
}
