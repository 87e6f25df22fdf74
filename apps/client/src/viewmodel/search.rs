//! Search tab: debounced lookup by item name.
//!
//! A blank query lists the whole menu. Each keystroke restarts the debounce
//! window, so only the last text within it reaches the repository.

use std::sync::Arc;
use std::time::Duration;

use multicourse_core::{MenuItem, PriceCurrency};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::app::Dependencies;
use crate::navigation::Navigator;
use crate::scope::{TaskSlot, ViewModelScope};
use crate::state::StateHolder;
use crate::usecases::UseCases;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub search_text: String,
    pub items: Vec<MenuItem>,
    pub currency: PriceCurrency,
}

struct Inner {
    use_cases: Arc<UseCases>,
    state: StateHolder<SearchState>,
}

pub struct SearchViewModel {
    inner: Arc<Inner>,
    navigator: Navigator,
    debounce: Duration,
    lookup: TaskSlot,
    scope: ViewModelScope,
}

impl SearchViewModel {
    pub fn new(deps: &Dependencies) -> Self {
        let vm = SearchViewModel {
            inner: Arc::new(Inner {
                use_cases: deps.use_cases.clone(),
                state: StateHolder::new(SearchState::default()),
            }),
            navigator: deps.navigator.clone(),
            debounce: deps.ui.search_debounce(),
            lookup: TaskSlot::new(),
            scope: ViewModelScope::new(),
        };

        let inner = vm.inner.clone();
        vm.lookup.launch(&vm.scope, async move {
            inner.load_currency().await;
            inner.find("").await;
        });
        vm
    }

    pub fn state(&self) -> SearchState {
        self.inner.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.inner.state.subscribe()
    }

    pub fn on_search_text_change(&self, text: &str) {
        let text = text.to_string();
        self.inner.state.update(|s| s.search_text = text.clone());

        let inner = self.inner.clone();
        self.lookup
            .debounce(&self.scope, self.debounce, async move { inner.find(&text).await });
    }

    pub fn on_details_click(&self, item_id: &str) {
        self.navigator.open_details(item_id);
    }

    pub fn on_back_click(&self) {
        self.navigator.move_back();
    }
}

impl Inner {
    async fn load_currency(&self) {
        if let Ok(currency) = self.use_cases.get_price_currency.execute().await {
            self.state.update(|s| s.currency = currency);
        }
    }

    async fn find(&self, text: &str) {
        let result = if text.trim().is_empty() {
            self.use_cases.get_menu_list.execute().await
        } else {
            self.use_cases.get_menu_items_by_name.execute(text).await
        };

        match result {
            Ok(items) => {
                debug!(query = text, found = items.len(), "Search finished");
                self.state.update(|s| s.items = items);
            }
            Err(e) => warn!(query = text, error = %e, "Search failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{deps, wait_for};
    use multicourse_domain::testing::FakeRepositories;

    fn ids(state: &SearchState) -> Vec<&str> {
        state.items.iter().map(|m| m.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_blank_query_lists_whole_menu() {
        let fakes = FakeRepositories::new();
        let (deps, _nav) = deps(&fakes);

        let vm = SearchViewModel::new(&deps);
        let state = wait_for(&mut vm.subscribe(), |s| s.items.len() == 3).await;

        assert_eq!(ids(&state), vec!["margherita", "pepperoni", "cola"]);
        assert_eq!(state.currency.name, "UAH");
    }

    #[tokio::test]
    async fn test_only_last_keystroke_is_searched() {
        let fakes = FakeRepositories::new();
        let (deps, _nav) = deps(&fakes);
        let vm = SearchViewModel::new(&deps);
        wait_for(&mut vm.subscribe(), |s| s.items.len() == 3).await;

        vm.on_search_text_change("p");
        vm.on_search_text_change("pe");
        vm.on_search_text_change("pep");
        assert_eq!(vm.state().search_text, "pep");

        let state = wait_for(&mut vm.subscribe(), |s| s.items.len() == 1).await;
        assert_eq!(ids(&state), vec!["pepperoni"]);

        vm.on_search_text_change("  ");
        wait_for(&mut vm.subscribe(), |s| s.items.len() == 3).await;
    }
}
