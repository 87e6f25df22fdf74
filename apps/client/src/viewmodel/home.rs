//! Home screen: category strip and the menu of the selected category.
//!
//! ## Startup
//! ```text
//! sync catalog ──fail──► network message, stop
//!      │
//!      ▼
//! currency ─► categories ─► select first ─► menu of category
//!      │
//!      ▼
//! ordering open? ──no──► warning message
//! ```

use std::sync::Arc;

use multicourse_core::{Category, MenuItem, PriceCurrency};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::app::Dependencies;
use crate::messages::{NETWORK_ERROR, ORDERING_UNAVAILABLE, UNKNOWN_ERROR};
use crate::navigation::Navigator;
use crate::scope::ViewModelScope;
use crate::state::StateHolder;
use crate::usecases::UseCases;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryUi {
    pub category: Category,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeState {
    pub categories: Vec<CategoryUi>,
    pub menu_items: Vec<MenuItem>,
    pub currency: PriceCurrency,
    pub error_message: Option<String>,
    pub is_loading: bool,
}

impl Default for HomeState {
    fn default() -> Self {
        HomeState {
            categories: Vec::new(),
            menu_items: Vec::new(),
            currency: PriceCurrency::default(),
            error_message: None,
            is_loading: true,
        }
    }
}

impl HomeState {
    pub fn selected_category(&self) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.selected)
            .map(|c| &c.category)
    }
}

struct Inner {
    use_cases: Arc<UseCases>,
    state: StateHolder<HomeState>,
}

pub struct HomeViewModel {
    inner: Arc<Inner>,
    navigator: Navigator,
    scope: ViewModelScope,
}

impl HomeViewModel {
    pub fn new(deps: &Dependencies) -> Self {
        let vm = HomeViewModel {
            inner: Arc::new(Inner {
                use_cases: deps.use_cases.clone(),
                state: StateHolder::new(HomeState::default()),
            }),
            navigator: deps.navigator.clone(),
            scope: ViewModelScope::new(),
        };

        let inner = vm.inner.clone();
        vm.scope.launch(async move { inner.load_data().await });
        vm
    }

    pub fn state(&self) -> HomeState {
        self.inner.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<HomeState> {
        self.inner.state.subscribe()
    }

    pub fn select_category(&self, category_id: &str) {
        let inner = self.inner.clone();
        let category_id = category_id.to_string();
        self.scope
            .launch(async move { inner.select_category(&category_id).await });
    }

    pub fn on_list_item_click(&self, item_id: &str) {
        self.navigator.open_details(item_id);
    }

    pub fn on_location_click(&self) {
        self.navigator.open_about();
    }

    pub fn hide_error(&self) {
        self.inner.state.update(|s| s.error_message = None);
    }
}

impl Inner {
    async fn load_data(&self) {
        if let Err(e) = self.use_cases.sync_data.execute().await {
            warn!(error = %e, "Catalog sync failed");
            self.state.update(|s| {
                if s.error_message.is_none() {
                    s.error_message = Some(NETWORK_ERROR.to_string());
                }
                s.is_loading = false;
            });
            return;
        }

        self.load_price_currency().await;
        self.load_categories().await;

        match self.use_cases.check_is_order_available.execute().await {
            Ok(true) => {}
            Ok(false) => self.show_error(ORDERING_UNAVAILABLE),
            Err(e) => {
                warn!(error = %e, "Could not read restaurant status");
                self.show_error(UNKNOWN_ERROR);
            }
        }
    }

    async fn load_price_currency(&self) {
        if let Ok(currency) = self.use_cases.get_price_currency.execute().await {
            self.state.update(|s| s.currency = currency);
        }
    }

    async fn load_categories(&self) {
        let categories = match self.use_cases.get_menu_categories.execute().await {
            Ok(categories) => categories,
            Err(e) => {
                warn!(error = %e, "Could not load categories");
                self.state.update(|s| s.is_loading = false);
                return;
            }
        };

        let first = categories.first().map(|c| c.id.clone());
        self.state.update(|s| {
            s.categories = categories
                .into_iter()
                .map(|category| CategoryUi {
                    category,
                    selected: false,
                })
                .collect();
        });

        match first {
            Some(id) => self.select_category(&id).await,
            None => self.state.update(|s| s.is_loading = false),
        }
    }

    async fn select_category(&self, category_id: &str) {
        debug!(category_id, "Category selected");
        self.state.update(|s| {
            for c in &mut s.categories {
                c.selected = c.category.id == category_id;
            }
        });

        let result = self
            .use_cases
            .get_menu_by_category_id
            .execute(category_id)
            .await;
        self.state.update(|s| {
            if let Ok(items) = result {
                s.menu_items = items;
            }
            s.is_loading = false;
        });
    }

    fn show_error(&self, message: &str) {
        self.state
            .update(|s| s.error_message = Some(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavCommand;
    use crate::test_support::{deps, next_command, wait_for};
    use multicourse_core::navigation::Configuration;
    use multicourse_domain::testing::{FakeRepositories, CALL_SYNC};

    #[tokio::test]
    async fn test_loads_catalog_and_selects_first_category() {
        let fakes = FakeRepositories::new();
        let (deps, _nav) = deps(&fakes);

        let vm = HomeViewModel::new(&deps);
        let state = wait_for(&mut vm.subscribe(), |s| !s.is_loading).await;

        assert_eq!(fakes.calls()[0], CALL_SYNC);
        assert_eq!(state.categories.len(), 2, "desserts has no items");
        assert_eq!(state.selected_category().unwrap().id, "pizza");
        assert_eq!(state.menu_items.len(), 2);
        assert_eq!(state.currency.name, "UAH");
    }

    #[tokio::test]
    async fn test_sync_failure_shows_network_message() {
        let fakes = FakeRepositories::new();
        fakes.state().offline = true;
        let (deps, _nav) = deps(&fakes);

        let vm = HomeViewModel::new(&deps);
        let state = wait_for(&mut vm.subscribe(), |s| s.error_message.is_some()).await;

        assert_eq!(state.error_message.as_deref(), Some(NETWORK_ERROR));
        assert!(state.categories.is_empty());

        vm.hide_error();
        assert_eq!(vm.state().error_message, None);
    }

    #[tokio::test]
    async fn test_warns_when_restaurant_is_closed() {
        let fakes = FakeRepositories::new();
        fakes.state().can_order = false;
        let (deps, _nav) = deps(&fakes);

        let vm = HomeViewModel::new(&deps);
        let state = wait_for(&mut vm.subscribe(), |s| s.error_message.is_some()).await;

        assert_eq!(state.error_message.as_deref(), Some(ORDERING_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_select_category_swaps_menu() {
        let fakes = FakeRepositories::new();
        let (deps, _nav) = deps(&fakes);
        let vm = HomeViewModel::new(&deps);
        wait_for(&mut vm.subscribe(), |s| !s.is_loading).await;

        vm.select_category("drinks");
        let state = wait_for(&mut vm.subscribe(), |s| {
            s.menu_items.iter().all(|m| m.category_id == "drinks")
        })
        .await;

        assert_eq!(state.selected_category().unwrap().id, "drinks");
        assert_eq!(state.menu_items[0].id, "cola");
    }

    #[tokio::test]
    async fn test_clicks_open_dialogs() {
        let fakes = FakeRepositories::new();
        let (deps, mut nav) = deps(&fakes);
        let vm = HomeViewModel::new(&deps);

        vm.on_list_item_click("pepperoni");
        vm.on_location_click();

        assert_eq!(
            next_command(&mut nav).await,
            NavCommand::ShowDialog(Configuration::Details {
                id: "pepperoni".into()
            })
        );
        assert_eq!(
            next_command(&mut nav).await,
            NavCommand::ShowDialog(Configuration::About)
        );
    }
}
