//! Bottom navigation bar. Highlights the tab of the active root screen.

use multicourse_core::navigation::Configuration;
use tokio::sync::watch;

use crate::navigation::Navigator;
use crate::scope::ViewModelScope;
use crate::state::StateHolder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BottomBarTab {
    Home,
    Search,
    Favourites,
    Cart,
}

impl BottomBarTab {
    pub const ALL: [BottomBarTab; 4] = [
        BottomBarTab::Home,
        BottomBarTab::Search,
        BottomBarTab::Favourites,
        BottomBarTab::Cart,
    ];

    /// Root stack entry the tab brings to front.
    pub fn configuration(&self) -> Configuration {
        match self {
            BottomBarTab::Home => Configuration::Home,
            BottomBarTab::Search => Configuration::Search,
            BottomBarTab::Favourites => Configuration::Favourites,
            BottomBarTab::Cart => Configuration::CartNav,
        }
    }

    pub fn for_configuration(config: &Configuration) -> Option<BottomBarTab> {
        match config {
            Configuration::Home => Some(BottomBarTab::Home),
            Configuration::Search => Some(BottomBarTab::Search),
            Configuration::Favourites => Some(BottomBarTab::Favourites),
            Configuration::CartNav => Some(BottomBarTab::Cart),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BottomBarState {
    pub selected: Option<BottomBarTab>,
}

pub struct BottomBarViewModel {
    state: StateHolder<BottomBarState>,
    navigator: Navigator,
    scope: ViewModelScope,
}

impl BottomBarViewModel {
    pub fn new(navigator: Navigator, mut active: watch::Receiver<Configuration>) -> Self {
        let selected = BottomBarTab::for_configuration(&active.borrow_and_update());
        let vm = BottomBarViewModel {
            state: StateHolder::new(BottomBarState { selected }),
            navigator,
            scope: ViewModelScope::new(),
        };

        let state = vm.state.clone();
        vm.scope.launch(async move {
            while active.changed().await.is_ok() {
                let selected = BottomBarTab::for_configuration(&active.borrow_and_update());
                state.update(|s| s.selected = selected);
            }
        });
        vm
    }

    pub fn state(&self) -> BottomBarState {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<BottomBarState> {
        self.state.subscribe()
    }

    pub fn on_tab_click(&self, tab: BottomBarTab) {
        self.navigator.bring_to_front(tab.configuration());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavCommand;
    use crate::test_support::{next_command, wait_for};

    #[tokio::test]
    async fn test_follows_active_screen() {
        let (navigator, mut nav) = Navigator::channel();
        let (active, rx) = watch::channel(Configuration::Home);

        let vm = BottomBarViewModel::new(navigator, rx);
        assert_eq!(vm.state().selected, Some(BottomBarTab::Home));

        active.send_replace(Configuration::CartNav);
        let state = wait_for(&mut vm.subscribe(), |s| {
            s.selected == Some(BottomBarTab::Cart)
        })
        .await;
        assert_eq!(state.selected, Some(BottomBarTab::Cart));

        vm.on_tab_click(BottomBarTab::Search);
        assert_eq!(
            next_command(&mut nav).await,
            NavCommand::BringToFront(Configuration::Search)
        );
    }
}
