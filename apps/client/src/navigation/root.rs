//! # Root Component
//!
//! Owns the navigation tree and applies the commands view-models send.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  view-model ──Navigator──► channel ──► RootComponent::drain             │
//! │                                             │                           │
//! │                 ┌───────────────────────────┼─────────────────────┐     │
//! │                 ▼                           ▼                     ▼     │
//! │           ScreenStack                  DialogSlot         CartComponent │
//! │   Push / Pop / BringToFront    ShowDialog / Dismiss       Cart* commands│
//! │                 │                                                       │
//! │                 └──► active configuration ──► BottomBarViewModel        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entries that leave a container drop their child, which cancels the
//! child's view-model scope.
//!
//! ## Restoration
//! [`RootComponent::save_state`] writes `ScreenStack`, `DialogSlot` and, when
//! the checkout is open, `CartStack` into a [`StateKeeper`]. Passing that
//! keeper to [`RootComponent::new`] rebuilds the same tree. Saved state that
//! does not parse is discarded; a configuration the container does not
//! register is a programming error and panics.

use std::sync::Arc;

use multicourse_core::navigation::{
    ChildSlot, ChildStack, Configuration, NavigationError, SlotNavigation, StackNavigation,
    StateKeeper, CART_STACK_KEY, DIALOG_SLOT_KEY, SCREEN_SERIALIZER, SCREEN_STACK_KEY,
};
use serde_json::Value;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use crate::app::Dependencies;
use crate::config::UiSettings;
use crate::navigation::{CartComponent, NavCommand, Navigator};
use crate::usecases::UseCases;
use crate::viewmodel::{
    AboutViewModel, BottomBarViewModel, DetailsViewModel, FavouritesViewModel, HomeViewModel,
    SearchViewModel,
};

/// Live child of the root screen stack.
pub enum ScreenChild {
    Home(HomeViewModel),
    Favourites(FavouritesViewModel),
    Search(SearchViewModel),
    CartNav(CartComponent),
}

/// Live child of the dialog slot.
pub enum DialogChild {
    Details(DetailsViewModel),
    About(AboutViewModel),
}

pub struct RootComponent {
    deps: Dependencies,
    stack: ChildStack<Configuration, ScreenChild>,
    dialog: ChildSlot<Configuration, DialogChild>,
    bottom_bar: BottomBarViewModel,
    commands: mpsc::UnboundedReceiver<NavCommand>,
    active: watch::Sender<Configuration>,
}

impl RootComponent {
    /// Builds the tree, consuming saved navigation state from `saved`.
    ///
    /// # Panics
    /// When saved state holds a configuration its container cannot host.
    pub fn new(
        use_cases: Arc<UseCases>,
        ui: UiSettings,
        saved: Option<&mut StateKeeper>,
    ) -> Self {
        let (navigator, commands) = Navigator::channel();
        let deps = Dependencies {
            use_cases,
            navigator: navigator.clone(),
            ui,
        };

        let (screens, dialog, mut cart_state) = match saved {
            Some(keeper) => (
                restore(keeper.consume(SCREEN_STACK_KEY), SCREEN_STACK_KEY),
                restore(keeper.consume(DIALOG_SLOT_KEY), DIALOG_SLOT_KEY),
                keeper.consume(CART_STACK_KEY),
            ),
            None => (Vec::new(), Vec::new(), None),
        };

        let stack = ChildStack::new(
            StackNavigation::restore(screens, Configuration::Home),
            |config| create_screen(&deps, config, &mut cart_state),
        );
        let dialog = ChildSlot::new(SlotNavigation::restore(dialog.into_iter().next()), |config| {
            create_dialog(&deps, config)
        });

        let (active, active_rx) = watch::channel(stack.navigation().active().clone());
        let bottom_bar = BottomBarViewModel::new(navigator, active_rx);
        debug!(
            screens = stack.navigation().len(),
            dialog = dialog.navigation().active().is_some(),
            "Navigation tree built"
        );

        RootComponent {
            deps,
            stack,
            dialog,
            bottom_bar,
            commands,
            active,
        }
    }

    pub fn navigator(&self) -> Navigator {
        self.deps.navigator.clone()
    }

    pub fn active_configuration(&self) -> &Configuration {
        self.stack.navigation().active()
    }

    pub fn active_screen(&self) -> &ScreenChild {
        self.stack.active().1
    }

    pub fn screens(&self) -> &[Configuration] {
        self.stack.navigation().items()
    }

    pub fn dialog(&self) -> Option<(&Configuration, &DialogChild)> {
        self.dialog.child()
    }

    pub fn bottom_bar(&self) -> &BottomBarViewModel {
        &self.bottom_bar
    }

    /// Checkout stack, while `CartNav` is on the root stack.
    pub fn cart(&self) -> Option<&CartComponent> {
        self.stack.children().find_map(|(_, child)| match child {
            ScreenChild::CartNav(cart) => Some(cart),
            _ => None,
        })
    }

    /// Follows the active root configuration.
    pub fn subscribe_active(&self) -> watch::Receiver<Configuration> {
        self.active.subscribe()
    }

    /// Applies every queued command. Returns how many were applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.commands.try_recv() {
            self.apply(command);
            applied += 1;
        }
        applied
    }

    /// Waits for the next command, then applies it and anything queued behind it.
    pub async fn process_next(&mut self) {
        if let Some(command) = self.commands.recv().await {
            self.apply(command);
            self.drain();
        }
    }

    fn apply(&mut self, command: NavCommand) {
        debug!(?command, "Navigating");
        let deps = &self.deps;
        let mut no_saved_cart = None;
        let screen_factory = |config: &Configuration| create_screen(deps, config, &mut no_saved_cart);

        match command {
            NavCommand::Push(config) => {
                self.stack.navigate(|nav| nav.push(config), screen_factory);
            }
            NavCommand::Pop => {
                if self.stack.navigate(|nav| nav.pop(), screen_factory).is_none() {
                    debug!("Already at the root screen");
                }
            }
            NavCommand::BringToFront(config) => {
                self.stack
                    .navigate(|nav| nav.bring_to_front(config), screen_factory);
            }
            NavCommand::ShowDialog(config) => {
                self.dialog
                    .activate(config, |config| create_dialog(deps, config));
            }
            NavCommand::DismissDialog => {
                self.dialog.dismiss();
            }
            command @ (NavCommand::CartPush(_)
            | NavCommand::CartPop
            | NavCommand::CartReplaceAll(_)) => {
                let leave_checkout = match self.stack.active_mut() {
                    (_, ScreenChild::CartNav(cart)) => cart.apply(command),
                    (config, _) => {
                        warn!(active = config.kind(), ?command, "Checkout command outside the cart");
                        false
                    }
                };
                if leave_checkout {
                    self.stack.navigate(|nav| nav.pop(), screen_factory);
                }
            }
        }

        let active = self.stack.navigation().active();
        self.active.send_if_modified(|current| {
            if current == active {
                false
            } else {
                *current = active.clone();
                true
            }
        });
    }

    /// Writes the tree into `keeper`.
    pub fn save_state(&self, keeper: &mut StateKeeper) -> Result<(), NavigationError> {
        keeper.save(SCREEN_STACK_KEY, SCREEN_SERIALIZER.encode(self.screens())?);
        keeper.save(
            DIALOG_SLOT_KEY,
            SCREEN_SERIALIZER.encode(self.dialog.navigation().active())?,
        );
        if let Some(cart) = self.cart() {
            keeper.save(CART_STACK_KEY, cart.save_state()?);
        }
        Ok(())
    }
}

fn restore(saved: Option<Value>, key: &str) -> Vec<Configuration> {
    let Some(value) = saved else {
        return Vec::new();
    };
    match SCREEN_SERIALIZER.decode(value) {
        Ok(configs) => configs,
        Err(NavigationError::Unsupported { serializer, kind }) => {
            panic!("unsupported configuration '{kind}' for {serializer}")
        }
        Err(e) => {
            warn!(key, error = %e, "Discarding saved navigation state");
            Vec::new()
        }
    }
}

/// `cart_state` is handed to the first `CartNav` created, then cleared.
fn create_screen(
    deps: &Dependencies,
    config: &Configuration,
    cart_state: &mut Option<Value>,
) -> ScreenChild {
    match config {
        Configuration::Home => ScreenChild::Home(HomeViewModel::new(deps)),
        Configuration::Favourites => ScreenChild::Favourites(FavouritesViewModel::new(deps)),
        Configuration::Search => ScreenChild::Search(SearchViewModel::new(deps)),
        Configuration::CartNav => {
            ScreenChild::CartNav(CartComponent::new(deps.clone(), cart_state.take()))
        }
        other => panic!("unsupported configuration '{}' for screen stack", other.kind()),
    }
}

fn create_dialog(deps: &Dependencies, config: &Configuration) -> DialogChild {
    match config {
        Configuration::Details { id } => DialogChild::Details(DetailsViewModel::new(deps, id)),
        Configuration::About => DialogChild::About(AboutViewModel::new(deps)),
        other => panic!("unsupported configuration '{}' for dialog slot", other.kind()),
    }
}
