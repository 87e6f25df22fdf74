//! Checkout stack hosted by the `CartNav` root entry.

use multicourse_core::navigation::{
    ChildStack, Configuration, NavigationError, StackNavigation, CART_SERIALIZER,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::app::Dependencies;
use crate::navigation::NavCommand;
use crate::viewmodel::{CartViewModel, ContactInfoViewModel};

/// Live child of the checkout stack.
pub enum CartChild {
    Cart(CartViewModel),
    ContactInfo(ContactInfoViewModel),
    PayOrder { redirect_url: String },
    SuccessOrder,
}

pub struct CartComponent {
    deps: Dependencies,
    stack: ChildStack<Configuration, CartChild>,
}

impl CartComponent {
    /// Builds the stack, restoring `saved` when it decodes.
    ///
    /// # Panics
    /// When `saved` holds a configuration the checkout stack cannot host.
    pub fn new(deps: Dependencies, saved: Option<Value>) -> Self {
        let restored = match saved.map(|value| CART_SERIALIZER.decode(value)) {
            Some(Ok(configs)) => configs,
            Some(Err(NavigationError::Unsupported { serializer, kind })) => {
                panic!("unsupported configuration '{kind}' for {serializer}")
            }
            Some(Err(e)) => {
                warn!(error = %e, "Discarding saved checkout stack");
                Vec::new()
            }
            None => Vec::new(),
        };

        let navigation = StackNavigation::restore(restored, Configuration::Cart);
        let stack = ChildStack::new(navigation, |config| create_child(&deps, config));
        CartComponent { deps, stack }
    }

    pub fn active(&self) -> (&Configuration, &CartChild) {
        self.stack.active()
    }

    pub fn children(&self) -> impl Iterator<Item = (&Configuration, &CartChild)> {
        self.stack.children()
    }

    pub fn configurations(&self) -> &[Configuration] {
        self.stack.navigation().items()
    }

    /// Applies a checkout command. Returns `true` when popping at the root
    /// asks to leave the checkout altogether.
    pub fn apply(&mut self, command: NavCommand) -> bool {
        let deps = &self.deps;
        let factory = |config: &Configuration| create_child(deps, config);
        match command {
            NavCommand::CartPush(config) => {
                debug!(kind = config.kind(), "Checkout push");
                self.stack.navigate(|nav| nav.push(config), factory);
                false
            }
            NavCommand::CartReplaceAll(config) => {
                debug!(kind = config.kind(), "Checkout replaced");
                self.stack.navigate(|nav| nav.replace_all(config), factory);
                false
            }
            NavCommand::CartPop => self.stack.navigate(|nav| nav.pop(), factory).is_none(),
            other => {
                warn!(?other, "Not a checkout command");
                false
            }
        }
    }

    pub fn save_state(&self) -> Result<Value, NavigationError> {
        CART_SERIALIZER.encode(self.configurations())
    }
}

fn create_child(deps: &Dependencies, config: &Configuration) -> CartChild {
    match config {
        Configuration::Cart => CartChild::Cart(CartViewModel::new(deps)),
        Configuration::ContactInfo => CartChild::ContactInfo(ContactInfoViewModel::new(deps)),
        Configuration::PayOrder { redirect_url } => CartChild::PayOrder {
            redirect_url: redirect_url.clone(),
        },
        Configuration::SuccessOrder => CartChild::SuccessOrder,
        other => panic!("unsupported configuration '{}' for checkout stack", other.kind()),
    }
}
