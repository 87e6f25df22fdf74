//! Navigation commands and the handle view-models send them through.

use multicourse_core::navigation::Configuration;
use tokio::sync::mpsc;
use tracing::debug;

/// One change to the navigation tree.
///
/// `Cart*` commands target the nested checkout stack of the active
/// `CartNav` entry; everything else targets the root.
#[derive(Debug, Clone, PartialEq)]
pub enum NavCommand {
    Push(Configuration),
    Pop,
    BringToFront(Configuration),
    ShowDialog(Configuration),
    DismissDialog,
    CartPush(Configuration),
    /// Pops the checkout stack; at its root, leaves `CartNav` instead.
    CartPop,
    CartReplaceAll(Configuration),
}

/// Cloneable sender half handed to every view-model.
///
/// Sending never blocks. Commands are applied when the owning
/// [`RootComponent`](super::RootComponent) drains its queue.
#[derive(Debug, Clone)]
pub struct Navigator {
    tx: mpsc::UnboundedSender<NavCommand>,
}

impl Navigator {
    pub fn channel() -> (Navigator, mpsc::UnboundedReceiver<NavCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Navigator { tx }, rx)
    }

    pub fn send(&self, command: NavCommand) {
        if self.tx.send(command).is_err() {
            debug!("Navigation root is gone, dropping command");
        }
    }

    // Root stack

    pub fn bring_to_front(&self, config: Configuration) {
        self.send(NavCommand::BringToFront(config));
    }

    pub fn move_back(&self) {
        self.send(NavCommand::Pop);
    }

    // Dialog slot

    pub fn open_details(&self, item_id: &str) {
        self.send(NavCommand::ShowDialog(Configuration::Details {
            id: item_id.to_string(),
        }));
    }

    pub fn open_about(&self) {
        self.send(NavCommand::ShowDialog(Configuration::About));
    }

    pub fn close_dialog(&self) {
        self.send(NavCommand::DismissDialog);
    }

    // Checkout stack

    pub fn open_contact_info(&self) {
        self.send(NavCommand::CartPush(Configuration::ContactInfo));
    }

    /// The finished checkout replaces the whole checkout stack.
    pub fn open_pay_order(&self, redirect_url: String) {
        self.send(NavCommand::CartReplaceAll(Configuration::PayOrder {
            redirect_url,
        }));
    }

    pub fn open_success_order(&self) {
        self.send(NavCommand::CartReplaceAll(Configuration::SuccessOrder));
    }

    pub fn cart_back(&self) {
        self.send(NavCommand::CartPop);
    }
}
