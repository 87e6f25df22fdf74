//! Navigation tree: the root screen stack, the dialog slot and the nested
//! checkout stack, driven by commands from view-models.

mod cart;
mod navigator;
mod root;

pub use cart::{CartChild, CartComponent};
pub use navigator::{NavCommand, Navigator};
pub use root::{DialogChild, RootComponent, ScreenChild};
