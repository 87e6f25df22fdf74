//! # multicourse-core: Pure Domain Logic for the Ordering Client
//!
//! Everything in this crate is deterministic and free of I/O. The data,
//! domain and presentation layers all speak in these types.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Multicourse Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  apps/client: view-models + navigation tree                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │  multicourse-domain: use cases over repository traits           │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │  ┌──────────────▼──────────────┐  ┌────────────▼────────────────────┐  │
//! │  │  multicourse-db (SQLite)    │  │  multicourse-api (HTTP)         │  │
//! │  └──────────────┬──────────────┘  └────────────┬────────────────────┘  │
//! │  ┌──────────────▼──────────────────────────────▼───────────────────┐   │
//! │  │               ★ multicourse-core (THIS CRATE) ★                 │   │
//! │  │   types · money · error · validation · result · navigation      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Menu, cart, delivery and order models
//! - [`money`] - Integer money (minor units)
//! - [`error`] - The closed domain error taxonomy
//! - [`validation`] - Contact form and quantity rules
//! - [`result`] - Three-state load wrapper for screen state
//! - [`navigation`] - Configurations, stack/slot navigation, state keeper

pub mod error;
pub mod money;
pub mod navigation;
pub mod result;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use result::LoadState;
pub use types::*;

/// Maximum distinct lines allowed in a cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single cart line.
///
/// Guards against typing 1000 instead of 10.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Address queries shorter than this never reach the delivery provider.
pub const MIN_ADDRESS_QUERY_LEN: usize = 4;
