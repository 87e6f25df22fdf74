//! # Multicourse Client
//!
//! Presentation layer of the Multicourse ordering app: configuration,
//! logging, wiring, navigation and the screen view-models.
//!
//! ## Module Organization
//! ```text
//! multicourse_client/
//! ├── lib.rs          ◄─── You are here
//! ├── app.rs          ◄─── Bootstrap: DB, HTTP client, use cases
//! ├── config.rs       ◄─── Layered settings (defaults, TOML, env)
//! ├── error.rs        ◄─── Bootstrap error type
//! ├── logging.rs      ◄─── tracing subscriber
//! ├── messages.rs     ◄─── User-facing messages per failure
//! ├── scope.rs        ◄─── View-model task scopes, debounce
//! ├── state.rs        ◄─── Latest-wins screen state
//! ├── usecases.rs     ◄─── Use-case bundle shared by screens
//! ├── navigation/
//! │   ├── navigator.rs◄─── Commands and the sender handle
//! │   ├── root.rs     ◄─── Screen stack, dialog slot, restoration
//! │   └── cart.rs     ◄─── Nested checkout stack
//! └── viewmodel/
//!     ├── home.rs  details.rs  favourites.rs  search.rs
//!     ├── cart.rs  contact_info.rs
//!     └── about.rs  bottom_bar.rs
//! ```
//!
//! Everything runs on the tokio runtime. View-models publish state through
//! `tokio::sync::watch`; navigation commands travel over an unbounded
//! channel and are applied by the [`RootComponent`](navigation::RootComponent).

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod messages;
pub mod navigation;
pub mod scope;
pub mod state;
pub mod usecases;
pub mod viewmodel;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::{AppComponent, Dependencies};
pub use config::AppConfig;
pub use error::{ClientError, ClientResult};
pub use logging::init_tracing;
