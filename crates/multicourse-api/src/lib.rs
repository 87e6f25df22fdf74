//! # multicourse-api: Restaurant Backend Client
//!
//! JSON request/response over HTTPS against the restaurant backend.
//! Responses are translated into `multicourse-core` models at this boundary;
//! nothing above this crate sees wire types.
//!
//! ```rust,ignore
//! use multicourse_api::{ApiClient, ApiConfig};
//!
//! let client = ApiClient::new(&ApiConfig::new("https://pizza32cm.com.ua")?)?;
//! let snapshot = client.restaurant_data().await?;
//! ```

pub mod client;
pub mod config;
pub mod dto;
pub mod error;

pub use client::ApiClient;
pub use config::{ApiConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiResult};
