//! `chainboard-client`: typed access to the supply-chain REST backend.
//!
//! Views depend on the [`SupplyChainApi`] trait; [`ApiClient`] is the HTTP
//! implementation. Requests are issued once: no retries, no client-side
//! timeouts beyond the transport's defaults.

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::SupplyChainApi;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::ApiClient;
