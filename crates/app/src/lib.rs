//! `chainboard-app`
//!
//! **Responsibility:** the single-page application for buyers, suppliers and
//! supply-chain managers.
//!
//! This crate provides:
//! - Navigation through the public and authenticated gates
//! - Login and registration views
//! - Role dashboards that fetch and mutate backend-held state
//!
//! Views talk only to the backend, never to each other. The browser
//! frontend (`frontend`, wasm32 only) is a thin shell over these types.

pub mod navigator;
pub mod views;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use navigator::{MAX_REDIRECTS, Navigation, NavigationError, Navigator};
pub use views::{
    BuyerDashboard, BuyerRequest, CollectionState, Control, Dashboard, Fetch, Fetched,
    InlineErrors, Loadable, LoginView, ManagerDashboard, ManagerOutcome, ManagerRequest, ModelCell,
    RegisterView, Request, StatusChange, SupplierDashboard, SupplierRequest,
};
