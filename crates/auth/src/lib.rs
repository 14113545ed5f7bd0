//! `chainboard-auth`: session state and client-side route gating.
//!
//! The gates are pure decisions over a session snapshot; persistence sits
//! behind the [`SessionStore`] trait so gates and views can run on fakes.
//! These gates only shape navigation. The backend remains the authority on
//! what a caller may do.

pub mod config;
pub mod credentials;
pub mod gate;
pub mod session;
pub mod store;

pub use config::SessionConfig;
pub use credentials::{Credentials, FieldErrors, Registration};
pub use gate::{GateDecision, authenticated_gate, public_gate};
pub use session::Session;
pub use store::{MemorySessionStore, SessionStore, SessionStoreError};

#[cfg(not(target_arch = "wasm32"))]
pub use store::FileSessionStore;

#[cfg(target_arch = "wasm32")]
pub use store::LocalStorageSessionStore;
