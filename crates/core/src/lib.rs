//! `chainboard-core`: shared vocabulary for the supply-chain dashboards.
//!
//! This crate contains **pure** primitives (no IO, no HTTP, no storage):
//! roles, the page route table, the role-to-path resolver and typed ids.

pub mod error;
pub mod id;
pub mod role;
pub mod route;

pub use error::{DomainError, DomainResult};
pub use id::{ItemId, OrderId};
pub use role::Role;
pub use route::{Route, canonical_path, resolve};
