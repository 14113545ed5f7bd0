//! Inventory items as the dashboards see them.
//!
//! Stock accounting happens server-side; this crate models the wire shapes
//! and the add-item form's checks (no IO, no HTTP, no storage).

pub mod item;

pub use item::{InventoryItem, ItemPayload, ItemOption};
