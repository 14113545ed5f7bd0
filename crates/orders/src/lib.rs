//! Orders as the dashboards see them.
//!
//! The backend owns the order lifecycle; this crate only models the wire
//! representation, the payloads the dashboards send, and the view-side
//! rules for which rows and actions to show (no IO, no HTTP, no storage).

pub mod insights;
pub mod order;
pub mod report;

pub use insights::DashboardInsights;
pub use order::{NewOrder, Order, OrderStatus, OrderUpdate};
pub use report::{ItemVolume, PerformanceReport};
