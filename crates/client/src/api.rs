use chainboard_auth::{Credentials, Registration, Session};
use chainboard_core::{ItemId, OrderId};
use chainboard_inventory::{InventoryItem, ItemPayload};
use chainboard_orders::{DashboardInsights, NewOrder, Order, OrderStatus, OrderUpdate};

use crate::error::ApiError;

/// Every backend operation the application uses.
///
/// Futures are not required to be `Send`: in the browser they run on the
/// single UI thread.
#[allow(async_fn_in_trait)]
pub trait SupplyChainApi {
    /// `POST /auth/login`. The returned record is what gets stored as the
    /// session.
    async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError>;

    /// `POST /auth/register`.
    async fn register(&self, registration: &Registration) -> Result<(), ApiError>;

    async fn list_orders(&self) -> Result<Vec<Order>, ApiError>;

    async fn place_order(&self, order: &NewOrder) -> Result<Order, ApiError>;

    async fn update_order(&self, id: OrderId, update: &OrderUpdate) -> Result<Order, ApiError>;

    async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> Result<(), ApiError>;

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, ApiError>;

    async fn add_item(&self, item: &ItemPayload) -> Result<(), ApiError>;

    async fn update_item(&self, id: ItemId, item: &ItemPayload) -> Result<(), ApiError>;

    async fn delete_item(&self, id: ItemId) -> Result<(), ApiError>;

    async fn insights(&self) -> Result<DashboardInsights, ApiError>;
}
