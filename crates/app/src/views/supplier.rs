//! Supplier dashboard: stock levels, incoming orders and the insights panel.

use std::collections::BTreeMap;

use chainboard_client::{ApiError, SupplyChainApi};
use chainboard_core::{ItemId, OrderId};
use chainboard_inventory::{InventoryItem, ItemPayload};
use chainboard_orders::{DashboardInsights, Order, OrderStatus};

use super::{
    CollectionState, Control, Dashboard, Fetch, Fetched, InlineErrors, LOAD_INSIGHTS_FAILED,
    LOAD_INVENTORY_FAILED, LOAD_ORDERS_FAILED, Loadable, Request, StatusChange,
};

pub const QUANTITY_UPDATE_FAILED: &str = "Failed to update item quantity. Please try again.";
pub const ITEM_REQUIRED: &str = "Item name and quantity are required.";
pub const ADD_ITEM_FAILED: &str = "Failed to add item. Please try again.";
pub const DELETE_ITEM_FAILED: &str = "Failed to delete item. Please try again.";
pub const ITEM_UNAVAILABLE: &str = "This item is no longer in the inventory.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupplierDashboard {
    inventory: CollectionState<InventoryItem>,
    orders: CollectionState<Order>,
    insights: Loadable<DashboardInsights>,
    /// Quantity edits not yet sent, per item.
    staged: BTreeMap<ItemId, i64>,
    /// Open "add item" form, if any.
    new_item: Option<ItemPayload>,
    pending_delete: Option<ItemId>,
    errors: InlineErrors,
}

impl SupplierDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inventory(&self) -> &CollectionState<InventoryItem> {
        &self.inventory
    }

    pub fn orders(&self) -> &CollectionState<Order> {
        &self.orders
    }

    pub fn insights(&self) -> &Loadable<DashboardInsights> {
        &self.insights
    }

    pub fn errors(&self) -> &InlineErrors {
        &self.errors
    }

    /// Record a quantity edit locally. Nothing is sent until
    /// [`begin_commit_quantity`](Self::begin_commit_quantity).
    pub fn stage_quantity(&mut self, id: ItemId, quantity: i64) {
        self.staged.insert(id, quantity);
    }

    /// Quantity to display for an item: the staged edit, else the loaded one.
    pub fn displayed_quantity(&self, id: ItemId) -> Option<i64> {
        self.staged
            .get(&id)
            .copied()
            .or_else(|| self.inventory.find(|item| item.id == id).map(|item| item.quantity))
    }

    pub fn has_staged(&self, id: ItemId) -> bool {
        self.staged.contains_key(&id)
    }

    /// Send the staged quantity for `id`. The row shows it right away;
    /// success re-fetches inventory, failure restores the loaded value.
    pub fn begin_commit_quantity(&mut self, id: ItemId) -> Option<SupplierRequest> {
        let quantity = self.staged.remove(&id)?;
        let Some(row) = self.inventory.find_mut(|item| item.id == id) else {
            tracing::warn!(item_id = %id, "quantity commit for unknown item");
            self.errors.set(Control::SaveQuantity(id), ITEM_UNAVAILABLE);
            return None;
        };
        let payload = row.with_quantity(quantity);
        let previous = row.quantity;
        row.quantity = quantity;
        Some(SupplierRequest::UpdateQuantity {
            id,
            payload,
            quantity,
            previous,
        })
    }

    /// Optimistic status change; success re-fetches orders and insights.
    pub fn begin_status_change(&mut self, id: OrderId, status: OrderStatus) -> Option<SupplierRequest> {
        StatusChange::begin(&mut self.orders, id, status).map(SupplierRequest::ChangeStatus)
    }

    pub fn open_new_item(&mut self) {
        self.new_item.get_or_insert_with(ItemPayload::default);
    }

    pub fn close_new_item(&mut self) {
        self.new_item = None;
        self.errors.clear(Control::AddItem);
    }

    pub fn new_item(&self) -> Option<&ItemPayload> {
        self.new_item.as_ref()
    }

    pub fn new_item_mut(&mut self) -> Option<&mut ItemPayload> {
        self.new_item.as_mut()
    }

    /// Submit the add-item form. Success closes the form and re-fetches
    /// inventory and insights.
    pub fn begin_add_item(&mut self) -> Option<SupplierRequest> {
        let item = self.new_item.as_ref()?;
        if let Err(err) = item.validate() {
            tracing::debug!(error = %err, "new item rejected");
            self.errors.set(Control::AddItem, ITEM_REQUIRED);
            return None;
        }
        Some(SupplierRequest::AddItem(item.clone()))
    }

    /// First step of a delete: ask for confirmation.
    pub fn request_delete(&mut self, id: ItemId) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<ItemId> {
        self.pending_delete
    }

    /// Second step of a delete. The dialog closes at once; success drops
    /// the row and re-fetches insights.
    pub fn begin_delete(&mut self) -> Option<SupplierRequest> {
        self.pending_delete.take().map(SupplierRequest::DeleteItem)
    }

    fn finish_commit_quantity(
        &mut self,
        id: ItemId,
        quantity: i64,
        previous: i64,
        result: Result<(), ApiError>,
    ) -> Vec<Fetch> {
        let control = Control::SaveQuantity(id);
        match result {
            Ok(()) => {
                tracing::info!(item_id = %id, quantity, "item quantity updated");
                self.errors.clear(control);
                vec![Fetch::Inventory]
            }
            Err(err) => {
                tracing::warn!(item_id = %id, error = %err, "item quantity update failed");
                if let Some(row) = self.inventory.find_mut(|item| item.id == id) {
                    row.quantity = previous;
                }
                self.errors.set(control, QUANTITY_UPDATE_FAILED);
                Vec::new()
            }
        }
    }

    fn finish_add_item(&mut self, sent: ItemPayload, result: Result<(), ApiError>) -> Vec<Fetch> {
        let control = Control::AddItem;
        match result {
            Ok(()) => {
                tracing::info!(item_name = %sent.item_name, "item added");
                if self.new_item.as_ref() == Some(&sent) {
                    self.new_item = None;
                }
                self.errors.clear(control);
                vec![Fetch::Inventory, Fetch::Insights]
            }
            Err(err) => {
                tracing::warn!(error = %err, "adding item failed");
                self.errors.set(control, err.user_message(ADD_ITEM_FAILED));
                Vec::new()
            }
        }
    }

    fn finish_delete(&mut self, id: ItemId, result: Result<(), ApiError>) -> Vec<Fetch> {
        let control = Control::DeleteItem(id);
        match result {
            Ok(()) => {
                tracing::info!(item_id = %id, "item deleted");
                self.inventory.retain(|item| item.id != id);
                self.staged.remove(&id);
                self.errors.clear(control);
                vec![Fetch::Insights]
            }
            Err(err) => {
                tracing::warn!(item_id = %id, error = %err, "deleting item failed");
                self.errors.set(control, err.user_message(DELETE_ITEM_FAILED));
                Vec::new()
            }
        }
    }
}

/// A supplier mutation in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum SupplierRequest {
    UpdateQuantity {
        id: ItemId,
        payload: ItemPayload,
        quantity: i64,
        previous: i64,
    },
    ChangeStatus(StatusChange),
    AddItem(ItemPayload),
    DeleteItem(ItemId),
}

impl Request for SupplierRequest {
    type Outcome = (SupplierRequest, Result<(), ApiError>);

    async fn send<A: SupplyChainApi>(self, api: &A) -> Self::Outcome {
        let result = match &self {
            SupplierRequest::UpdateQuantity { id, payload, .. } => api.update_item(*id, payload).await,
            SupplierRequest::ChangeStatus(change) => change.send(api).await,
            SupplierRequest::AddItem(item) => api.add_item(item).await,
            SupplierRequest::DeleteItem(id) => api.delete_item(*id).await,
        };
        (self, result)
    }
}

impl Dashboard for SupplierDashboard {
    type Request = SupplierRequest;

    const MOUNT: &'static [Fetch] = &[Fetch::Inventory, Fetch::Orders, Fetch::Insights];

    fn apply(&mut self, fetched: Fetched) {
        match fetched {
            Fetched::Inventory(result) => self.inventory.refresh(result, LOAD_INVENTORY_FAILED),
            Fetched::Orders(result) => self.orders.refresh(result, LOAD_ORDERS_FAILED),
            Fetched::Insights(result) => self.insights.refresh(result, LOAD_INSIGHTS_FAILED),
        }
    }

    fn finish(&mut self, (request, result): (SupplierRequest, Result<(), ApiError>)) -> Vec<Fetch> {
        match request {
            SupplierRequest::UpdateQuantity {
                id,
                quantity,
                previous,
                ..
            } => self.finish_commit_quantity(id, quantity, previous, result),
            SupplierRequest::ChangeStatus(change) => {
                if change.finish(&mut self.orders, &mut self.errors, result) {
                    vec![Fetch::Orders, Fetch::Insights]
                } else {
                    Vec::new()
                }
            }
            SupplierRequest::AddItem(sent) => self.finish_add_item(sent, result),
            SupplierRequest::DeleteItem(id) => self.finish_delete(id, result),
        }
    }
}
