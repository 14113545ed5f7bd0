//! Buyer dashboard: place orders against inventory and track them.

use chainboard_client::{ApiError, SupplyChainApi};
use chainboard_core::{ItemId, OrderId};
use chainboard_inventory::{InventoryItem, ItemOption};
use chainboard_orders::{NewOrder, Order, OrderUpdate};

use super::{
    CollectionState, Control, Dashboard, Fetch, Fetched, InlineErrors, LOAD_INVENTORY_FAILED,
    LOAD_ORDERS_FAILED, Request,
};

pub const SELECT_ITEM: &str = "Please select a valid item.";
pub const PLACE_ORDER_FAILED: &str = "Error placing order. Try again.";
pub const EDIT_INVALID: &str = "Item name and a quantity of at least 1 are required.";
pub const SAVE_ORDER_FAILED: &str = "Failed to update order. Please try again.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuyerDashboard {
    orders: CollectionState<Order>,
    inventory: CollectionState<InventoryItem>,
    /// Order being composed in the "place order" form.
    pub draft: NewOrder,
    editing: Option<(OrderId, OrderUpdate)>,
    errors: InlineErrors,
}

impl BuyerDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> &CollectionState<Order> {
        &self.orders
    }

    pub fn inventory(&self) -> &CollectionState<InventoryItem> {
        &self.inventory
    }

    pub fn errors(&self) -> &InlineErrors {
        &self.errors
    }

    /// Choices for the item picker.
    pub fn item_options(&self) -> Vec<ItemOption> {
        self.inventory.items().iter().map(InventoryItem::option).collect()
    }

    /// `PENDING` and `SHIPPED` orders.
    pub fn active_orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.items().iter().filter(|o| o.status.is_active())
    }

    /// `DELIVERED` and `CANCELLED` orders.
    pub fn order_history(&self) -> impl Iterator<Item = &Order> {
        self.orders.items().iter().filter(|o| o.status.is_settled())
    }

    /// Pick the item to order. Returns `false` (and clears the selection)
    /// when the id is not in the loaded inventory.
    pub fn select_item(&mut self, id: ItemId) -> bool {
        match self.inventory.find(|item| item.id == id) {
            Some(item) => {
                self.draft.item_id = Some(item.id);
                self.draft.item_name = item.item_name.clone();
                true
            }
            None => {
                self.clear_selection();
                false
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.draft.item_id = None;
        self.draft.item_name.clear();
    }

    pub fn set_quantity(&mut self, quantity: i64) {
        self.draft.quantity = quantity.max(1);
    }

    /// Validate the draft and build the request. An invalid draft sets the
    /// inline error and sends nothing.
    pub fn begin_place_order(&mut self) -> Option<BuyerRequest> {
        if let Err(err) = self.draft.validate() {
            tracing::debug!(error = %err, "order draft rejected");
            self.errors.set(Control::PlaceOrder, SELECT_ITEM);
            return None;
        }
        Some(BuyerRequest::PlaceOrder(self.draft.clone()))
    }

    /// Open the edit row for a `PENDING` order. Other orders are read-only.
    pub fn begin_edit(&mut self, id: OrderId) -> bool {
        match self.orders.find(|o| o.order_id == id) {
            Some(order) if order.is_editable() => {
                self.editing = Some((id, OrderUpdate::from_order(order)));
                true
            }
            _ => false,
        }
    }

    pub fn editing(&self) -> Option<(OrderId, &OrderUpdate)> {
        self.editing.as_ref().map(|(id, update)| (*id, update))
    }

    pub fn edit_mut(&mut self) -> Option<&mut OrderUpdate> {
        self.editing.as_mut().map(|(_, update)| update)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Save the open edit. The row shows the edit immediately, is replaced
    /// by the backend's copy on success and restored on failure.
    pub fn begin_save_edit(&mut self) -> Option<BuyerRequest> {
        let (id, update) = self.editing.take()?;

        if let Err(err) = update.validate() {
            tracing::debug!(order_id = %id, error = %err, "order edit rejected");
            self.errors.set(Control::SaveOrder(id), EDIT_INVALID);
            self.editing = Some((id, update));
            return None;
        }

        let row = self.orders.find_mut(|o| o.order_id == id)?;
        let previous = row.clone();
        row.apply_update(&update);
        Some(BuyerRequest::SaveEdit {
            id,
            update,
            previous,
        })
    }

    fn finish_place_order(&mut self, sent: NewOrder, result: Result<Order, ApiError>) {
        let control = Control::PlaceOrder;
        match result {
            Ok(order) => {
                tracing::info!(order_id = %order.order_id, "order placed");
                self.orders.push(order);
                if self.draft == sent {
                    self.draft = NewOrder::default();
                }
                self.errors.clear(control);
            }
            Err(err) => {
                tracing::warn!(error = %err, "placing order failed");
                self.errors.set(control, PLACE_ORDER_FAILED);
            }
        }
    }

    fn finish_save_edit(&mut self, id: OrderId, previous: Order, result: Result<Order, ApiError>) {
        let control = Control::SaveOrder(id);
        let Some(row) = self.orders.find_mut(|o| o.order_id == id) else {
            return;
        };
        match result {
            Ok(saved) => {
                tracing::info!(order_id = %id, "order updated");
                *row = saved;
                self.errors.clear(control);
            }
            Err(err) => {
                tracing::warn!(order_id = %id, error = %err, "order update failed; rolling back");
                *row = previous;
                self.errors.set(control, err.user_message(SAVE_ORDER_FAILED));
            }
        }
    }
}

/// A buyer mutation in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum BuyerRequest {
    PlaceOrder(NewOrder),
    SaveEdit {
        id: OrderId,
        update: OrderUpdate,
        previous: Order,
    },
}

impl Request for BuyerRequest {
    type Outcome = (BuyerRequest, Result<Order, ApiError>);

    async fn send<A: SupplyChainApi>(self, api: &A) -> Self::Outcome {
        let result = match &self {
            BuyerRequest::PlaceOrder(order) => api.place_order(order).await,
            BuyerRequest::SaveEdit { id, update, .. } => api.update_order(*id, update).await,
        };
        (self, result)
    }
}

impl Dashboard for BuyerDashboard {
    type Request = BuyerRequest;

    const MOUNT: &'static [Fetch] = &[Fetch::Orders, Fetch::Inventory];

    fn apply(&mut self, fetched: Fetched) {
        match fetched {
            Fetched::Orders(result) => self.orders.refresh(result, LOAD_ORDERS_FAILED),
            Fetched::Inventory(result) => self.inventory.refresh(result, LOAD_INVENTORY_FAILED),
            Fetched::Insights(_) => tracing::debug!("buyer view ignores insights"),
        }
    }

    fn finish(&mut self, (request, result): (BuyerRequest, Result<Order, ApiError>)) -> Vec<Fetch> {
        match request {
            BuyerRequest::PlaceOrder(sent) => self.finish_place_order(sent, result),
            BuyerRequest::SaveEdit { id, previous, .. } => self.finish_save_edit(id, previous, result),
        }
        Vec::new()
    }
}
