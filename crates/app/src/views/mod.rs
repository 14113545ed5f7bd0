//! View-models for every page.
//!
//! Each view owns render-scoped copies of the collections it shows and talks
//! to the backend through [`SupplyChainApi`]. Failures never leave a view:
//! they become a [`CollectionState::Failed`] or an inline error keyed by the
//! control that triggered the request.
//!
//! Dashboard actions are split so no borrow of the view-model spans a
//! request: `begin_*` applies the optimistic change and returns a request,
//! [`Request::send`] talks to the backend, and [`Dashboard::finish`] applies
//! the outcome to whatever the view holds by then. Reads named by `finish`
//! (and the mount reads) land one at a time through [`Dashboard::apply`].

use std::cell::RefCell;
use std::collections::BTreeMap;

use futures::StreamExt;
use futures::stream::FuturesUnordered;

use chainboard_client::{ApiError, SupplyChainApi};
use chainboard_core::{ItemId, OrderId};
use chainboard_inventory::InventoryItem;
use chainboard_orders::{DashboardInsights, Order, OrderStatus};

pub mod buyer;
pub mod login;
pub mod manager;
pub mod register;
pub mod supplier;

pub use buyer::{BuyerDashboard, BuyerRequest};
pub use login::LoginView;
pub use manager::{ManagerDashboard, ManagerOutcome, ManagerRequest};
pub use register::RegisterView;
pub use supplier::{SupplierDashboard, SupplierRequest};

/// A collection read issued on mount or after a mutation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Fetch {
    Orders,
    Inventory,
    Insights,
}

/// The response to one [`Fetch`].
#[derive(Debug, Clone)]
pub enum Fetched {
    Orders(Result<Vec<Order>, ApiError>),
    Inventory(Result<Vec<InventoryItem>, ApiError>),
    Insights(Result<DashboardInsights, ApiError>),
}

impl Fetch {
    pub async fn run<A: SupplyChainApi>(self, api: &A) -> Fetched {
        match self {
            Fetch::Orders => Fetched::Orders(api.list_orders().await),
            Fetch::Inventory => Fetched::Inventory(api.list_inventory().await),
            Fetch::Insights => Fetched::Insights(api.insights().await),
        }
    }
}

/// A mutation begun on a view-model, ready to go to the backend.
#[allow(async_fn_in_trait)]
pub trait Request {
    /// The request together with its response.
    type Outcome;

    async fn send<A: SupplyChainApi>(self, api: &A) -> Self::Outcome;
}

#[allow(async_fn_in_trait)]
pub trait Dashboard {
    type Request: Request;

    /// Reads issued together when the page mounts.
    const MOUNT: &'static [Fetch];

    /// Land one read.
    fn apply(&mut self, fetched: Fetched);

    /// Land a mutation's outcome. Returns the reads to issue next.
    fn finish(&mut self, outcome: <Self::Request as Request>::Outcome) -> Vec<Fetch>;

    async fn mount<A: SupplyChainApi>(&mut self, api: &A) {
        land_each(api, Self::MOUNT, |fetched| {
            self.apply(fetched);
            true
        })
        .await;
    }

    /// Send `request` and land its outcome and follow-up reads.
    async fn perform<A: SupplyChainApi>(&mut self, api: &A, request: Self::Request) {
        let outcome = request.send(api).await;
        let follow_up = self.finish(outcome);
        land_each(api, &follow_up, |fetched| {
            self.apply(fetched);
            true
        })
        .await;
    }
}

/// Where a page keeps its view-model between requests.
///
/// Every access is a short exclusive borrow. `None` means the view is gone
/// and nothing more should land.
pub trait ModelCell {
    type Model;

    fn modify<R>(&self, f: impl FnOnce(&mut Self::Model) -> R) -> Option<R>;
}

impl<D> ModelCell for RefCell<D> {
    type Model = D;

    fn modify<R>(&self, f: impl FnOnce(&mut D) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Issue `fetches` together and land each one on `cell` as it arrives.
pub async fn load<C, A>(cell: &C, api: &A, fetches: &[Fetch])
where
    C: ModelCell,
    C::Model: Dashboard,
    A: SupplyChainApi,
{
    land_each(api, fetches, |fetched| {
        cell.modify(|model| model.apply(fetched)).is_some()
    })
    .await;
}

/// Send a request begun on `cell`, then land its outcome and follow-up
/// reads on the live model.
pub async fn complete<C, A>(cell: &C, api: &A, request: <C::Model as Dashboard>::Request)
where
    C: ModelCell,
    C::Model: Dashboard,
    A: SupplyChainApi,
{
    let outcome = request.send(api).await;
    let Some(follow_up) = cell.modify(|model| model.finish(outcome)) else {
        return;
    };
    load(cell, api, &follow_up).await;
}

async fn land_each<A: SupplyChainApi>(
    api: &A,
    fetches: &[Fetch],
    mut land: impl FnMut(Fetched) -> bool,
) {
    let mut pending: FuturesUnordered<_> = fetches.iter().map(|&fetch| fetch.run(api)).collect();
    while let Some(fetched) = pending.next().await {
        if !land(fetched) {
            break;
        }
    }
}

/// Display state of one remote collection.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionState<T> {
    Loading,
    Empty,
    Failed(String),
    Populated(Vec<T>),
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        CollectionState::Loading
    }
}

impl<T> CollectionState<T> {
    pub fn from_result(result: Result<Vec<T>, ApiError>, fallback: &str) -> Self {
        match result {
            Ok(items) if items.is_empty() => CollectionState::Empty,
            Ok(items) => CollectionState::Populated(items),
            Err(err) => {
                tracing::warn!(error = %err, "collection fetch failed");
                CollectionState::Failed(err.user_message(fallback))
            }
        }
    }

    /// Apply a re-fetch. A failed re-fetch keeps rows that were already
    /// loaded; only a collection that never loaded becomes `Failed`.
    pub fn refresh(&mut self, result: Result<Vec<T>, ApiError>, fallback: &str) {
        match result {
            Err(err) if matches!(self, CollectionState::Empty | CollectionState::Populated(_)) => {
                tracing::warn!(error = %err, "re-fetch failed; keeping previous rows");
            }
            result => *self = Self::from_result(result, fallback),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, CollectionState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CollectionState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Loaded rows; empty unless `Populated`.
    pub fn items(&self) -> &[T] {
        match self {
            CollectionState::Populated(items) => items,
            _ => &[],
        }
    }

    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<&T> {
        self.items().iter().find(|item| pred(item))
    }

    pub fn find_mut(&mut self, mut pred: impl FnMut(&T) -> bool) -> Option<&mut T> {
        match self {
            CollectionState::Populated(items) => items.iter_mut().find(|item| pred(item)),
            _ => None,
        }
    }

    pub fn push(&mut self, item: T) {
        match self {
            CollectionState::Populated(items) => items.push(item),
            _ => *self = CollectionState::Populated(vec![item]),
        }
    }

    pub fn retain(&mut self, pred: impl FnMut(&T) -> bool) {
        if let CollectionState::Populated(items) = self {
            items.retain(pred);
            if items.is_empty() {
                *self = CollectionState::Empty;
            }
        }
    }
}

/// Display state of a single remote value (the insights panel).
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::Loading
    }
}

impl<T> Loadable<T> {
    pub fn from_result(result: Result<T, ApiError>, fallback: &str) -> Self {
        match result {
            Ok(value) => Loadable::Ready(value),
            Err(err) => {
                tracing::warn!(error = %err, "fetch failed");
                Loadable::Failed(err.user_message(fallback))
            }
        }
    }

    /// Same rule as [`CollectionState::refresh`]: a loaded value survives a
    /// failed re-fetch.
    pub fn refresh(&mut self, result: Result<T, ApiError>, fallback: &str) {
        match result {
            Err(err) if matches!(self, Loadable::Ready(_)) => {
                tracing::warn!(error = %err, "re-fetch failed; keeping previous value");
            }
            result => *self = Self::from_result(result, fallback),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// A control that can trigger a request, and therefore own an inline error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Control {
    PlaceOrder,
    SaveOrder(OrderId),
    OrderStatus(OrderId),
    SaveQuantity(ItemId),
    AddItem,
    DeleteItem(ItemId),
    PerformanceReport,
}

/// Inline error messages, one per control at most.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineErrors(BTreeMap<Control, String>);

impl InlineErrors {
    pub fn set(&mut self, control: Control, message: impl Into<String>) {
        self.0.insert(control, message.into());
    }

    pub fn clear(&mut self, control: Control) {
        self.0.remove(&control);
    }

    pub fn get(&self, control: Control) -> Option<&str> {
        self.0.get(&control).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Control, &str)> {
        self.0.iter().map(|(control, message)| (*control, message.as_str()))
    }
}

pub(crate) const LOAD_ORDERS_FAILED: &str = "Failed to load orders.";
pub(crate) const LOAD_INVENTORY_FAILED: &str = "Failed to load inventory.";
pub(crate) const LOAD_INSIGHTS_FAILED: &str = "Failed to load insights.";
pub(crate) const STATUS_UPDATE_FAILED: &str = "Failed to update order status. Please try again.";

/// Optimistic status change shared by the supplier and manager dashboards.
///
/// The row shows the new status while the request is in flight and is put
/// back on failure.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    id: OrderId,
    status: OrderStatus,
    previous: OrderStatus,
}

impl StatusChange {
    pub(crate) fn begin(
        orders: &mut CollectionState<Order>,
        id: OrderId,
        status: OrderStatus,
    ) -> Option<Self> {
        let Some(order) = orders.find_mut(|o| o.order_id == id) else {
            tracing::warn!(order_id = %id, "status change for unknown order");
            return None;
        };
        let previous = order.status;
        order.status = status;
        Some(Self {
            id,
            status,
            previous,
        })
    }

    pub fn order_id(&self) -> OrderId {
        self.id
    }

    pub(crate) async fn send<A: SupplyChainApi>(&self, api: &A) -> Result<(), ApiError> {
        api.update_order_status(self.id, self.status).await
    }

    /// Returns whether the backend accepted the change.
    pub(crate) fn finish(
        self,
        orders: &mut CollectionState<Order>,
        errors: &mut InlineErrors,
        result: Result<(), ApiError>,
    ) -> bool {
        let control = Control::OrderStatus(self.id);
        match result {
            Ok(()) => {
                tracing::info!(order_id = %self.id, from = %self.previous, to = %self.status, "order status changed");
                errors.clear(control);
                true
            }
            Err(err) => {
                tracing::warn!(order_id = %self.id, error = %err, "order status change failed; rolling back");
                if let Some(order) = orders.find_mut(|o| o.order_id == self.id) {
                    order.status = self.previous;
                }
                errors.set(control, err.user_message(STATUS_UPDATE_FAILED));
                false
            }
        }
    }
}
