//! In-memory backend for navigator and view-model tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use futures::channel::oneshot;

use chainboard_auth::{Credentials, Registration, Session};
use chainboard_client::{ApiError, SupplyChainApi};
use chainboard_core::{ItemId, OrderId, Role};
use chainboard_inventory::{InventoryItem, ItemPayload};
use chainboard_orders::{DashboardInsights, NewOrder, Order, OrderStatus, OrderUpdate};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Op {
    Login,
    Register,
    ListOrders,
    PlaceOrder,
    UpdateOrder,
    UpdateOrderStatus,
    ListInventory,
    AddItem,
    UpdateItem,
    DeleteItem,
    Insights,
}

#[derive(Debug, Default)]
pub struct Backend {
    pub users: Vec<(Credentials, Session)>,
    pub orders: Vec<Order>,
    pub inventory: Vec<InventoryItem>,
    pub registrations: Vec<Registration>,
    failures: HashMap<Op, ApiError>,
    calls: Vec<Op>,
    next_id: i64,
}

/// Fake [`SupplyChainApi`] over a [`Backend`]. Insights are computed from
/// the current rows, so re-fetches observe every mutation.
#[derive(Debug, Default)]
pub struct FakeApi {
    backend: RefCell<Backend>,
    held: RefCell<HashMap<Op, oneshot::Receiver<()>>>,
}

pub fn server_error() -> ApiError {
    ApiError::Status {
        status: 500,
        message: None,
    }
}

pub fn item(id: i64, name: &str, quantity: i64, cost: f64) -> InventoryItem {
    InventoryItem {
        id: ItemId::new(id),
        item_name: name.to_string(),
        quantity,
        cost,
    }
}

pub fn order(id: i64, item: &InventoryItem, quantity: i64, status: OrderStatus) -> Order {
    Order {
        order_id: OrderId::new(id),
        item_id: Some(item.id),
        supplier_id: None,
        item_name: item.item_name.clone(),
        quantity,
        total_cost: item.cost * quantity as f64,
        status,
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two items and one order in each status.
    pub fn seeded() -> Self {
        let bolts = item(1, "Bolts", 500, 0.25);
        let gears = item(2, "Gears", 40, 12.5);
        let api = Self::new();
        {
            let mut backend = api.backend.borrow_mut();
            backend.orders = vec![
                order(10, &bolts, 100, OrderStatus::Pending),
                order(11, &gears, 4, OrderStatus::Shipped),
                order(12, &bolts, 50, OrderStatus::Delivered),
                order(13, &gears, 2, OrderStatus::Cancelled),
            ];
            backend.inventory = vec![bolts, gears];
            backend.next_id = 100;
        }
        api
    }

    pub fn with_user(self, email: &str, password: &str, session: Session) -> Self {
        self.backend
            .borrow_mut()
            .users
            .push((Credentials::new(email, password), session));
        self
    }

    /// Make every later call of `op` fail with `error`.
    pub fn fail(&self, op: Op, error: ApiError) {
        self.backend.borrow_mut().failures.insert(op, error);
    }

    pub fn recover(&self, op: Op) {
        self.backend.borrow_mut().failures.remove(&op);
    }

    /// Hold the next call of `op` until the returned sender fires (or is
    /// dropped).
    pub fn hold(&self, op: Op) -> oneshot::Sender<()> {
        let (release, held) = oneshot::channel();
        self.held.borrow_mut().insert(op, held);
        release
    }

    pub fn calls(&self) -> Vec<Op> {
        self.backend.borrow().calls.clone()
    }

    pub fn count(&self, op: Op) -> usize {
        self.backend.borrow().calls.iter().filter(|c| **c == op).count()
    }

    pub fn backend(&self) -> std::cell::Ref<'_, Backend> {
        self.backend.borrow()
    }

    pub fn backend_mut(&self) -> std::cell::RefMut<'_, Backend> {
        self.backend.borrow_mut()
    }

    async fn wait(&self, op: Op) {
        let held = self.held.borrow_mut().remove(&op);
        if let Some(held) = held {
            let _ = held.await;
        }
    }

    fn enter(&self, op: Op) -> Result<std::cell::RefMut<'_, Backend>, ApiError> {
        let mut backend = self.backend.borrow_mut();
        backend.calls.push(op);
        match backend.failures.get(&op) {
            Some(err) => Err(err.clone()),
            None => Ok(backend),
        }
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: Some("Not found".to_string()),
    }
}

impl SupplyChainApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let backend = self.enter(Op::Login)?;
        backend
            .users
            .iter()
            .find(|(known, _)| known == credentials)
            .map(|(_, session)| session.clone())
            .ok_or(ApiError::Status {
                status: 401,
                message: Some("Bad credentials".to_string()),
            })
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let mut backend = self.enter(Op::Register)?;
        if backend.users.iter().any(|(c, _)| c.email == registration.email) {
            return Err(ApiError::Status {
                status: 409,
                message: Some("Email already registered".to_string()),
            });
        }
        let role = registration.role.clone().unwrap_or(Role::Supplier);
        let session = Session::new(role).with_field("email", registration.email.clone());
        let credentials = Credentials::new(registration.email.clone(), registration.password.clone());
        backend.users.push((credentials, session));
        backend.registrations.push(registration.clone());
        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.wait(Op::ListOrders).await;
        Ok(self.enter(Op::ListOrders)?.orders.clone())
    }

    async fn place_order(&self, new: &NewOrder) -> Result<Order, ApiError> {
        let mut backend = self.enter(Op::PlaceOrder)?;
        let item = new
            .item_id
            .and_then(|id| backend.inventory.iter().find(|i| i.id == id).cloned())
            .ok_or_else(not_found)?;
        backend.next_id += 1;
        let placed = order(backend.next_id, &item, new.quantity, OrderStatus::Pending);
        backend.orders.push(placed.clone());
        Ok(placed)
    }

    async fn update_order(&self, id: OrderId, update: &OrderUpdate) -> Result<Order, ApiError> {
        let mut backend = self.enter(Op::UpdateOrder)?;
        let row = backend
            .orders
            .iter_mut()
            .find(|o| o.order_id == id)
            .ok_or_else(not_found)?;
        row.apply_update(update);
        let unit = if row.quantity == 0 { 0.0 } else { row.total_cost / row.quantity as f64 };
        row.total_cost = unit * update.quantity as f64;
        Ok(row.clone())
    }

    async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> Result<(), ApiError> {
        let mut backend = self.enter(Op::UpdateOrderStatus)?;
        let row = backend
            .orders
            .iter_mut()
            .find(|o| o.order_id == id)
            .ok_or_else(not_found)?;
        row.status = status;
        Ok(())
    }

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, ApiError> {
        self.wait(Op::ListInventory).await;
        Ok(self.enter(Op::ListInventory)?.inventory.clone())
    }

    async fn add_item(&self, payload: &ItemPayload) -> Result<(), ApiError> {
        let mut backend = self.enter(Op::AddItem)?;
        backend.next_id += 1;
        let id = backend.next_id;
        backend.inventory.push(item(
            id,
            &payload.item_name,
            payload.quantity.unwrap_or_default(),
            payload.cost.unwrap_or_default(),
        ));
        Ok(())
    }

    async fn update_item(&self, id: ItemId, payload: &ItemPayload) -> Result<(), ApiError> {
        let mut backend = self.enter(Op::UpdateItem)?;
        let row = backend
            .inventory
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(not_found)?;
        row.item_name = payload.item_name.clone();
        if let Some(quantity) = payload.quantity {
            row.quantity = quantity;
        }
        if let Some(cost) = payload.cost {
            row.cost = cost;
        }
        Ok(())
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), ApiError> {
        self.wait(Op::DeleteItem).await;
        let mut backend = self.enter(Op::DeleteItem)?;
        let before = backend.inventory.len();
        backend.inventory.retain(|i| i.id != id);
        if backend.inventory.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    async fn insights(&self) -> Result<DashboardInsights, ApiError> {
        self.wait(Op::Insights).await;
        let backend = self.enter(Op::Insights)?;
        let count = |status: OrderStatus| {
            backend.orders.iter().filter(|o| o.status == status).count() as u64
        };
        Ok(DashboardInsights {
            total_inventory_items: backend.inventory.len() as u64,
            total_orders: backend.orders.len() as u64,
            delivered_orders: count(OrderStatus::Delivered),
            shipped_orders: count(OrderStatus::Shipped),
            pending_orders: count(OrderStatus::Pending),
            cancelled_orders: count(OrderStatus::Cancelled),
        })
    }
}
