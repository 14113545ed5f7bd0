use core::str::FromStr;

use serde::{Deserialize, Serialize};

use chainboard_core::{DomainError, DomainResult, ItemId, OrderId};

/// Order status lifecycle (server-driven).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Still moving: shown under order tracking.
    pub fn is_active(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Shipped)
    }

    /// Finished: shown under order history.
    pub fn is_settled(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Transitions the manager dashboard offers from this status.
    pub fn manager_transitions(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Shipped, OrderStatus::Cancelled],
            OrderStatus::Shipped => &[OrderStatus::Delivered],
            OrderStatus::Delivered | OrderStatus::Cancelled => &[],
        }
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::UnknownStatus(s.to_string()))
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        value.as_str().to_string()
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    #[serde(default)]
    pub item_id: Option<ItemId>,
    #[serde(default)]
    pub supplier_id: Option<i64>,
    #[serde(default)]
    pub item_name: String,
    pub quantity: i64,
    /// Server-computed total, in currency units.
    #[serde(default)]
    pub total_cost: f64,
    pub status: OrderStatus,
}

impl Order {
    /// Only pending orders accept field edits.
    pub fn is_editable(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    pub fn apply_update(&mut self, update: &OrderUpdate) {
        self.item_name = update.item_name.clone();
        self.quantity = update.quantity;
    }
}

/// Body of `POST /orders/place`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub item_id: Option<ItemId>,
    pub supplier_id: Option<i64>,
    pub item_name: String,
    pub quantity: i64,
}

impl Default for NewOrder {
    fn default() -> Self {
        Self {
            item_id: None,
            supplier_id: None,
            item_name: String::new(),
            quantity: 1,
        }
    }
}

impl NewOrder {
    pub fn for_item(item_id: ItemId, item_name: impl Into<String>, quantity: i64) -> Self {
        Self {
            item_id: Some(item_id),
            supplier_id: None,
            item_name: item_name.into(),
            quantity: quantity.max(1),
        }
    }

    /// An item must be selected and at least one unit ordered.
    pub fn validate(&self) -> DomainResult<()> {
        if self.item_id.is_none() {
            return Err(DomainError::validation("no item selected"));
        }
        if self.quantity < 1 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(())
    }
}

/// Body of `PUT /orders/update/{orderId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub item_name: String,
    pub quantity: i64,
}

impl OrderUpdate {
    pub fn from_order(order: &Order) -> Self {
        Self {
            item_name: order.item_name.clone(),
            quantity: order.quantity,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.item_name.trim().is_empty() {
            return Err(DomainError::validation("item name is required"));
        }
        if self.quantity < 1 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(())
    }
}
