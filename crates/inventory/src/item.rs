use serde::{Deserialize, Serialize};

use chainboard_core::{DomainError, DomainResult, ItemId};

/// An inventory item as returned by `GET /inventory/item`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: ItemId,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub quantity: i64,
    /// Unit cost, in currency units.
    #[serde(default)]
    pub cost: f64,
}

impl InventoryItem {
    /// Payload that rewrites this item with a new quantity.
    pub fn with_quantity(&self, quantity: i64) -> ItemPayload {
        ItemPayload {
            item_name: self.item_name.clone(),
            quantity: Some(quantity),
            cost: Some(self.cost),
        }
    }

    pub fn option(&self) -> ItemOption {
        ItemOption {
            item_id: self.id,
            item_name: self.item_name.clone(),
        }
    }
}

/// One entry of the buyer's item picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOption {
    pub item_id: ItemId,
    pub item_name: String,
}

/// Body of `POST /inventory/add` and `PUT /inventory/update/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    pub item_name: String,
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

impl ItemPayload {
    pub fn new(item_name: impl Into<String>, quantity: i64, cost: Option<f64>) -> Self {
        Self {
            item_name: item_name.into(),
            quantity: Some(quantity),
            cost,
        }
    }

    /// Name and quantity are both required; quantity may not be negative.
    pub fn validate(&self) -> DomainResult<()> {
        if self.item_name.trim().is_empty() {
            return Err(DomainError::validation("item name is required"));
        }
        match self.quantity {
            None => Err(DomainError::validation("quantity is required")),
            Some(q) if q < 0 => Err(DomainError::validation("quantity must not be negative")),
            Some(_) => Ok(()),
        }
    }
}
