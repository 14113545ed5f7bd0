use serde::{Deserialize, Serialize};

use crate::order::OrderStatus;

/// Aggregate counters served by `GET /dashboard/insights`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardInsights {
    pub total_inventory_items: u64,
    pub total_orders: u64,
    pub delivered_orders: u64,
    pub shipped_orders: u64,
    pub pending_orders: u64,
    pub cancelled_orders: u64,
}

impl DashboardInsights {
    pub fn orders_with_status(&self, status: OrderStatus) -> u64 {
        match status {
            OrderStatus::Pending => self.pending_orders,
            OrderStatus::Shipped => self.shipped_orders,
            OrderStatus::Delivered => self.delivered_orders,
            OrderStatus::Cancelled => self.cancelled_orders,
        }
    }
}
