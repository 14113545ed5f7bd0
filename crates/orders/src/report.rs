//! Supplier performance report, assembled on the client from the latest
//! insights and the orders the manager dashboard holds.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::insights::DashboardInsights;
use crate::order::Order;

/// Units ordered for one item name across all orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemVolume {
    pub item_name: String,
    pub quantity: i64,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceReport {
    pub generated_at: DateTime<Utc>,
    pub insights: DashboardInsights,
    /// Delivered share of all orders, `0.0` when there are none.
    pub delivery_rate: f64,
    /// Cancelled share of all orders, `0.0` when there are none.
    pub cancellation_rate: f64,
    /// Highest volume first; ties broken by item name.
    pub item_volumes: Vec<ItemVolume>,
}

impl PerformanceReport {
    pub fn build(insights: DashboardInsights, orders: &[Order], generated_at: DateTime<Utc>) -> Self {
        let mut volumes: BTreeMap<&str, (i64, usize)> = BTreeMap::new();
        for order in orders {
            let entry = volumes.entry(order.item_name.as_str()).or_default();
            entry.0 = entry.0.saturating_add(order.quantity);
            entry.1 += 1;
        }

        let mut item_volumes: Vec<ItemVolume> = volumes
            .into_iter()
            .map(|(name, (quantity, orders))| ItemVolume {
                item_name: name.to_string(),
                quantity,
                orders,
            })
            .collect();
        item_volumes.sort_by(|a, b| b.quantity.cmp(&a.quantity).then_with(|| a.item_name.cmp(&b.item_name)));

        Self {
            generated_at,
            insights,
            delivery_rate: ratio(insights.delivered_orders, insights.total_orders),
            cancellation_rate: ratio(insights.cancelled_orders, insights.total_orders),
            item_volumes,
        }
    }
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 { 0.0 } else { part as f64 / total as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderStatus;
    use chainboard_core::OrderId;
    use pretty_assertions::assert_eq;

    fn order(id: i64, name: &str, quantity: i64) -> Order {
        Order {
            order_id: OrderId::new(id),
            item_id: None,
            supplier_id: None,
            item_name: name.to_string(),
            quantity,
            total_cost: 0.0,
            status: OrderStatus::Pending,
        }
    }

    #[test]
    fn rates_and_volumes() {
        let insights = DashboardInsights {
            total_orders: 4,
            delivered_orders: 3,
            cancelled_orders: 1,
            ..DashboardInsights::default()
        };
        let orders = [order(1, "Bolts", 5), order(2, "Nuts", 7), order(3, "Bolts", 4)];
        let now = Utc::now();

        let report = PerformanceReport::build(insights, &orders, now);

        assert_eq!(report.generated_at, now);
        assert_eq!(report.delivery_rate, 0.75);
        assert_eq!(report.cancellation_rate, 0.25);
        assert_eq!(
            report.item_volumes,
            vec![
                ItemVolume { item_name: "Bolts".to_string(), quantity: 9, orders: 2 },
                ItemVolume { item_name: "Nuts".to_string(), quantity: 7, orders: 1 },
            ]
        );
    }

    #[test]
    fn empty_inputs_give_zero_rates() {
        let report = PerformanceReport::build(DashboardInsights::default(), &[], Utc::now());
        assert_eq!(report.delivery_rate, 0.0);
        assert!(report.item_volumes.is_empty());
    }

    #[test]
    fn huge_quantities_saturate() {
        let orders = [order(1, "Bolts", i64::MAX), order(2, "Bolts", 10)];
        let report = PerformanceReport::build(DashboardInsights::default(), &orders, Utc::now());
        assert_eq!(report.item_volumes[0].quantity, i64::MAX);
        assert_eq!(report.item_volumes[0].orders, 2);
    }
}
