//! Manager dashboard: order oversight and the performance report.

use chrono::Utc;

use chainboard_client::{ApiError, SupplyChainApi};
use chainboard_core::OrderId;
use chainboard_inventory::InventoryItem;
use chainboard_orders::{DashboardInsights, Order, OrderStatus, PerformanceReport};

use super::{
    CollectionState, Control, Dashboard, Fetch, Fetched, InlineErrors, LOAD_INSIGHTS_FAILED,
    LOAD_INVENTORY_FAILED, LOAD_ORDERS_FAILED, Loadable, Request, StatusChange,
};

pub const TRANSITION_UNAVAILABLE: &str = "That status change is not available for this order.";
pub const REPORT_FAILED: &str = "Failed to generate report. Please try again.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManagerDashboard {
    orders: CollectionState<Order>,
    inventory: CollectionState<InventoryItem>,
    insights: Loadable<DashboardInsights>,
    report: Option<PerformanceReport>,
    generating: bool,
    errors: InlineErrors,
}

impl ManagerDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> &CollectionState<Order> {
        &self.orders
    }

    pub fn inventory(&self) -> &CollectionState<InventoryItem> {
        &self.inventory
    }

    pub fn insights(&self) -> &Loadable<DashboardInsights> {
        &self.insights
    }

    pub fn report(&self) -> Option<&PerformanceReport> {
        self.report.as_ref()
    }

    /// A report request is in flight.
    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn errors(&self) -> &InlineErrors {
        &self.errors
    }

    /// Statuses offered for an order; empty for unknown or settled orders.
    pub fn transitions(&self, id: OrderId) -> &'static [OrderStatus] {
        self.orders
            .find(|o| o.order_id == id)
            .map(|o| o.status.manager_transitions())
            .unwrap_or_default()
    }

    /// Same optimistic flow as the supplier view, limited to the offered
    /// transitions. Anything else is rejected without a request.
    pub fn begin_status_change(&mut self, id: OrderId, status: OrderStatus) -> Option<ManagerRequest> {
        if !self.transitions(id).contains(&status) {
            tracing::debug!(order_id = %id, to = %status, "transition not offered");
            self.errors.set(Control::OrderStatus(id), TRANSITION_UNAVAILABLE);
            return None;
        }
        StatusChange::begin(&mut self.orders, id, status).map(ManagerRequest::ChangeStatus)
    }

    /// Re-fetch insights and build a report over them and the loaded orders.
    /// `None` while a report is already on its way.
    pub fn begin_report(&mut self) -> Option<ManagerRequest> {
        if self.generating {
            return None;
        }
        self.generating = true;
        Some(ManagerRequest::Report)
    }

    fn finish_report(&mut self, result: Result<DashboardInsights, ApiError>) {
        let control = Control::PerformanceReport;
        self.generating = false;
        match result {
            Ok(insights) => {
                let report = PerformanceReport::build(insights, self.orders.items(), Utc::now());
                tracing::info!(
                    total_orders = insights.total_orders,
                    delivery_rate = report.delivery_rate,
                    "performance report generated"
                );
                self.insights = Loadable::Ready(insights);
                self.report = Some(report);
                self.errors.clear(control);
            }
            Err(err) => {
                tracing::warn!(error = %err, "report generation failed");
                self.errors.set(control, err.user_message(REPORT_FAILED));
            }
        }
    }

    pub fn dismiss_report(&mut self) {
        self.report = None;
    }
}

/// A manager mutation in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum ManagerRequest {
    ChangeStatus(StatusChange),
    Report,
}

#[derive(Debug, Clone)]
pub enum ManagerOutcome {
    ChangeStatus(StatusChange, Result<(), ApiError>),
    Report(Result<DashboardInsights, ApiError>),
}

impl Request for ManagerRequest {
    type Outcome = ManagerOutcome;

    async fn send<A: SupplyChainApi>(self, api: &A) -> ManagerOutcome {
        match self {
            ManagerRequest::ChangeStatus(change) => {
                let result = change.send(api).await;
                ManagerOutcome::ChangeStatus(change, result)
            }
            ManagerRequest::Report => ManagerOutcome::Report(api.insights().await),
        }
    }
}

impl Dashboard for ManagerDashboard {
    type Request = ManagerRequest;

    const MOUNT: &'static [Fetch] = &[Fetch::Orders, Fetch::Inventory, Fetch::Insights];

    fn apply(&mut self, fetched: Fetched) {
        match fetched {
            Fetched::Orders(result) => self.orders.refresh(result, LOAD_ORDERS_FAILED),
            Fetched::Inventory(result) => self.inventory.refresh(result, LOAD_INVENTORY_FAILED),
            Fetched::Insights(result) => self.insights.refresh(result, LOAD_INSIGHTS_FAILED),
        }
    }

    fn finish(&mut self, outcome: ManagerOutcome) -> Vec<Fetch> {
        match outcome {
            ManagerOutcome::ChangeStatus(change, result) => {
                if change.finish(&mut self.orders, &mut self.errors, result) {
                    vec![Fetch::Orders, Fetch::Insights]
                } else {
                    Vec::new()
                }
            }
            ManagerOutcome::Report(result) => {
                self.finish_report(result);
                Vec::new()
            }
        }
    }
}
