//! Order list view state.

use client::{ApiError, OrderGateway};
use common::OrderId;
use domain::OrderSummary;

use crate::fetch::FetchState;

/// The order list plus the two-step delete decision.
///
/// Deleting is armed by `request_delete`, then either cancelled or
/// confirmed. Only a confirmed delete talks to the backend; a failed
/// one leaves the decision armed so the user can retry or cancel.
#[derive(Debug, Default)]
pub struct OrderListModel {
    orders: FetchState<Vec<OrderSummary>>,
    pending_delete: Option<OrderId>,
}

impl OrderListModel {
    // Query methods

    /// Lifecycle of the last refresh.
    pub fn state(&self) -> &FetchState<Vec<OrderSummary>> {
        &self.orders
    }

    /// The fetched summaries. Empty unless the last refresh succeeded.
    pub fn orders(&self) -> &[OrderSummary] {
        self.orders.loaded().map(Vec::as_slice).unwrap_or_default()
    }

    /// The order armed for deletion, if any.
    pub fn pending_delete(&self) -> Option<OrderId> {
        self.pending_delete
    }

    // Mutation methods

    /// Fetches the order list, replacing whatever was shown before.
    ///
    /// A refresh issued while another is in flight is ignored.
    pub async fn refresh<G: OrderGateway>(&mut self, gateway: &G) -> Result<(), ApiError> {
        if self.orders.is_loading() {
            tracing::debug!("order list refresh already in flight, ignoring");
            return Ok(());
        }
        self.orders = FetchState::Loading;

        match gateway.list_orders().await {
            Ok(summaries) => {
                tracing::debug!(orders = summaries.len(), "order list loaded");
                self.orders = FetchState::Loaded(summaries);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "order list refresh failed");
                self.orders = FetchState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Arms the delete decision for one order. Arming another order
    /// replaces the target.
    pub fn request_delete(&mut self, id: OrderId) {
        self.pending_delete = Some(id);
    }

    /// Disarms the delete decision without touching the backend.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Carries out the armed delete.
    ///
    /// Returns the deleted id so the caller can refresh the list, or
    /// `Ok(None)` when nothing was armed. On failure the decision
    /// stays armed.
    pub async fn confirm_delete<G: OrderGateway>(
        &mut self,
        gateway: &G,
    ) -> Result<Option<OrderId>, ApiError> {
        let Some(id) = self.pending_delete else {
            return Ok(None);
        };

        match gateway.delete_order(id).await {
            Ok(()) => {
                metrics::counter!("orders_deleted_total").increment(1);
                tracing::info!(order_id = %id, "order deleted");
                self.pending_delete = None;
                Ok(Some(id))
            }
            Err(err) => {
                metrics::counter!("order_delete_failures_total").increment(1);
                tracing::warn!(order_id = %id, error = %err, "order delete failed");
                Err(err)
            }
        }
    }
}
