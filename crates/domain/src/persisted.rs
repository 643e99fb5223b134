//! Orders as the backend reports them.

use chrono::{DateTime, Utc};
use common::{Money, OrderId, ProductId};
use serde::{Deserialize, Serialize};

/// One stored product-quantity pair of a persisted order.
///
/// The backend's order-line rows also carry a row id and the owning
/// order id; both live in id spaces of their own and are dropped at
/// wire decoding, leaving only the facts the domain needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedLine {
    /// The product identifier.
    pub product_id: ProductId,

    /// Stored quantity.
    pub quantity: u32,
}

/// A full order as returned by the backend, after wire decoding.
///
/// Input to `DraftOrder::from_persisted` when editing, and the result
/// of a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedOrder {
    /// Backend id.
    pub id: OrderId,

    /// Backend-assigned order number.
    pub order_number: Option<String>,

    /// Creation timestamp, when the backend supplies one.
    pub created_at: Option<DateTime<Utc>>,

    /// Stored product-quantity pairs.
    pub lines: Vec<PersistedLine>,
}

/// One row of the order list, with the backend's own totals.
///
/// List totals come from the backend; only drafts compute totals
/// client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Backend id.
    pub id: OrderId,

    /// Backend-assigned order number.
    pub order_number: String,

    /// Creation timestamp, when the backend supplies one.
    pub created_at: Option<DateTime<Utc>>,

    /// Total quantity as computed by the backend.
    pub total_quantity: u32,

    /// Total price as computed by the backend.
    pub total_price: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_order_serialization_roundtrip() {
        let order = PersistedOrder {
            id: OrderId::new(7),
            order_number: Some("ORD-0007".to_string()),
            created_at: Some("2024-03-01T12:00:00Z".parse().unwrap()),
            lines: vec![PersistedLine {
                product_id: ProductId::new(1),
                quantity: 3,
            }],
        };

        let json = serde_json::to_string(&order).unwrap();
        let deserialized: PersistedOrder = serde_json::from_str(&json).unwrap();
        assert_eq!(order, deserialized);
    }
}
