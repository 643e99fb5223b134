//! Wire shapes of the backend contract.
//!
//! The backend spells its fields `OrderNo`, `FinalPrice`, `Quantity`,
//! `createdAt`, and reports product stock as either `stock` or
//! `quantity` depending on version. All of that is absorbed here;
//! domain types never see wire names.

use chrono::{DateTime, Utc};
use common::{Money, OrderId, ProductId};
use domain::{CatalogProduct, DraftOrder, OrderSummary, PersistedLine, PersistedOrder};
use serde::{Deserialize, Deserializer, Serialize};

/// Product row of `GET /api/products`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub price: f64,
    /// Units available. Older backend versions call this `quantity`.
    #[serde(alias = "quantity", default)]
    pub stock: u32,
}

impl From<ProductDto> for CatalogProduct {
    fn from(dto: ProductDto) -> Self {
        CatalogProduct::new(dto.id, dto.name, Money::from_decimal(dto.price), dto.stock)
    }
}

/// Order row of `GET /api/order`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderSummaryDto {
    pub id: i64,
    #[serde(rename = "OrderNo", deserialize_with = "string_or_number", default)]
    pub order_no: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "FinalPrice", default)]
    pub final_price: f64,
    #[serde(rename = "Quantity", default)]
    pub quantity: u32,
}

impl From<OrderSummaryDto> for OrderSummary {
    fn from(dto: OrderSummaryDto) -> Self {
        OrderSummary {
            id: OrderId::new(dto.id),
            order_number: dto.order_no,
            created_at: dto.created_at,
            total_quantity: dto.quantity,
            total_price: Money::from_decimal(dto.final_price),
        }
    }
}

/// One order-line row of the get-order response.
///
/// `id` and `orderId` are the backend's join-table identifiers, an id
/// space of their own; only `productId` and `quantity` reach the
/// domain.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "orderId", default)]
    pub order_id: Option<i64>,
    #[serde(rename = "productId")]
    pub product_id: i64,
    pub quantity: u32,
}

/// Response of `GET /api/order/{id}` and of create/update.
///
/// `products` decodes as empty when the backend omits it, which
/// create responses sometimes do.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDetailDto {
    pub id: i64,
    #[serde(rename = "OrderNo", deserialize_with = "string_or_number", default)]
    pub order_no: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub products: Vec<OrderLineDto>,
}

impl From<OrderDetailDto> for PersistedOrder {
    fn from(dto: OrderDetailDto) -> Self {
        PersistedOrder {
            id: OrderId::new(dto.id),
            order_number: (!dto.order_no.is_empty()).then_some(dto.order_no),
            created_at: dto.created_at,
            lines: dto
                .products
                .into_iter()
                .map(|line| PersistedLine {
                    product_id: ProductId::new(line.product_id),
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

/// Create/update payload: the minimal identifying facts.
///
/// Names, prices, and totals are stripped; the backend recomputes
/// them server-side from its own product table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    pub products: Vec<PayloadLine>,
}

/// One product-quantity pair of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadLine {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    pub quantity: u32,
}

impl OrderPayload {
    /// Reconciles a draft into the wire shape.
    pub fn from_draft(draft: &DraftOrder) -> Self {
        Self {
            id: draft.id(),
            products: draft
                .line_items()
                .iter()
                .map(|item| PayloadLine {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

/// The backend is inconsistent about `OrderNo`: some rows carry a
/// number, some a string, some null. All normalize to a string.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(text)) => text,
        Some(Raw::Number(number)) => number.to_string(),
        None => String::new(),
    })
}
