//! Draft order state machine.

use chrono::{DateTime, Utc};
use common::{Money, OrderId, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::persisted::PersistedOrder;

/// Display name used when a line item's product is missing from the
/// current catalog.
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown Product";

/// Validation failures for line-item mutations.
///
/// Every variant leaves the draft untouched; the caller surfaces the
/// message and the user corrects the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidLineItem {
    /// Quantity must be at least one.
    #[error("Invalid quantity: {quantity} (must be at least 1)")]
    InvalidQuantity { quantity: u32 },

    /// The product id does not resolve in the current catalog.
    #[error("Unknown product: {product_id}")]
    UnknownProduct { product_id: ProductId },

    /// The resulting quantity would exceed the available stock.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// A quantity edit addressed a product with no line item.
    #[error("Product {product_id} has no line item in this order")]
    NotInOrder { product_id: ProductId },

    /// The add form was confirmed without choosing a product.
    #[error("No product selected")]
    NoProductSelected,
}

/// One product-quantity pair within a draft order.
///
/// The unit price is snapshotted from the catalog when the line is
/// created and never changes afterwards, regardless of later catalog
/// refetches or quantity edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The product identifier.
    pub product_id: ProductId,

    /// Quantity ordered. Always at least one for lines created by
    /// `add_line_item`; persisted data is taken as-is.
    pub quantity: u32,

    /// Price per unit captured when the line was created.
    pub unit_price: Money,
}

impl LineItem {
    /// Returns the total price for this line (quantity * unit_price).
    pub fn total_price(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// Display row for one line item, joined against the catalog for the
/// product name. The price shown is the snapshot, not the live
/// catalog price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemView {
    /// The product identifier.
    pub product_id: ProductId,

    /// Catalog name, or a placeholder when the product is unknown.
    pub product_name: String,

    /// Quantity ordered.
    pub quantity: u32,

    /// Snapshotted price per unit.
    pub unit_price: Money,

    /// Quantity times the snapshotted unit price.
    pub line_total: Money,
}

/// An order being composed or edited, not yet persisted.
///
/// `total_quantity` and `total_price` are derived from the line items
/// and recomputed inside every mutating operation; no intermediate
/// state with stale totals is observable and no setter for them
/// exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftOrder {
    /// Backend id when editing an existing order, `None` for a new one.
    id: Option<OrderId>,

    /// Backend-assigned order number, display only.
    order_number: Option<String>,

    /// Creation timestamp of the persisted order, display only.
    created_at: Option<DateTime<Utc>>,

    /// Line items in insertion order, unique by product id.
    line_items: Vec<LineItem>,

    /// Sum of quantities over all line items.
    total_quantity: u32,

    /// Sum of quantity times unit-price snapshot over all line items.
    total_price: Money,
}

// Query methods
impl DraftOrder {
    /// Returns the backend id, if this draft edits a persisted order.
    pub fn id(&self) -> Option<OrderId> {
        self.id
    }

    /// Returns the backend-assigned order number.
    pub fn order_number(&self) -> Option<&str> {
        self.order_number.as_deref()
    }

    /// Returns the persisted creation timestamp.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns the line items in insertion order.
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Returns the line item for a product, if present.
    pub fn get_line_item(&self, product_id: ProductId) -> Option<&LineItem> {
        self.line_items
            .iter()
            .find(|item| item.product_id == product_id)
    }

    /// Returns the number of line items.
    pub fn line_count(&self) -> usize {
        self.line_items.len()
    }

    /// Returns true if the draft has at least one line item.
    pub fn has_items(&self) -> bool {
        !self.line_items.is_empty()
    }

    /// Returns the total quantity over all line items.
    pub fn total_quantity(&self) -> u32 {
        self.total_quantity
    }

    /// Returns the total price over all line items.
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    /// Produces display rows by joining line items against the catalog.
    ///
    /// Products missing from the catalog render with a placeholder
    /// name; the snapshotted price is shown either way.
    pub fn line_views(&self, catalog: &Catalog) -> Vec<LineItemView> {
        self.line_items
            .iter()
            .map(|item| LineItemView {
                product_id: item.product_id,
                product_name: catalog
                    .find(item.product_id)
                    .map(|product| product.name.clone())
                    .unwrap_or_else(|| UNKNOWN_PRODUCT_NAME.to_string()),
                quantity: item.quantity,
                unit_price: item.unit_price,
                line_total: item.total_price(),
            })
            .collect()
    }
}

// Mutation methods
impl DraftOrder {
    /// Creates an empty draft for a new order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a draft from a persisted order, mapping each stored
    /// line onto the current catalog.
    ///
    /// Lines whose product is missing from the catalog are kept with a
    /// zero price snapshot rather than dropped; the user must still be
    /// able to see and remove them. Duplicate product ids in the
    /// persisted data merge by quantity so the uniqueness invariant
    /// holds from the start.
    pub fn from_persisted(persisted: &PersistedOrder, catalog: &Catalog) -> Self {
        let mut draft = Self {
            id: Some(persisted.id),
            order_number: persisted.order_number.clone(),
            created_at: persisted.created_at,
            line_items: Vec::with_capacity(persisted.lines.len()),
            total_quantity: 0,
            total_price: Money::zero(),
        };

        for line in &persisted.lines {
            match draft
                .line_items
                .iter_mut()
                .find(|item| item.product_id == line.product_id)
            {
                Some(item) => item.quantity += line.quantity,
                None => {
                    let unit_price = catalog
                        .find(line.product_id)
                        .map(|product| product.unit_price)
                        .unwrap_or_else(Money::zero);
                    draft.line_items.push(LineItem {
                        product_id: line.product_id,
                        quantity: line.quantity,
                        unit_price,
                    });
                }
            }
        }

        draft.recalculate_totals();
        draft
    }

    /// Adds a quantity of a product to the draft.
    ///
    /// If the product already has a line item the quantities
    /// accumulate and the existing price snapshot is kept; otherwise a
    /// new line is appended with the catalog's current price. The
    /// accumulated quantity is validated against available stock.
    pub fn add_line_item(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        catalog: &Catalog,
    ) -> Result<(), InvalidLineItem> {
        if quantity == 0 {
            return Err(InvalidLineItem::InvalidQuantity { quantity });
        }

        let product = catalog
            .find(product_id)
            .ok_or(InvalidLineItem::UnknownProduct { product_id })?;

        let current = self
            .get_line_item(product_id)
            .map(|item| item.quantity)
            .unwrap_or(0);
        let requested = current + quantity;
        if requested > product.available_stock {
            return Err(InvalidLineItem::InsufficientStock {
                product_id,
                requested,
                available: product.available_stock,
            });
        }

        match self
            .line_items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            Some(item) => item.quantity = requested,
            None => self.line_items.push(LineItem {
                product_id,
                quantity,
                unit_price: product.unit_price,
            }),
        }

        self.recalculate_totals();
        Ok(())
    }

    /// Replaces the quantity of an existing line item.
    ///
    /// The price snapshot is untouched by a quantity-only edit. Works
    /// for lines whose product has vanished from the catalog, which is
    /// why no catalog is taken here; stock clamping for known products
    /// is the editor's job.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        new_quantity: u32,
    ) -> Result<(), InvalidLineItem> {
        if new_quantity == 0 {
            return Err(InvalidLineItem::InvalidQuantity {
                quantity: new_quantity,
            });
        }

        let item = self
            .line_items
            .iter_mut()
            .find(|item| item.product_id == product_id)
            .ok_or(InvalidLineItem::NotInOrder { product_id })?;

        item.quantity = new_quantity;
        self.recalculate_totals();
        Ok(())
    }

    /// Removes the line item for a product.
    ///
    /// A no-op, not an error, when the product has no line item.
    pub fn remove_line_item(&mut self, product_id: ProductId) {
        if let Some(pos) = self
            .line_items
            .iter()
            .position(|item| item.product_id == product_id)
        {
            self.line_items.remove(pos);
            self.recalculate_totals();
        }
    }

    /// Recomputes both derived totals from the full line-item
    /// collection. Never incremental; called inside every mutation.
    fn recalculate_totals(&mut self) {
        self.total_quantity = self.line_items.iter().map(|item| item.quantity).sum();
        self.total_price = self
            .line_items
            .iter()
            .fold(Money::zero(), |acc, item| acc + item.total_price());
    }
}
