//! Transient state for the add/edit line-item form.

use common::ProductId;

use crate::catalog::Catalog;
use crate::draft::{DraftOrder, InvalidLineItem};

/// What the open form is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Choosing any catalog product to add to the draft.
    AddProduct,

    /// Changing the quantity of one existing line.
    EditLine { product_id: ProductId },
}

/// Selection state while the line-item form is open.
///
/// On a failed confirm the entered values stay put together with the
/// validation error, so the user can correct instead of retype. A
/// successful confirm resets everything.
#[derive(Debug, Clone)]
pub struct LineItemEditor {
    mode: EditorMode,
    selected_product: Option<ProductId>,
    pending_quantity: u32,
    last_error: Option<InvalidLineItem>,
}

impl LineItemEditor {
    /// Opens the form for adding a product, fields empty.
    pub fn add_product() -> Self {
        Self {
            mode: EditorMode::AddProduct,
            selected_product: None,
            pending_quantity: 0,
            last_error: None,
        }
    }

    /// Opens the form for editing an existing line, seeded with its
    /// current quantity. Returns `None` when the product has no line
    /// item; there is nothing to edit and the form stays closed.
    pub fn edit_line(draft: &DraftOrder, product_id: ProductId) -> Option<Self> {
        let item = draft.get_line_item(product_id)?;
        Some(Self {
            mode: EditorMode::EditLine { product_id },
            selected_product: Some(product_id),
            pending_quantity: item.quantity,
            last_error: None,
        })
    }

    /// Returns what the form is doing.
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Returns the currently selected product.
    pub fn selected_product(&self) -> Option<ProductId> {
        self.selected_product
    }

    /// Returns the quantity entered so far (0 = empty field).
    pub fn pending_quantity(&self) -> u32 {
        self.pending_quantity
    }

    /// Returns the validation error from the last failed confirm.
    pub fn last_error(&self) -> Option<&InvalidLineItem> {
        self.last_error.as_ref()
    }

    /// Selects a product. Ignored in edit mode, where the line is
    /// fixed.
    pub fn select_product(&mut self, product_id: ProductId) {
        if self.mode == EditorMode::AddProduct {
            self.selected_product = Some(product_id);
        }
    }

    /// Sets the entered quantity.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.pending_quantity = quantity;
    }

    /// Upper bound for the quantity field: the product's available
    /// stock, when the product is known to the catalog.
    pub fn max_quantity(&self, catalog: &Catalog) -> Option<u32> {
        let product_id = match self.mode {
            EditorMode::AddProduct => self.selected_product?,
            EditorMode::EditLine { product_id } => product_id,
        };
        catalog
            .find(product_id)
            .map(|product| product.available_stock)
    }

    /// Applies the entered values to the draft.
    ///
    /// Add mode accumulates via `add_line_item`; edit mode replaces
    /// via `update_quantity` with a stock clamp when the product is
    /// known. On error the form keeps its inputs and records the
    /// error; on success it resets.
    pub fn confirm(
        &mut self,
        draft: &mut DraftOrder,
        catalog: &Catalog,
    ) -> Result<(), InvalidLineItem> {
        let result = self.apply(draft, catalog);
        match &result {
            Ok(()) => self.reset(),
            Err(err) => self.last_error = Some(err.clone()),
        }
        result
    }

    fn apply(&self, draft: &mut DraftOrder, catalog: &Catalog) -> Result<(), InvalidLineItem> {
        match self.mode {
            EditorMode::AddProduct => {
                let product_id = self
                    .selected_product
                    .ok_or(InvalidLineItem::NoProductSelected)?;
                draft.add_line_item(product_id, self.pending_quantity, catalog)
            }
            EditorMode::EditLine { product_id } => {
                // Lines whose product vanished from the catalog have no
                // stock figure; their quantity stays freely editable.
                if let Some(product) = catalog.find(product_id) {
                    if self.pending_quantity > product.available_stock {
                        return Err(InvalidLineItem::InsufficientStock {
                            product_id,
                            requested: self.pending_quantity,
                            available: product.available_stock,
                        });
                    }
                }
                draft.update_quantity(product_id, self.pending_quantity)
            }
        }
    }

    fn reset(&mut self) {
        self.selected_product = None;
        self.pending_quantity = 0;
        self.last_error = None;
    }
}
