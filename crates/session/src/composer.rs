//! Composition state for one order being created or edited.

use client::{ApiError, OrderGateway, OrderPayload};
use common::{OrderId, ProductId};
use domain::{Catalog, DraftOrder, InvalidLineItem, LineItemEditor, PersistedOrder};

/// One order being composed: the draft plus the line-item form while
/// one is open.
///
/// The draft is the single source of truth for the composition; the
/// editor only stages inputs until a confirm applies them. A failed
/// save leaves the draft exactly as it was so the user can retry.
#[derive(Debug)]
pub struct OrderComposer {
    draft: DraftOrder,
    editor: Option<LineItemEditor>,
}

impl OrderComposer {
    /// Starts composing a brand-new order.
    pub fn new_order() -> Self {
        Self {
            draft: DraftOrder::new(),
            editor: None,
        }
    }

    /// Fetches a persisted order and opens it for editing.
    pub async fn open<G: OrderGateway>(
        gateway: &G,
        id: OrderId,
        catalog: &Catalog,
    ) -> Result<Self, ApiError> {
        let persisted = gateway.get_order(id).await?;
        Ok(Self {
            draft: DraftOrder::from_persisted(&persisted, catalog),
            editor: None,
        })
    }

    // Query methods

    /// The draft being composed.
    pub fn draft(&self) -> &DraftOrder {
        &self.draft
    }

    /// The open line-item form, if any.
    pub fn editor(&self) -> Option<&LineItemEditor> {
        self.editor.as_ref()
    }

    /// Returns true while the line-item form is open.
    pub fn is_form_open(&self) -> bool {
        self.editor.is_some()
    }

    // Mutation methods

    /// Opens the form for adding a product. Reopening discards any
    /// staged inputs.
    pub fn open_add_form(&mut self) {
        self.editor = Some(LineItemEditor::add_product());
    }

    /// Opens the form for editing an existing line. Returns false when
    /// the product has no line item; the form stays closed.
    pub fn open_edit_form(&mut self, product_id: ProductId) -> bool {
        match LineItemEditor::edit_line(&self.draft, product_id) {
            Some(editor) => {
                self.editor = Some(editor);
                true
            }
            None => false,
        }
    }

    /// Closes the form, discarding staged inputs. The draft is
    /// untouched.
    pub fn cancel_form(&mut self) {
        self.editor = None;
    }

    /// Forwards a product selection to the open form. Ignored when no
    /// form is open.
    pub fn select_product(&mut self, product_id: ProductId) {
        if let Some(editor) = self.editor.as_mut() {
            editor.select_product(product_id);
        }
    }

    /// Forwards a quantity entry to the open form. Ignored when no
    /// form is open.
    pub fn set_quantity(&mut self, quantity: u32) {
        if let Some(editor) = self.editor.as_mut() {
            editor.set_quantity(quantity);
        }
    }

    /// Confirms the open form against the draft.
    ///
    /// On success the form closes; on failure it stays open with its
    /// inputs and error intact. Confirming with no form open does
    /// nothing.
    pub fn confirm_form(&mut self, catalog: &Catalog) -> Result<(), InvalidLineItem> {
        let Some(editor) = self.editor.as_mut() else {
            return Ok(());
        };
        editor.confirm(&mut self.draft, catalog)?;
        self.editor = None;
        Ok(())
    }

    /// Removes the line item for a product from the draft.
    pub fn remove_line(&mut self, product_id: ProductId) {
        self.draft.remove_line_item(product_id);
    }

    /// Reconciles the draft into a payload and submits it: create when
    /// the draft has no backend id, update when it does.
    ///
    /// Takes `&self` so a failed submission cannot disturb the
    /// composition.
    pub async fn save<G: OrderGateway>(&self, gateway: &G) -> Result<PersistedOrder, ApiError> {
        let payload = OrderPayload::from_draft(&self.draft);
        match gateway.submit_order(&payload).await {
            Ok(persisted) => {
                metrics::counter!("orders_submitted_total").increment(1);
                tracing::info!(order_id = %persisted.id, "order submitted");
                Ok(persisted)
            }
            Err(err) => {
                metrics::counter!("order_submission_failures_total").increment(1);
                tracing::warn!(error = %err, "order submission failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client::InMemoryOrderGateway;
    use common::Money;
    use domain::{CatalogProduct, PersistedLine};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogProduct::new(1, "Widget", Money::from_dollars(10), 5),
            CatalogProduct::new(2, "Gadget", Money::from_cents(250), 12),
        ])
    }

    fn gateway() -> InMemoryOrderGateway {
        InMemoryOrderGateway::with_products(vec![
            CatalogProduct::new(1, "Widget", Money::from_dollars(10), 5),
            CatalogProduct::new(2, "Gadget", Money::from_cents(250), 12),
        ])
    }

    #[test]
    fn new_order_starts_empty_with_no_form() {
        let composer = OrderComposer::new_order();
        assert!(!composer.draft().has_items());
        assert!(!composer.is_form_open());
    }

    #[test]
    fn add_flow_through_form() {
        let catalog = catalog();
        let mut composer = OrderComposer::new_order();

        composer.open_add_form();
        composer.select_product(ProductId::new(1));
        composer.set_quantity(2);
        composer.confirm_form(&catalog).unwrap();

        assert!(!composer.is_form_open());
        assert_eq!(composer.draft().total_quantity(), 2);
    }

    #[test]
    fn failed_confirm_keeps_form_open() {
        let catalog = catalog();
        let mut composer = OrderComposer::new_order();

        composer.open_add_form();
        composer.select_product(ProductId::new(1));
        composer.set_quantity(9);
        let result = composer.confirm_form(&catalog);

        assert!(matches!(
            result,
            Err(InvalidLineItem::InsufficientStock { .. })
        ));
        assert!(composer.is_form_open());
        assert!(composer.editor().unwrap().last_error().is_some());
    }

    #[test]
    fn confirm_without_form_is_noop() {
        let mut composer = OrderComposer::new_order();
        assert_eq!(composer.confirm_form(&catalog()), Ok(()));
    }

    #[test]
    fn cancel_discards_staged_input() {
        let mut composer = OrderComposer::new_order();
        composer.open_add_form();
        composer.select_product(ProductId::new(1));
        composer.set_quantity(3);

        composer.cancel_form();

        assert!(!composer.is_form_open());
        assert!(!composer.draft().has_items());
    }

    #[test]
    fn edit_form_requires_existing_line() {
        let catalog = catalog();
        let mut composer = OrderComposer::new_order();
        assert!(!composer.open_edit_form(ProductId::new(1)));

        composer.open_add_form();
        composer.select_product(ProductId::new(1));
        composer.set_quantity(2);
        composer.confirm_form(&catalog).unwrap();

        assert!(composer.open_edit_form(ProductId::new(1)));
    }

    #[tokio::test]
    async fn save_new_order_creates() {
        let gateway = gateway();
        let catalog = catalog();
        let mut composer = OrderComposer::new_order();
        composer.open_add_form();
        composer.select_product(ProductId::new(2));
        composer.set_quantity(4);
        composer.confirm_form(&catalog).unwrap();

        let persisted = composer.save(&gateway).await.unwrap();

        assert_eq!(gateway.order_count(), 1);
        assert_eq!(persisted.lines.len(), 1);
        assert_eq!(persisted.lines[0].quantity, 4);
        assert!(persisted.order_number.is_some());
    }

    #[tokio::test]
    async fn save_opened_order_updates_in_place() {
        let gateway = gateway();
        let catalog = catalog();
        let id = gateway.seed_order(vec![PersistedLine {
            product_id: ProductId::new(1),
            quantity: 2,
        }]);

        let mut composer = OrderComposer::open(&gateway, id, &catalog).await.unwrap();
        composer.open_edit_form(ProductId::new(1));
        composer.set_quantity(5);
        composer.confirm_form(&catalog).unwrap();
        let persisted = composer.save(&gateway).await.unwrap();

        assert_eq!(persisted.id, id);
        assert_eq!(gateway.order_count(), 1);
        assert_eq!(persisted.lines[0].quantity, 5);
    }

    #[tokio::test]
    async fn failed_save_leaves_draft_intact() {
        let gateway = gateway();
        let catalog = catalog();
        let mut composer = OrderComposer::new_order();
        composer.open_add_form();
        composer.select_product(ProductId::new(1));
        composer.set_quantity(2);
        composer.confirm_form(&catalog).unwrap();

        gateway.set_fail_on_submit(true);
        let result = composer.save(&gateway).await;

        assert!(matches!(result, Err(ApiError::SubmissionFailed(_))));
        assert_eq!(gateway.order_count(), 0);
        assert_eq!(composer.draft().total_quantity(), 2);
    }
}
