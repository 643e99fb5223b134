//! Order gateway trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{Money, OrderId};
use domain::{CatalogProduct, OrderSummary, PersistedLine, PersistedOrder};

use crate::error::{ApiError, HttpError};
use crate::wire::OrderPayload;

/// Async boundary over the backend HTTP contract.
///
/// `OrdersApi` talks to the real backend; `InMemoryOrderGateway`
/// mimics it for tests and offline runs.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Fetches the product catalog.
    async fn fetch_products(&self) -> Result<Vec<CatalogProduct>, ApiError>;

    /// Fetches all order summaries.
    async fn list_orders(&self) -> Result<Vec<OrderSummary>, ApiError>;

    /// Fetches one order by id.
    async fn get_order(&self, id: OrderId) -> Result<PersistedOrder, ApiError>;

    /// Creates a new order from the payload.
    async fn create_order(&self, payload: &OrderPayload) -> Result<PersistedOrder, ApiError>;

    /// Updates the order addressed by `id` with the payload.
    async fn update_order(
        &self,
        id: OrderId,
        payload: &OrderPayload,
    ) -> Result<PersistedOrder, ApiError>;

    /// Deletes one order by id.
    async fn delete_order(&self, id: OrderId) -> Result<(), ApiError>;

    /// Dispatches a payload: create when it carries no id, update when
    /// it does.
    async fn submit_order(&self, payload: &OrderPayload) -> Result<PersistedOrder, ApiError> {
        match payload.id {
            Some(id) => self.update_order(id, payload).await,
            None => self.create_order(payload).await,
        }
    }
}

#[derive(Debug)]
struct StoredOrder {
    order_number: String,
    created_at: DateTime<Utc>,
    lines: Vec<PersistedLine>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    products: Vec<CatalogProduct>,
    orders: HashMap<OrderId, StoredOrder>,
    next_order_id: i64,
    next_order_no: u32,
    fail_on_products: bool,
    fail_on_fetch: bool,
    fail_on_submit: bool,
    fail_on_delete: bool,
}

/// In-memory gateway for testing and offline runs.
///
/// Behaves like the backend: assigns ids and order numbers, stores
/// only product-quantity pairs, and recomputes totals from its own
/// product list when summarizing. Each operation class has a failure
/// toggle for error-path tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderGateway {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryOrderGateway {
    /// Creates an empty in-memory gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway whose catalog holds the given products.
    pub fn with_products(products: Vec<CatalogProduct>) -> Self {
        let gateway = Self::new();
        gateway.state.write().unwrap().products = products;
        gateway
    }

    /// Configures the catalog fetch to fail.
    pub fn set_fail_on_products(&self, fail: bool) {
        self.state.write().unwrap().fail_on_products = fail;
    }

    /// Configures order reads (list and get) to fail.
    pub fn set_fail_on_fetch(&self, fail: bool) {
        self.state.write().unwrap().fail_on_fetch = fail;
    }

    /// Configures create/update to fail.
    pub fn set_fail_on_submit(&self, fail: bool) {
        self.state.write().unwrap().fail_on_submit = fail;
    }

    /// Configures delete to fail.
    pub fn set_fail_on_delete(&self, fail: bool) {
        self.state.write().unwrap().fail_on_delete = fail;
    }

    /// Stores an order directly, returning its assigned id.
    pub fn seed_order(&self, lines: Vec<PersistedLine>) -> OrderId {
        let mut state = self.state.write().unwrap();
        let (id, stored) = Self::store(&mut state, lines);
        state.orders.insert(id, stored);
        id
    }

    /// Returns the number of stored orders.
    pub fn order_count(&self) -> usize {
        self.state.read().unwrap().orders.len()
    }

    /// Returns true if an order with the given id is stored.
    pub fn contains_order(&self, id: OrderId) -> bool {
        self.state.read().unwrap().orders.contains_key(&id)
    }

    fn store(state: &mut InMemoryState, lines: Vec<PersistedLine>) -> (OrderId, StoredOrder) {
        state.next_order_id += 1;
        state.next_order_no += 1;
        let stored = StoredOrder {
            order_number: format!("ORD-{:04}", state.next_order_no),
            created_at: Utc::now(),
            lines,
        };
        (OrderId::new(state.next_order_id), stored)
    }

    fn persisted(id: OrderId, stored: &StoredOrder) -> PersistedOrder {
        PersistedOrder {
            id,
            order_number: Some(stored.order_number.clone()),
            created_at: Some(stored.created_at),
            lines: stored.lines.clone(),
        }
    }

    /// Totals come from the stored lines and the gateway's own product
    /// list, the way the real backend recomputes them server-side.
    fn summarize(state: &InMemoryState, id: OrderId, stored: &StoredOrder) -> OrderSummary {
        let total_price = stored.lines.iter().fold(Money::zero(), |acc, line| {
            let unit_price = state
                .products
                .iter()
                .find(|product| product.id == line.product_id)
                .map(|product| product.unit_price)
                .unwrap_or_else(Money::zero);
            acc + unit_price.multiply(line.quantity)
        });

        OrderSummary {
            id,
            order_number: stored.order_number.clone(),
            created_at: Some(stored.created_at),
            total_quantity: stored.lines.iter().map(|line| line.quantity).sum(),
            total_price,
        }
    }

    fn injected_failure() -> HttpError {
        HttpError::Status {
            status: 500,
            body: "injected failure".to_string(),
        }
    }

    fn not_found(id: OrderId) -> HttpError {
        HttpError::Status {
            status: 404,
            body: format!("order {id} not found"),
        }
    }

    fn payload_lines(payload: &OrderPayload) -> Vec<PersistedLine> {
        payload
            .products
            .iter()
            .map(|line| PersistedLine {
                product_id: line.product_id,
                quantity: line.quantity,
            })
            .collect()
    }
}

#[async_trait]
impl OrderGateway for InMemoryOrderGateway {
    async fn fetch_products(&self) -> Result<Vec<CatalogProduct>, ApiError> {
        let state = self.state.read().unwrap();
        if state.fail_on_products {
            return Err(ApiError::CatalogUnavailable(Self::injected_failure()));
        }
        Ok(state.products.clone())
    }

    async fn list_orders(&self) -> Result<Vec<OrderSummary>, ApiError> {
        let state = self.state.read().unwrap();
        if state.fail_on_fetch {
            return Err(ApiError::FetchFailed(Self::injected_failure()));
        }

        let mut summaries: Vec<OrderSummary> = state
            .orders
            .iter()
            .map(|(&id, stored)| Self::summarize(&state, id, stored))
            .collect();
        summaries.sort_by_key(|summary| summary.id);
        Ok(summaries)
    }

    async fn get_order(&self, id: OrderId) -> Result<PersistedOrder, ApiError> {
        let state = self.state.read().unwrap();
        if state.fail_on_fetch {
            return Err(ApiError::FetchFailed(Self::injected_failure()));
        }

        state
            .orders
            .get(&id)
            .map(|stored| Self::persisted(id, stored))
            .ok_or_else(|| ApiError::FetchFailed(Self::not_found(id)))
    }

    async fn create_order(&self, payload: &OrderPayload) -> Result<PersistedOrder, ApiError> {
        let mut state = self.state.write().unwrap();
        if state.fail_on_submit {
            return Err(ApiError::SubmissionFailed(Self::injected_failure()));
        }

        let (id, stored) = Self::store(&mut state, Self::payload_lines(payload));
        let persisted = Self::persisted(id, &stored);
        state.orders.insert(id, stored);
        Ok(persisted)
    }

    async fn update_order(
        &self,
        id: OrderId,
        payload: &OrderPayload,
    ) -> Result<PersistedOrder, ApiError> {
        let mut state = self.state.write().unwrap();
        if state.fail_on_submit {
            return Err(ApiError::SubmissionFailed(Self::injected_failure()));
        }

        // The path id addresses the order; a stray payload id is
        // ignored, as the real backend does.
        let stored = state
            .orders
            .get_mut(&id)
            .ok_or_else(|| ApiError::SubmissionFailed(Self::not_found(id)))?;
        stored.lines = Self::payload_lines(payload);
        Ok(Self::persisted(id, stored))
    }

    async fn delete_order(&self, id: OrderId) -> Result<(), ApiError> {
        let mut state = self.state.write().unwrap();
        if state.fail_on_delete {
            return Err(ApiError::DeletionFailed(Self::injected_failure()));
        }

        state
            .orders
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ApiError::DeletionFailed(Self::not_found(id)))
    }
}
