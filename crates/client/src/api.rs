//! REST client for the order backend.
//!
//! Wraps the backend's order and product endpoints using [`reqwest`]
//! and maps every failure into the boundary taxonomy.

use async_trait::async_trait;
use common::OrderId;
use domain::{CatalogProduct, OrderSummary, PersistedOrder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::{ApiError, HttpError};
use crate::gateway::OrderGateway;
use crate::wire::{OrderDetailDto, OrderPayload, OrderSummaryDto, ProductDto};

/// HTTP client for one backend instance.
#[derive(Debug, Clone)]
pub struct OrdersApi {
    client: reqwest::Client,
    base_url: String,
}

impl OrdersApi {
    /// Creates a client from configuration.
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    /// Creates a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across several backends).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn orders_url(&self) -> String {
        format!("{}/api/order", self.base_url)
    }

    fn order_url(&self, id: OrderId) -> String {
        format!("{}/api/order/{}", self.base_url, id)
    }

    fn products_url(&self) -> String {
        format!("{}/api/products", self.base_url)
    }

    // ---- private helpers ----

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, HttpError> {
        let response = self.client.get(url).send().await?;
        Self::parse_response(response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: String,
        body: &impl Serialize,
    ) -> Result<T, HttpError> {
        let response = self.client.post(url).json(body).send().await?;
        Self::parse_response(response).await
    }

    async fn put_json<T: DeserializeOwned>(
        &self,
        url: String,
        body: &impl Serialize,
    ) -> Result<T, HttpError> {
        let response = self.client.put(url).json(body).send().await?;
        Self::parse_response(response).await
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`HttpError::Status`]
    /// carrying the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, HttpError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(HttpError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, HttpError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), HttpError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl OrderGateway for OrdersApi {
    #[tracing::instrument(skip(self))]
    async fn fetch_products(&self) -> Result<Vec<CatalogProduct>, ApiError> {
        let products: Vec<ProductDto> = self
            .get_json(self.products_url())
            .await
            .map_err(ApiError::CatalogUnavailable)?;

        tracing::debug!(count = products.len(), "fetched product catalog");
        Ok(products.into_iter().map(CatalogProduct::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn list_orders(&self) -> Result<Vec<OrderSummary>, ApiError> {
        let orders: Vec<OrderSummaryDto> = self
            .get_json(self.orders_url())
            .await
            .map_err(ApiError::FetchFailed)?;

        tracing::debug!(count = orders.len(), "fetched order list");
        Ok(orders.into_iter().map(OrderSummary::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn get_order(&self, id: OrderId) -> Result<PersistedOrder, ApiError> {
        let detail: OrderDetailDto = self
            .get_json(self.order_url(id))
            .await
            .map_err(ApiError::FetchFailed)?;
        Ok(PersistedOrder::from(detail))
    }

    #[tracing::instrument(skip(self, payload))]
    async fn create_order(&self, payload: &OrderPayload) -> Result<PersistedOrder, ApiError> {
        let detail: OrderDetailDto = self
            .post_json(self.orders_url(), payload)
            .await
            .map_err(ApiError::SubmissionFailed)?;

        tracing::info!(order_id = %detail.id, "order created");
        Ok(PersistedOrder::from(detail))
    }

    #[tracing::instrument(skip(self, payload))]
    async fn update_order(
        &self,
        id: OrderId,
        payload: &OrderPayload,
    ) -> Result<PersistedOrder, ApiError> {
        let detail: OrderDetailDto = self
            .put_json(self.order_url(id), payload)
            .await
            .map_err(ApiError::SubmissionFailed)?;

        tracing::info!(order_id = %id, "order updated");
        Ok(PersistedOrder::from(detail))
    }

    #[tracing::instrument(skip(self))]
    async fn delete_order(&self, id: OrderId) -> Result<(), ApiError> {
        // The confirmation body is not interpreted beyond the status.
        let result = async {
            let response = self.client.delete(self.order_url(id)).send().await?;
            Self::check_status(response).await
        }
        .await;

        result.map_err(ApiError::DeletionFailed)?;
        tracing::info!(order_id = %id, "order deleted");
        Ok(())
    }
}
