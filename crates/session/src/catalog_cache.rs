//! Session-lifetime cache of the product catalog.
//!
//! The catalog is fetched once per session and shared by every order
//! being composed. A refresh replaces the whole snapshot; a failed
//! refresh keeps the previous snapshot usable.

use client::{ApiError, OrderGateway};
use common::ProductId;
use domain::{Catalog, CatalogProduct};

use crate::fetch::FetchState;

/// Cached catalog plus the lifecycle of its last fetch.
#[derive(Debug, Default)]
pub struct CatalogCache {
    catalog: Catalog,
    state: FetchState,
}

impl CatalogCache {
    // Query methods

    /// The current catalog snapshot. Empty until the first successful load.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Looks up a product in the snapshot.
    pub fn find(&self, product_id: ProductId) -> Option<&CatalogProduct> {
        self.catalog.find(product_id)
    }

    /// Lifecycle of the last load.
    pub fn state(&self) -> &FetchState {
        &self.state
    }

    // Mutation methods

    /// Fetches the catalog and replaces the snapshot wholesale.
    ///
    /// A load issued while another is in flight is ignored. On failure the
    /// previous snapshot stays in place so open drafts keep pricing data.
    pub async fn load<G: OrderGateway>(&mut self, gateway: &G) -> Result<(), ApiError> {
        if self.state.is_loading() {
            tracing::debug!("catalog load already in flight, ignoring");
            return Ok(());
        }
        self.state = FetchState::Loading;

        match gateway.fetch_products().await {
            Ok(products) => {
                metrics::counter!("catalog_loads_total").increment(1);
                tracing::debug!(products = products.len(), "catalog loaded");
                self.catalog = Catalog::new(products);
                self.state = FetchState::Loaded(());
                Ok(())
            }
            Err(err) => {
                metrics::counter!("catalog_load_failures_total").increment(1);
                tracing::warn!(error = %err, "catalog load failed");
                self.state = FetchState::Failed(err.to_string());
                Err(err)
            }
        }
    }
}
