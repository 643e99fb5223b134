//! Product catalog snapshot.

use std::collections::HashMap;

use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// One purchasable product as reported by the backend.
///
/// Immutable once fetched; a catalog refetch replaces the whole
/// snapshot rather than patching entries in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// The product identifier.
    pub id: ProductId,

    /// Human-readable product name.
    pub name: String,

    /// Price per unit at fetch time.
    pub unit_price: Money,

    /// Units available for ordering.
    pub available_stock: u32,
}

impl CatalogProduct {
    /// Creates a new catalog product.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money,
        available_stock: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            available_stock,
        }
    }
}

/// An immutable snapshot of the product catalog.
///
/// Line items reference products by id only; this lookup is the sole
/// bridge between the two, so a refetched catalog never mutates prices
/// already snapshotted into a draft.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Products in the order the backend returned them.
    products: Vec<CatalogProduct>,

    /// Position index by product id.
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Creates a catalog from a fetched product list.
    pub fn new(products: Vec<CatalogProduct>) -> Self {
        let index = products
            .iter()
            .enumerate()
            .map(|(pos, product)| (product.id, pos))
            .collect();
        Self { products, index }
    }

    /// Returns an empty catalog.
    ///
    /// Dependents of a failed catalog fetch see this; every lookup
    /// returns not-found rather than panicking.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Looks up a product by id.
    pub fn find(&self, product_id: ProductId) -> Option<&CatalogProduct> {
        self.index.get(&product_id).map(|&pos| &self.products[pos])
    }

    /// Returns all products in backend order.
    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }

    /// Returns the number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the catalog holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            CatalogProduct::new(1, "Widget", Money::from_dollars(10), 5),
            CatalogProduct::new(2, "Gadget", Money::from_cents(250), 12),
        ])
    }

    #[test]
    fn find_returns_matching_product() {
        let catalog = sample_catalog();
        let product = catalog.find(ProductId::new(2)).unwrap();
        assert_eq!(product.name, "Gadget");
        assert_eq!(product.unit_price, Money::from_cents(250));
        assert_eq!(product.available_stock, 12);
    }

    #[test]
    fn find_unknown_id_returns_none() {
        let catalog = sample_catalog();
        assert!(catalog.find(ProductId::new(99)).is_none());
    }

    #[test]
    fn empty_catalog_finds_nothing() {
        let catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.find(ProductId::new(1)).is_none());
    }

    #[test]
    fn products_keep_backend_order() {
        let catalog = sample_catalog();
        let ids: Vec<i64> = catalog.products().iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
