//! Domain layer for the order desk.
//!
//! This crate provides the pure order-composition core:
//! - Catalog snapshot with id lookup for price/name resolution
//! - DraftOrder state machine with derived totals
//! - LineItemEditor for the add/edit form's transient state
//! - Persisted-order and summary types as the backend reports them
//!
//! Nothing here performs I/O; fetching and submission live in the
//! client crate.

pub mod catalog;
pub mod draft;
pub mod editor;
pub mod persisted;

pub use catalog::{Catalog, CatalogProduct};
pub use draft::{DraftOrder, InvalidLineItem, LineItem, LineItemView, UNKNOWN_PRODUCT_NAME};
pub use editor::{EditorMode, LineItemEditor};
pub use persisted::{OrderSummary, PersistedLine, PersistedOrder};
