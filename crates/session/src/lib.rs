//! Session layer for the order desk.
//!
//! Stateful views over gateway data, mutated on a single logical
//! thread in response to user actions:
//! - `FetchState` — tri-state lifecycle of one fetched resource
//! - `CatalogCache` — the per-session product snapshot
//! - `OrderComposer` — one order being composed or edited
//! - `OrderListModel` — the landing list with its delete decision
//!
//! Nothing here navigates; outcomes are returned to the caller.

pub mod catalog_cache;
pub mod composer;
pub mod fetch;
pub mod list;

pub use catalog_cache::CatalogCache;
pub use composer::OrderComposer;
pub use fetch::FetchState;
pub use list::OrderListModel;
