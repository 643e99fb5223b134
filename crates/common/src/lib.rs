//! Shared types for the order desk.
//!
//! This crate provides the value types every layer speaks:
//! - `OrderId` and `ProductId` newtypes over the backend's integer id space
//! - `Money` as integer cents, converted to/from decimal only at the wire

pub mod types;

pub use types::{Money, OrderId, ProductId};
