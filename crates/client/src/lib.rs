//! HTTP gateway to the order backend.
//!
//! This crate owns every wire concern:
//! - serde DTOs for the backend's field names and tolerances
//! - payload reconciliation from a draft order
//! - the `OrderGateway` trait with a reqwest implementation and an
//!   in-memory implementation for tests and offline runs
//! - configuration and the API-boundary error taxonomy

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod wire;

pub use api::OrdersApi;
pub use config::ApiConfig;
pub use error::{ApiError, HttpError};
pub use gateway::{InMemoryOrderGateway, OrderGateway};
pub use wire::{OrderPayload, PayloadLine};
