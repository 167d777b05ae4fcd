//! Catalog backend and title resolution
//!
//! The backend speaks raw JSON; everything above [`TitleResolver`] works with
//! the typed records from [`model`].

mod http_utils;
/// JustWatch content API backend
pub mod justwatch;
/// Typed title records and their parsers
pub mod model;
/// Provider id to display name table
pub mod providers;
/// Title resolver service
pub mod resolver;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use justwatch::JustWatchBackend;
pub use model::{FullRecord, InvalidKind, Offer, PayloadError, StubRecord, TitleKind};
pub use providers::ProviderTable;
pub use resolver::{Stubs, TitleResolver};

/// Errors that can occur while talking to the catalog backend
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Error during network communication
    #[error("Network error: {0}")]
    Network(String),
    /// Error returned by the backend API
    #[error("API error: {0}")]
    Api(String),
    /// The backend has no such title
    #[error("Not found: {0}")]
    NotFound(String),
    /// Response body could not be decoded as JSON
    #[error("JSON error: {0}")]
    Json(String),
    /// Backend client could not be configured
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Interface for catalog backends
///
/// Implementations return the backend payload untouched; validation happens
/// in the resolver.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// Search titles by free-text query
    async fn search(&self, query: &str) -> Result<Value, CatalogError>;

    /// Fetch full details for one title
    async fn details(&self, id: u64, kind: &TitleKind) -> Result<Value, CatalogError>;

    /// Fetch the provider listing
    async fn providers(&self) -> Result<Value, CatalogError>;
}
