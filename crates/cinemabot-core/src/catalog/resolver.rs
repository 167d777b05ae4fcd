//! Title resolver
//!
//! Hides the search → details round trips behind typed accessors. Malformed
//! payloads degrade to skipped items or absent records; backend failures are
//! returned to the caller unchanged.

use std::iter::FusedIterator;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::{CatalogBackend, CatalogError, FullRecord, ProviderTable, StubRecord, TitleKind};

/// Stubs from a single search response.
///
/// Items are validated lazily as the iterator advances; malformed items are
/// skipped. The sequence ends with the backend page and cannot be restarted.
#[derive(Debug)]
pub struct Stubs {
    items: std::vec::IntoIter<Value>,
}

impl Stubs {
    fn empty() -> Self {
        Self {
            items: Vec::new().into_iter(),
        }
    }

    fn from_response(response: Value) -> Self {
        let items = match response {
            Value::Object(mut map) => match map.remove("items") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };
        Self {
            items: items.into_iter(),
        }
    }
}

impl Iterator for Stubs {
    type Item = StubRecord;

    fn next(&mut self) -> Option<StubRecord> {
        for item in self.items.by_ref() {
            match StubRecord::from_json(&item) {
                Ok(stub) => return Some(stub),
                Err(e) => debug!("Skipping malformed search item: {e}"),
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.items.len()))
    }
}

impl FusedIterator for Stubs {}

/// Resolves free-text queries and identifiers into typed title records
#[derive(Clone)]
pub struct TitleResolver {
    backend: Arc<dyn CatalogBackend>,
    providers: Arc<ProviderTable>,
}

impl TitleResolver {
    /// Create a resolver over an already loaded provider table
    #[must_use]
    pub fn new(backend: Arc<dyn CatalogBackend>, providers: ProviderTable) -> Self {
        Self {
            backend,
            providers: Arc::new(providers),
        }
    }

    /// Create a resolver, loading the provider table from the backend once.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the listing cannot be fetched or is not an
    /// array.
    pub async fn load(backend: Arc<dyn CatalogBackend>) -> Result<Self, CatalogError> {
        let listing = backend.providers().await?;
        let providers = ProviderTable::from_json(&listing)
            .map_err(|e| CatalogError::Json(format!("provider listing: {e}")))?;
        info!("Loaded {} watch providers", providers.len());
        Ok(Self::new(backend, providers))
    }

    /// Provider table shared by all handlers
    #[must_use]
    pub fn providers(&self) -> &ProviderTable {
        &self.providers
    }

    /// Search for candidate titles.
    ///
    /// A blank query or a response without items yields an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the backend call fails.
    #[instrument(skip(self))]
    pub async fn search_stubs(&self, query: &str) -> Result<Stubs, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Stubs::empty());
        }
        let response = self.backend.search(query).await?;
        Ok(Stubs::from_response(response))
    }

    /// Resolve the best match for a query into a full record.
    ///
    /// Returns `None` if the search has no usable items or the details of the
    /// first one cannot be resolved.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if a backend call fails.
    #[instrument(skip(self))]
    pub async fn resolve_first(&self, query: &str) -> Result<Option<FullRecord>, CatalogError> {
        let Some(stub) = self.search_stubs(query).await?.next() else {
            debug!("No usable search results");
            return Ok(None);
        };
        self.resolve_by_id(stub.id, &stub.kind).await
    }

    /// Fetch and validate the full record for a title.
    ///
    /// Returns `None` if the backend has no such title or the payload is
    /// malformed.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the backend call fails.
    #[instrument(skip(self))]
    pub async fn resolve_by_id(
        &self,
        id: u64,
        kind: &TitleKind,
    ) -> Result<Option<FullRecord>, CatalogError> {
        let payload = match self.backend.details(id, kind).await {
            Ok(payload) => payload,
            Err(CatalogError::NotFound(path)) => {
                debug!("Title not found: {path}");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        match FullRecord::from_json(&payload, &self.providers) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!("Malformed details payload for {kind}:{id}: {e}");
                Ok(None)
            }
        }
    }
}
