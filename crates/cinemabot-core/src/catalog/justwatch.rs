//! JustWatch content API backend
//!
//! Thin HTTP client: it returns response bodies as-is and leaves validation
//! to the resolver.

use super::http_utils::{create_http_client, send_json_request};
use super::{CatalogBackend, CatalogError, TitleKind};
use crate::config::CatalogSettings;
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::{json, Value};
use tracing::{debug, instrument};

/// Catalog backend for the JustWatch content API
pub struct JustWatchBackend {
    client: HttpClient,
    api_base: String,
    locale: String,
    page_size: u32,
}

impl JustWatchBackend {
    /// Create a backend from settings
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Config` if the HTTP client cannot be built.
    pub fn new(settings: &CatalogSettings) -> Result<Self, CatalogError> {
        Ok(Self {
            client: create_http_client(settings.catalog_http_timeout_secs)?,
            api_base: settings.justwatch_api_base.trim_end_matches('/').to_string(),
            locale: settings.locale(),
            page_size: settings.search_page_size,
        })
    }

    /// Locale used for all requests, e.g. `ru_RU`
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    fn search_url(&self) -> String {
        format!("{}/content/titles/{}/popular", self.api_base, self.locale)
    }

    fn details_url(&self, id: u64, kind: &TitleKind) -> String {
        format!(
            "{}/content/titles/{kind}/{id}/locale/{}",
            self.api_base, self.locale
        )
    }

    fn providers_url(&self) -> String {
        format!("{}/content/providers/locale/{}", self.api_base, self.locale)
    }
}

#[async_trait]
impl CatalogBackend for JustWatchBackend {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Value, CatalogError> {
        let body = json!({
            "query": query,
            "page": 1,
            "page_size": self.page_size,
        });
        let response = send_json_request(self.client.post(self.search_url()).json(&body)).await?;
        let items = response
            .get("items")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        debug!(items, "Search response received");
        Ok(response)
    }

    #[instrument(skip(self))]
    async fn details(&self, id: u64, kind: &TitleKind) -> Result<Value, CatalogError> {
        send_json_request(self.client.get(self.details_url(id, kind))).await
    }

    #[instrument(skip(self))]
    async fn providers(&self) -> Result<Value, CatalogError> {
        send_json_request(self.client.get(self.providers_url())).await
    }
}
