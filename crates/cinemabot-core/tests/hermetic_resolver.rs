//! End-to-end resolver scenarios against an in-memory catalog backend.

use async_trait::async_trait;
use cinemabot_core::catalog::{CatalogBackend, CatalogError, TitleKind, TitleResolver};
use cinemabot_core::grid::{layout, ActionTarget, GridLimits};
use cinemabot_core::render::{detail_actions, list_actions, render_detail, PosterStyle};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Backend serving canned payloads keyed by query and by `kind:id`.
#[derive(Default)]
struct InMemoryBackend {
    searches: HashMap<String, Value>,
    details: HashMap<String, Value>,
    detail_calls: AtomicUsize,
}

impl InMemoryBackend {
    fn with_search(mut self, query: &str, response: Value) -> Self {
        self.searches.insert(query.to_string(), response);
        self
    }

    fn with_details(mut self, kind: &str, id: u64, response: Value) -> Self {
        self.details.insert(format!("{kind}:{id}"), response);
        self
    }
}

#[async_trait]
impl CatalogBackend for InMemoryBackend {
    async fn search(&self, query: &str) -> Result<Value, CatalogError> {
        Ok(self
            .searches
            .get(query)
            .cloned()
            .unwrap_or_else(|| json!({"items": []})))
    }

    async fn details(&self, id: u64, kind: &TitleKind) -> Result<Value, CatalogError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.details
            .get(&format!("{kind}:{id}"))
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("/content/titles/{kind}/{id}")))
    }

    async fn providers(&self) -> Result<Value, CatalogError> {
        Ok(json!([
            {"id": 8, "clear_name": "Netflix"},
            {"id": 119, "clear_name": "Amazon Prime Video"},
            {"id": 384, "clear_name": "HBO Max"},
            {"id": 337, "clear_name": "Disney+"}
        ]))
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn matrix_backend() -> InMemoryBackend {
    InMemoryBackend::default()
        .with_search(
            "Matrix",
            json!({"items": [{
                "id": 603,
                "title": "The Matrix",
                "object_type": "movie",
                "original_release_year": 1999
            }]}),
        )
        .with_details(
            "movie",
            603,
            json!({
                "id": 603,
                "title": "The Matrix",
                "object_type": "movie",
                "original_release_year": 1999,
                "short_description": "Set in the 22nd century.",
                "poster": "/poster/8583044/{profile}",
                "offers": [
                    {"provider_id": 8, "urls": {"standard_web": "https://www.netflix.com/title/20557937"}},
                    {"provider_id": 8, "urls": {"standard_web": "https://www.netflix.com/watch/20557937"}},
                    {"provider_id": 99, "urls": {"standard_web": "https://unknown.example.com/603"}}
                ]
            }),
        )
}

#[tokio::test]
async fn test_matrix_scenario() {
    init_tracing();
    let resolver = TitleResolver::load(Arc::new(matrix_backend()))
        .await
        .expect("providers load");

    let record = resolver
        .resolve_first("Matrix")
        .await
        .expect("backend reachable")
        .expect("record resolved");

    let view = render_detail(&record, &PosterStyle::default());
    assert_eq!(view.caption, "**The Matrix (1999)**\n\nSet in the 22nd century.");

    let netflix: Vec<_> = record
        .offers
        .iter()
        .filter(|offer| offer.provider_name == "Netflix")
        .collect();
    assert_eq!(netflix.len(), 1);
    assert_eq!(record.offers.len(), 1);

    let rows = layout(detail_actions(&record, Some("Matrix")), GridLimits::DETAIL);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 2);
    assert_eq!(
        rows[0][1].target,
        ActionTarget::Callback("list:Matrix".to_string())
    );
}

#[tokio::test]
async fn test_absent_results() {
    init_tracing();
    let backend = Arc::new(InMemoryBackend::default());
    let resolver = TitleResolver::load(backend.clone()).await.expect("providers load");

    assert_eq!(resolver.search_stubs("").await.expect("ok").count(), 0);
    assert_eq!(resolver.search_stubs("nothing").await.expect("ok").count(), 0);
    assert!(resolver.resolve_first("nothing").await.expect("ok").is_none());
    assert_eq!(backend.detail_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_list_then_pick_by_id() {
    init_tracing();
    let backend = matrix_backend().with_search(
        "alien",
        json!({"items": [
            {"id": 348, "title": "Alien", "object_type": "movie", "original_release_year": 1979},
            {"id": 679, "title": "Aliens", "object_type": "movie", "original_release_year": 1986},
            {"title": "broken item"},
            {"id": 71446, "title": "Alien Nation", "object_type": "show"}
        ]}),
    );
    let resolver = TitleResolver::load(Arc::new(backend)).await.expect("providers load");

    let stubs: Vec<_> = resolver.search_stubs("alien").await.expect("ok").take(10).collect();
    assert_eq!(stubs.len(), 3);

    let rows = layout(list_actions(&stubs), GridLimits::LIST);
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0][2].target,
        ActionTarget::Callback("show:71446".to_string())
    );

    // No details registered for 348: absent, not an error
    assert!(resolver
        .resolve_by_id(348, &TitleKind::Movie)
        .await
        .expect("ok")
        .is_none());
    assert!(resolver
        .resolve_by_id(603, &TitleKind::Movie)
        .await
        .expect("ok")
        .is_some());
}
