//! Testing helpers and mock utilities.
//!
//! Canned backend payloads and a preconfigured mock backend.

use crate::catalog::MockCatalogBackend;
use serde_json::{json, Value};

/// Search response with a single "The Matrix" item.
#[must_use]
pub fn matrix_search() -> Value {
    json!({
        "page": 1,
        "total_results": 1,
        "items": [{
            "id": 603,
            "title": "The Matrix",
            "object_type": "movie",
            "original_release_year": 1999
        }]
    })
}

/// Details for "The Matrix" with a duplicate Netflix offer and an unknown provider.
#[must_use]
pub fn matrix_details() -> Value {
    json!({
        "id": 603,
        "title": "The Matrix",
        "object_type": "movie",
        "original_release_year": 1999,
        "short_description": "A hacker learns the nature of his reality.",
        "poster": "/poster/8583044/{profile}",
        "offers": [
            {"provider_id": 8, "urls": {"standard_web": "https://www.netflix.com/title/20557937"}},
            {"provider_id": 8, "urls": {"standard_web": "https://www.netflix.com/watch/20557937"}},
            {"provider_id": 99, "urls": {"standard_web": "https://example.com/matrix"}}
        ]
    })
}

/// Provider listing that knows only Netflix (id 8).
#[must_use]
pub fn provider_listing() -> Value {
    json!([{"id": 8, "technical_name": "netflix", "clear_name": "Netflix"}])
}

/// Create a mock backend that answers every call with the given payloads.
///
/// # Example
///
/// ```rust,ignore
/// use cinemabot_core::testing::{matrix_details, matrix_search, mock_backend};
///
/// let backend = mock_backend(matrix_search(), matrix_details());
/// ```
#[must_use]
pub fn mock_backend(search: Value, details: Value) -> MockCatalogBackend {
    let mut mock = MockCatalogBackend::new();

    mock.expect_search()
        .returning(move |_| Ok(search.clone()));

    mock.expect_details()
        .returning(move |_, _| Ok(details.clone()));

    mock.expect_providers()
        .returning(|| Ok(provider_listing()));

    mock
}
