//! HTTP utilities for catalog backends
//!
//! Common request/response handling shared by backend implementations.

use super::CatalogError;
use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Longest error body quoted in an `Api` error
const MAX_ERROR_BODY_LEN: usize = 500;

/// Creates an HTTP client with the given request timeout.
///
/// # Errors
///
/// Returns `CatalogError::Config` if the TLS backend cannot be initialized.
pub fn create_http_client(timeout_secs: u64) -> Result<HttpClient, CatalogError> {
    HttpClient::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("cinemabot/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| CatalogError::Config(e.to_string()))
}

/// Sends a request and returns the parsed JSON body.
///
/// # Errors
///
/// Returns `CatalogError::Network` on connectivity issues, `CatalogError::NotFound`
/// on 404, `CatalogError::Api` on other non-success status codes, or
/// `CatalogError::Json` if the body is not valid JSON.
pub async fn send_json_request(request: RequestBuilder) -> Result<Value, CatalogError> {
    let response = request
        .send()
        .await
        .map_err(|e| CatalogError::Network(e.to_string()))?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(CatalogError::NotFound(response.url().path().to_string()));
    }

    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(CatalogError::Api(describe_error_body(status, &error_text)));
    }

    response
        .json()
        .await
        .map_err(|e| CatalogError::Json(e.to_string()))
}

fn describe_error_body(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim_start();
    // Nginx/proxy error pages
    let is_html = trimmed.starts_with("<!DOCTYPE")
        || trimmed.starts_with("<html")
        || trimmed.starts_with("<HTML");

    if is_html {
        format!("{status} (Server returned HTML error page)")
    } else if body.chars().count() > MAX_ERROR_BODY_LEN {
        let truncated = crate::utils::truncate_str(body, MAX_ERROR_BODY_LEN);
        format!("{status} - {truncated}... (truncated)")
    } else {
        format!("{status} - {body}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_error_body() {
        assert_eq!(
            describe_error_body(StatusCode::BAD_GATEWAY, "<html><body>oops</body></html>"),
            "502 Bad Gateway (Server returned HTML error page)"
        );
        assert_eq!(
            describe_error_body(StatusCode::BAD_REQUEST, "bad query"),
            "400 Bad Request - bad query"
        );

        let long = "x".repeat(600);
        let described = describe_error_body(StatusCode::INTERNAL_SERVER_ERROR, &long);
        assert!(described.ends_with("... (truncated)"));
        assert!(described.len() < 600);
    }
}
