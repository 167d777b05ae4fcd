//! Utility functions for text processing and transport retries.

use crate::config::{TRANSPORT_INITIAL_BACKOFF_MS, TRANSPORT_MAX_BACKOFF_MS, TRANSPORT_MAX_RETRIES};
use anyhow::Result;
use lazy_regex::lazy_regex;
use std::time::Duration;
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::Retry;
use tracing::warn;

/// Match bold text: **text**
static RE_BOLD: lazy_regex::Lazy<regex::Regex> = lazy_regex!(r"\*\*(.+?)\*\*");

/// Match 3+ consecutive newlines
static RE_MULTI_NEWLINE: lazy_regex::Lazy<regex::Regex> = lazy_regex!(r"\n{3,}");

/// Truncates a string to at most `max_chars` characters.
///
/// # Examples
///
/// ```
/// use cinemabot_core::utils::truncate_str;
/// assert_eq!(truncate_str("Привет, мир!", 6), "Привет");
/// ```
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncates a string to at most `max_bytes` bytes without splitting a character.
#[must_use]
pub fn truncate_bytes(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Converts rendered view text into Telegram-compatible HTML.
///
/// Backend and user text is HTML-escaped first, then `**text**` becomes
/// `<b>text</b>` and runs of 3+ newlines collapse into two.
///
/// # Examples
///
/// ```
/// use cinemabot_core::utils::markdown_to_html;
/// let html = markdown_to_html("**Tom & Jerry (1940)**\n\nCat < mouse");
/// assert_eq!(html, "<b>Tom &amp; Jerry (1940)</b>\n\nCat &lt; mouse");
/// ```
#[must_use]
pub fn markdown_to_html(text: &str) -> String {
    let escaped = html_escape::encode_text(text);
    let bold = RE_BOLD.replace_all(&escaped, "<b>$1</b>");
    RE_MULTI_NEWLINE.replace_all(&bold, "\n\n").into_owned()
}

/// Retry a transport operation with exponential backoff and jitter.
///
/// Used for outgoing chat calls only; catalog requests are never retried.
///
/// # Examples
///
/// ```no_run
/// use cinemabot_core::utils::retry_transport_operation;
/// use anyhow::Result;
///
/// async fn send() -> Result<()> {
///     Ok(())
/// }
///
/// # async fn example() -> Result<()> {
/// retry_transport_operation(|| async { send().await }).await?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns the last error once all retries are exhausted.
pub async fn retry_transport_operation<F, Fut, T>(operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let retry_strategy = ExponentialBackoff::from_millis(TRANSPORT_INITIAL_BACKOFF_MS)
        .max_delay(Duration::from_millis(TRANSPORT_MAX_BACKOFF_MS))
        .map(jitter)
        .take(TRANSPORT_MAX_RETRIES);

    Retry::spawn(retry_strategy, operation).await.map_err(|e| {
        warn!(
            "Transport operation failed after {} retries: {}",
            TRANSPORT_MAX_RETRIES, e
        );
        e
    })
}
