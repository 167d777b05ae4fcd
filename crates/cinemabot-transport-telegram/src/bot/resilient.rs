//! Resilient messaging utilities with automatic retry for Telegram API operations.
//!
//! Wrappers around the outgoing Telegram calls that retry transient failures
//! using exponential backoff with jitter.
//!
//! # Usage
//!
//! ```ignore
//! use cinemabot_transport_telegram::bot::resilient::send_message_resilient;
//!
//! let msg = send_message_resilient(&bot, chat_id, "Hello!", Some(ParseMode::Html), None).await?;
//! ```

use anyhow::Result;
use cinemabot_core::utils::retry_transport_operation;
use reqwest::Url;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardMarkup, InputFile, Message, ParseMode};

/// Send a message with automatic retry on network failures.
///
/// # Arguments
///
/// * `bot` - The Telegram bot instance
/// * `chat_id` - Target chat ID
/// * `text` - Message text to send
/// * `parse_mode` - Optional parse mode (HTML, Markdown, etc.)
/// * `keyboard` - Optional inline keyboard attached to the message
///
/// # Errors
///
/// Returns the last Telegram error after all retries are exhausted.
pub async fn send_message_resilient(
    bot: &Bot,
    chat_id: ChatId,
    text: impl Into<String>,
    parse_mode: Option<ParseMode>,
    keyboard: Option<InlineKeyboardMarkup>,
) -> Result<Message> {
    let text = text.into();
    retry_transport_operation(|| async {
        let mut req = bot.send_message(chat_id, text.clone());
        if let Some(pm) = parse_mode {
            req = req.parse_mode(pm);
        }
        if let Some(markup) = keyboard.clone() {
            req = req.reply_markup(markup);
        }
        req.await
            .map_err(|e| anyhow::anyhow!("Telegram send error: {e}"))
    })
    .await
}

/// Send a photo by URL with a caption, retrying on network failures.
///
/// Telegram downloads the photo itself; a URL it cannot fetch fails every
/// attempt, so callers should be ready to fall back to plain text.
///
/// # Errors
///
/// Returns the last Telegram error after all retries are exhausted.
pub async fn send_photo_resilient(
    bot: &Bot,
    chat_id: ChatId,
    photo: Url,
    caption: impl Into<String>,
    keyboard: Option<InlineKeyboardMarkup>,
) -> Result<Message> {
    let caption = caption.into();
    retry_transport_operation(|| async {
        let mut req = bot
            .send_photo(chat_id, InputFile::url(photo.clone()))
            .caption(caption.clone())
            .parse_mode(ParseMode::Html);
        if let Some(markup) = keyboard.clone() {
            req = req.reply_markup(markup);
        }
        req.await
            .map_err(|e| anyhow::anyhow!("Telegram photo error: {e}"))
    })
    .await
}
