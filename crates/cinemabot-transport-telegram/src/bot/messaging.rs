//! Common messaging utilities for the search flow.
//!
//! Glues resolver results, core renderers and the row packer to the
//! resilient Telegram senders.

use crate::bot::resilient::{send_message_resilient, send_photo_resilient};
use crate::bot::views;
use anyhow::Result;
use cinemabot_core::catalog::{FullRecord, StubRecord, TitleResolver};
use cinemabot_core::config::LIST_MAX_ENTRIES;
use cinemabot_core::grid::{layout, GridLimits};
use cinemabot_core::render::{detail_actions, list_actions, render_list, PosterStyle};
use cinemabot_core::utils::markdown_to_html;
use reqwest::Url;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};
use tracing::{debug, warn};

/// Send rendered Markdown text as an HTML message.
///
/// # Errors
///
/// Returns an error if the message fails to send.
pub async fn send_text(bot: &Bot, chat_id: ChatId, text: &str) -> Result<()> {
    send_message_resilient(bot, chat_id, markdown_to_html(text), Some(ParseMode::Html), None)
        .await?;
    Ok(())
}

/// Send the detail view of a record: poster, caption and provider buttons.
///
/// `more_query` adds the "more" button leading to the candidate list.
/// When the photo cannot be delivered the caption is sent as plain text
/// with the same keyboard.
///
/// # Errors
///
/// Returns an error if neither the photo nor the fallback text can be sent.
pub async fn send_detail(
    bot: &Bot,
    chat_id: ChatId,
    record: &FullRecord,
    more_query: Option<&str>,
    poster: &PosterStyle,
) -> Result<()> {
    let view = views::fitted_detail(record, poster);
    let caption = markdown_to_html(&view.caption);
    let keyboard = views::keyboard_from_rows(layout(
        detail_actions(record, more_query),
        GridLimits::DETAIL,
    ));

    match Url::parse(&view.poster_url) {
        Ok(photo) => {
            match send_photo_resilient(bot, chat_id, photo, caption.clone(), Some(keyboard.clone()))
                .await
            {
                Ok(_) => return Ok(()),
                Err(e) => warn!("Poster delivery failed for title {}: {e}", record.stub.id),
            }
        }
        Err(e) => warn!("Invalid poster URL {:?}: {e}", view.poster_url),
    }

    send_message_resilient(bot, chat_id, caption, Some(ParseMode::Html), Some(keyboard)).await?;
    Ok(())
}

/// Send the numbered candidate list for `query`.
///
/// Only the first [`LIST_MAX_ENTRIES`] stubs are shown.
///
/// # Errors
///
/// Returns an error if the message fails to send.
pub async fn send_list(bot: &Bot, chat_id: ChatId, stubs: &[StubRecord], query: &str) -> Result<()> {
    let stubs = &stubs[..stubs.len().min(LIST_MAX_ENTRIES)];
    let text = markdown_to_html(&render_list(stubs, query));
    let keyboard = views::keyboard_from_rows(layout(list_actions(stubs), GridLimits::LIST));

    send_message_resilient(bot, chat_id, text, Some(ParseMode::Html), Some(keyboard)).await?;
    Ok(())
}

/// Run a free-text search and reply with the best match.
///
/// # Errors
///
/// Returns an error if the catalog request fails or a reply cannot be sent.
pub async fn send_search_result(
    bot: &Bot,
    chat_id: ChatId,
    resolver: &TitleResolver,
    poster: &PosterStyle,
    query: &str,
) -> Result<()> {
    debug!("Searching for {query:?}");
    match resolver.resolve_first(query).await? {
        Some(record) => send_detail(bot, chat_id, &record, Some(query), poster).await,
        None => send_text(bot, chat_id, &views::nothing_found(query)).await,
    }
}

/// Reply with the candidate list for `query`.
///
/// # Errors
///
/// Returns an error if the catalog request fails or a reply cannot be sent.
pub async fn send_candidates(
    bot: &Bot,
    chat_id: ChatId,
    resolver: &TitleResolver,
    query: &str,
) -> Result<()> {
    let stubs: Vec<StubRecord> = resolver.search_stubs(query).await?.take(LIST_MAX_ENTRIES).collect();
    if stubs.is_empty() {
        return send_text(bot, chat_id, &views::nothing_found(query)).await;
    }
    send_list(bot, chat_id, &stubs, query).await
}
