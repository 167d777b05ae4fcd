//! Search UI components
//!
//! Contains keyboards, text messages, and caption fitting for search results.

use cinemabot_core::catalog::FullRecord;
use cinemabot_core::grid::{ActionTarget, Row};
use cinemabot_core::render::{render_detail, DetailView, PosterStyle};
use cinemabot_core::utils::truncate_str;
use reqwest::Url;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use tracing::warn;

/// Telegram limit for photo captions, in visible characters
pub const CAPTION_LIMIT: usize = 1024;

/// Markup characters in a rendered caption that are not visible (`**` twice)
const CAPTION_MARKUP_CHARS: usize = 4;

/// Help text for `/start` and `/help`
#[must_use]
pub fn help_message() -> &'static str {
    "This is **Cinemabot**, a bot that finds movies and shows to watch.\n\n\
     Just type a title to search. You will get the best match with links to \
     watch it, and a \"more\" button to pick from all results.\n\n\
     /start, /help show this message again\n\
     /todo shows the current todo list\n\
     /schedule N query searches for query in N seconds"
}

/// Roadmap shown by `/todo`
#[must_use]
pub fn todo_message() -> &'static str {
    "**TODO list:**\n\
     - Validate title categories beyond movie/show\n\
     - Filters: movie/show, year, language\n\
     - Notify the admin when the catalog returns 5xx\n\
     - Localization\n\
     - More catalog sources"
}

/// Hint sent when `/schedule` is used with a zero delay
#[must_use]
pub fn schedule_hint() -> &'static str {
    "By the way, to search right away you can just type the title.\n\
     Yes, that simple, no commands needed."
}

/// Usage message for malformed `/schedule` commands
#[must_use]
pub fn schedule_usage() -> &'static str {
    "Please, use following format: \"/schedule N query\""
}

/// Message for queries without usable results
#[must_use]
pub fn nothing_found(query: &str) -> String {
    format!("Nothing found for \"{query}\"")
}

/// Message for a picked title that can no longer be resolved
#[must_use]
pub fn title_unavailable() -> &'static str {
    "This title is no longer available."
}

/// Render a detail view whose caption fits into [`CAPTION_LIMIT`].
///
/// Only the description is shortened; the title line always survives.
#[must_use]
pub fn fitted_detail(record: &FullRecord, poster: &PosterStyle) -> DetailView {
    let view = render_detail(record, poster);
    let visible = view.caption.chars().count().saturating_sub(CAPTION_MARKUP_CHARS);
    if visible <= CAPTION_LIMIT {
        return view;
    }

    let overflow = visible - CAPTION_LIMIT + 1;
    let keep = record
        .short_description
        .chars()
        .count()
        .saturating_sub(overflow);

    let mut shortened = record.clone();
    shortened.short_description = format!(
        "{}…",
        truncate_str(&record.short_description, keep).trim_end()
    );
    render_detail(&shortened, poster)
}

/// Convert packed rows into an inline keyboard.
///
/// Buttons whose URL cannot be parsed are dropped with a warning; rows left
/// empty by that are removed.
#[must_use]
pub fn keyboard_from_rows(rows: Vec<Row>) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = rows
        .into_iter()
        .map(|row| row.into_iter().filter_map(to_button).collect::<Vec<_>>())
        .filter(|row| !row.is_empty())
        .collect();
    InlineKeyboardMarkup::new(rows)
}

fn to_button(action: cinemabot_core::grid::Action) -> Option<InlineKeyboardButton> {
    match action.target {
        ActionTarget::Url(url) => match Url::parse(&url) {
            Ok(url) => Some(InlineKeyboardButton::url(action.label, url)),
            Err(e) => {
                warn!("Dropping button {:?} with invalid URL {url:?}: {e}", action.label);
                None
            }
        },
        ActionTarget::Callback(data) => Some(InlineKeyboardButton::callback(action.label, data)),
    }
}
