use crate::bot::messaging::{send_candidates, send_detail, send_search_result, send_text};
use crate::bot::scheduler::{start_scheduled_search, ChatReplies};
use crate::bot::views;
use crate::config::BotSettings;
use anyhow::Result;
use cinemabot_core::catalog::TitleResolver;
use cinemabot_core::render::PosterStyle;
use cinemabot_core::routing::RoutingToken;
use cinemabot_core::schedule::ScheduleRequest;
use std::sync::Arc;
use teloxide::{prelude::*, types::ChatId, utils::command::BotCommands};
use tracing::{info, warn};

/// Safe extraction of user ID from a message.
/// Returns 0 if the user information is missing.
pub fn get_user_id_safe(msg: &Message) -> i64 {
    msg.from.as_ref().map_or(0, |u| u.id.0.cast_signed())
}

/// Supported commands for the bot
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    /// Show the welcome message
    #[command(description = "Show the welcome message.")]
    Start,
    /// Show the help message
    #[command(description = "Show the help message.")]
    Help,
    /// Show the todo list
    #[command(description = "Show the todo list.")]
    Todo,
    /// Search after a delay
    #[command(description = "Search for a title in N seconds.")]
    Schedule(String),
}

fn poster_style(settings: &BotSettings) -> PosterStyle {
    PosterStyle::from(settings.catalog.as_ref())
}

/// `/start` and `/help` handler
///
/// # Errors
///
/// Returns an error if the help message cannot be sent.
pub async fn help(bot: Bot, msg: Message) -> Result<()> {
    info!("User {} requested help.", get_user_id_safe(&msg));
    send_text(&bot, msg.chat.id, views::help_message()).await
}

/// `/todo` handler
///
/// # Errors
///
/// Returns an error if the message cannot be sent.
pub async fn todo(bot: Bot, msg: Message) -> Result<()> {
    send_text(&bot, msg.chat.id, views::todo_message()).await
}

/// `/schedule N query` handler.
///
/// Returns once the search is scheduled; scheduled searches cannot be
/// cancelled.
///
/// # Errors
///
/// Returns an error if the usage or hint message cannot be sent.
pub async fn schedule(
    bot: Bot,
    msg: Message,
    args: String,
    resolver: Arc<TitleResolver>,
    settings: Arc<BotSettings>,
) -> Result<()> {
    let chat_id = msg.chat.id;
    let request = match ScheduleRequest::parse(&args) {
        Ok(request) => request,
        Err(e) => {
            info!("Rejected /schedule {args:?}: {e}");
            return send_text(&bot, chat_id, views::schedule_usage()).await;
        }
    };

    info!(
        "User {} scheduled {:?} in {}s",
        get_user_id_safe(&msg),
        request.query,
        request.delay.as_secs()
    );

    let replies = ChatReplies::new(bot, chat_id, resolver, poster_style(&settings));
    start_scheduled_search(request, Arc::new(replies)).await?;
    Ok(())
}

/// Free-text search handler
///
/// # Errors
///
/// Returns an error if the catalog request fails or a reply cannot be sent.
pub async fn handle_text(
    bot: Bot,
    msg: Message,
    resolver: Arc<TitleResolver>,
    settings: Arc<BotSettings>,
) -> Result<()> {
    let Some(query) = msg.text().map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(());
    };
    info!("User {} searched {query:?}", get_user_id_safe(&msg));

    send_search_result(&bot, msg.chat.id, &resolver, &poster_style(&settings), query).await
}

/// Inline button handler.
///
/// Every query is answered first so the client stops its spinner; data that
/// does not decode into a routing token is ignored.
///
/// # Errors
///
/// Returns an error if the catalog request fails or a reply cannot be sent.
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    resolver: Arc<TitleResolver>,
    settings: Arc<BotSettings>,
) -> Result<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    let chat_id = q
        .message
        .as_ref()
        .map_or_else(|| ChatId::from(q.from.id), |m| m.chat().id);
    let Some(data) = q.data.as_deref() else {
        warn!("Callback without data from user {}", q.from.id);
        return Ok(());
    };

    let token = match data.parse::<RoutingToken>() {
        Ok(token) => token,
        Err(e) => {
            warn!("Ignoring callback {data:?}: {e}");
            return Ok(());
        }
    };

    match token {
        RoutingToken::Open { kind, id } => match resolver.resolve_by_id(id, &kind).await? {
            Some(record) => {
                send_detail(&bot, chat_id, &record, None, &poster_style(&settings)).await
            }
            None => send_text(&bot, chat_id, views::title_unavailable()).await,
        },
        RoutingToken::List { query } => send_candidates(&bot, chat_id, &resolver, &query).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/start", "cinemabot").ok(), Some(Command::Start));
        assert_eq!(Command::parse("/help", "cinemabot").ok(), Some(Command::Help));
        assert_eq!(Command::parse("/todo", "cinemabot").ok(), Some(Command::Todo));
    }

    #[test]
    fn test_schedule_keeps_raw_arguments() {
        assert_eq!(
            Command::parse("/schedule 5 the matrix", "cinemabot").ok(),
            Some(Command::Schedule("5 the matrix".to_string()))
        );
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert!(Command::parse("the matrix", "cinemabot").is_err());
    }

    #[test]
    fn test_descriptions_list_every_command() {
        let text = Command::descriptions().to_string();
        for name in ["/start", "/help", "/todo", "/schedule"] {
            assert!(text.contains(name), "missing {name}");
        }
    }
}
