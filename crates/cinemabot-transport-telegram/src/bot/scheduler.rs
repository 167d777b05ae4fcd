//! Delayed searches started by `/schedule`.

use crate::bot::messaging::{send_search_result, send_text};
use crate::bot::views;
use anyhow::Result;
use async_trait::async_trait;
use cinemabot_core::catalog::TitleResolver;
use cinemabot_core::render::PosterStyle;
use cinemabot_core::schedule::ScheduleRequest;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::ChatId;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Replies a scheduled search sends to its chat
#[async_trait]
pub trait ScheduleReplies: Send + Sync + 'static {
    /// Tell the user that plain text searches right away
    async fn send_hint(&self) -> Result<()>;
    /// Run the search and reply with its result
    async fn send_result(&self, query: &str) -> Result<()>;
}

/// Telegram chat replies backed by the title resolver
pub struct ChatReplies {
    bot: Bot,
    chat_id: ChatId,
    resolver: Arc<TitleResolver>,
    poster: PosterStyle,
}

impl ChatReplies {
    /// Replies into `chat_id`
    #[must_use]
    pub fn new(
        bot: Bot,
        chat_id: ChatId,
        resolver: Arc<TitleResolver>,
        poster: PosterStyle,
    ) -> Self {
        Self {
            bot,
            chat_id,
            resolver,
            poster,
        }
    }
}

#[async_trait]
impl ScheduleReplies for ChatReplies {
    async fn send_hint(&self) -> Result<()> {
        send_text(&self.bot, self.chat_id, views::schedule_hint()).await
    }

    async fn send_result(&self, query: &str) -> Result<()> {
        send_search_result(&self.bot, self.chat_id, &self.resolver, &self.poster, query).await
    }
}

/// Start a scheduled search.
///
/// A zero delay sends the hint first. The wait and the search run on a
/// spawned task, so this returns as soon as the hint is out. Search failures
/// are logged by the task.
///
/// # Errors
///
/// Returns an error if the hint cannot be sent; nothing is spawned then.
pub async fn start_scheduled_search<R: ScheduleReplies>(
    request: ScheduleRequest,
    replies: Arc<R>,
) -> Result<JoinHandle<()>> {
    if request.is_immediate() {
        replies.send_hint().await?;
    }

    Ok(tokio::spawn(async move {
        tokio::time::sleep(request.delay).await;
        debug!("Running scheduled search for {:?}", request.query);
        if let Err(e) = replies.send_result(&request.query).await {
            error!("Scheduled search for {:?} failed: {e}", request.query);
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingReplies {
        events: Mutex<Vec<String>>,
        fail_hint: bool,
    }

    impl RecordingReplies {
        fn events(&self) -> Vec<String> {
            self.events.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl ScheduleReplies for RecordingReplies {
        async fn send_hint(&self) -> Result<()> {
            if self.fail_hint {
                anyhow::bail!("chat unavailable");
            }
            self.events.lock().expect("lock").push("hint".to_string());
            Ok(())
        }

        async fn send_result(&self, query: &str) -> Result<()> {
            self.events
                .lock()
                .expect("lock")
                .push(format!("result:{query}"));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_zero_delay_sends_hint_then_result() {
        let replies = Arc::new(RecordingReplies::default());
        let request = ScheduleRequest::parse("0 inception").expect("valid");

        let task = start_scheduled_search(request, replies.clone())
            .await
            .expect("started");
        task.await.expect("task finished");

        assert_eq!(replies.events(), vec!["hint", "result:inception"]);
    }

    #[tokio::test]
    async fn test_negative_delay_runs_immediately_with_hint() {
        let replies = Arc::new(RecordingReplies::default());
        let request = ScheduleRequest::parse("-5 alien").expect("valid");

        let task = start_scheduled_search(request, replies.clone())
            .await
            .expect("started");
        task.await.expect("task finished");

        assert_eq!(replies.events(), vec!["hint", "result:alien"]);
    }

    #[tokio::test]
    async fn test_delayed_search_returns_before_running() {
        let replies = Arc::new(RecordingReplies::default());
        let request = ScheduleRequest {
            delay: Duration::from_millis(200),
            query: "the matrix".to_string(),
        };

        let task = start_scheduled_search(request, replies.clone())
            .await
            .expect("started");
        assert!(replies.events().is_empty());
        assert!(!task.is_finished());

        task.await.expect("task finished");
        assert_eq!(replies.events(), vec!["result:the matrix"]);
    }

    #[tokio::test]
    async fn test_failed_hint_skips_search() {
        let replies = Arc::new(RecordingReplies {
            fail_hint: true,
            ..RecordingReplies::default()
        });
        let request = ScheduleRequest::parse("0 inception").expect("valid");

        assert!(start_scheduled_search(request, replies.clone()).await.is_err());
        tokio::task::yield_now().await;
        assert!(replies.events().is_empty());
    }
}
