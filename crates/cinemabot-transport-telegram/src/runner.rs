use crate::bot;
use crate::bot::handlers::{get_user_id_safe, Command};
use crate::config::BotSettings;
use cinemabot_core::catalog::{CatalogBackend, JustWatchBackend, TitleResolver};
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use teloxide::update_listeners::webhooks;
use tracing::{error, info};

/// Run the Telegram transport runtime.
pub async fn run_bot(settings: Arc<BotSettings>) {
    let resolver = init_resolver(&settings).await;

    let bot = Bot::new(settings.telegram.telegram_token.clone());
    let handler = setup_handler();

    let webhook_url = match settings.telegram.webhook_url() {
        Ok(url) => url,
        Err(e) => {
            error!("Invalid webhook configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![resolver, settings.clone()])
        .enable_ctrlc_handler()
        .build();

    match webhook_url {
        Some(url) => {
            let addr = settings.telegram.listen_addr();
            info!("Bot is running with webhook on {addr}...");
            let listener =
                match webhooks::axum(bot, webhooks::Options::new(addr, url)).await {
                    Ok(listener) => listener,
                    Err(e) => {
                        error!("Failed to set up webhook: {}", e);
                        std::process::exit(1);
                    }
                };
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
        None => {
            info!("Bot is running with long polling...");
            dispatcher.dispatch().await;
        }
    }
}

async fn init_resolver(settings: &BotSettings) -> Arc<TitleResolver> {
    let backend: Arc<dyn CatalogBackend> = match JustWatchBackend::new(&settings.catalog) {
        Ok(backend) => {
            info!("Catalog backend initialized (locale {}).", backend.locale());
            Arc::new(backend)
        }
        Err(e) => {
            error!("Failed to initialize catalog backend: {}", e);
            std::process::exit(1);
        }
    };

    match TitleResolver::load(backend).await {
        Ok(resolver) => {
            info!(
                "Provider table loaded ({} providers).",
                resolver.providers().len()
            );
            Arc::new(resolver)
        }
        Err(e) => {
            error!("Failed to load provider table: {}", e);
            std::process::exit(1);
        }
    }
}

fn setup_handler() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handle_callback))
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_command),
                )
                .branch(
                    dptree::filter(|msg: Message| msg.text().is_some()).endpoint(handle_text),
                ),
        )
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    resolver: Arc<TitleResolver>,
    settings: Arc<BotSettings>,
) -> Result<(), teloxide::RequestError> {
    let res = match cmd {
        Command::Start | Command::Help => bot::handlers::help(bot, msg).await,
        Command::Todo => bot::handlers::todo(bot, msg).await,
        Command::Schedule(args) => {
            bot::handlers::schedule(bot, msg, args, resolver, settings).await
        }
    };
    if let Err(e) = res {
        error!("Command error: {}", e);
    }
    respond(())
}

async fn handle_text(
    bot: Bot,
    msg: Message,
    resolver: Arc<TitleResolver>,
    settings: Arc<BotSettings>,
) -> Result<(), teloxide::RequestError> {
    let user_id = get_user_id_safe(&msg);
    if let Err(e) = bot::handlers::handle_text(bot, msg, resolver, settings).await {
        error!("Text handler error for user {}: {}", user_id, e);
    }
    respond(())
}

async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    resolver: Arc<TitleResolver>,
    settings: Arc<BotSettings>,
) -> Result<(), teloxide::RequestError> {
    if let Err(e) = bot::handlers::handle_callback(bot, q, resolver, settings).await {
        error!("Callback handler error: {}", e);
    }
    respond(())
}
