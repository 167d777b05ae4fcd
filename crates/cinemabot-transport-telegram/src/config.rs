//! Telegram transport settings.

use cinemabot_core::config::CatalogSettings;
use config::ConfigError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

/// Telegram transport settings loaded from environment variables.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TelegramSettings {
    /// Telegram Bot API token.
    pub telegram_token: String,
    /// Public base URL for webhook delivery; long polling is used when unset.
    pub webhook_host: Option<String>,
    /// Local port the webhook server listens on.
    #[serde(default = "default_port")]
    pub port: u16,
}

const fn default_port() -> u16 {
    8080
}

/// Combined settings used by the Telegram transport layer.
#[derive(Clone)]
pub struct BotSettings {
    /// Catalog settings shared across transport handlers.
    pub catalog: Arc<CatalogSettings>,
    /// Telegram-specific settings.
    pub telegram: Arc<TelegramSettings>,
}

impl BotSettings {
    /// Create a new combined settings bundle.
    #[must_use]
    pub fn new(catalog: CatalogSettings, telegram: TelegramSettings) -> Self {
        Self {
            catalog: Arc::new(catalog),
            telegram: Arc::new(telegram),
        }
    }
}

impl TelegramSettings {
    /// Create new settings by loading from environment and files.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails.
    pub fn new() -> Result<Self, ConfigError> {
        cinemabot_core::config::build_config()?.try_deserialize()
    }

    /// Path the webhook is served on. Contains the token so that only
    /// Telegram knows it.
    #[must_use]
    pub fn webhook_path(&self) -> String {
        format!("/webhook/{}", self.telegram_token)
    }

    /// Full webhook URL, or `None` when long polling should be used.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `webhook_host` is not a valid URL.
    pub fn webhook_url(&self) -> Result<Option<Url>, ConfigError> {
        let Some(host) = self.webhook_host.as_deref().filter(|h| !h.trim().is_empty()) else {
            return Ok(None);
        };
        Url::parse(host.trim())
            .and_then(|base| base.join(&self.webhook_path()))
            .map(Some)
            .map_err(|e| ConfigError::Message(format!("invalid WEBHOOK_HOST: {e}")))
    }

    /// Address the webhook server binds to.
    #[must_use]
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
