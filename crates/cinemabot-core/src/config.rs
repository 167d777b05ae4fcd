//! Configuration and settings management
//!
//! Loads catalog settings from config files and environment variables and
//! defines shared constants.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Catalog backend settings loaded from environment variables
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CatalogSettings {
    /// Base URL of the JustWatch content API
    #[serde(default = "default_justwatch_api_base")]
    pub justwatch_api_base: String,
    /// Two-letter country code used to pick the catalog locale
    #[serde(default = "default_justwatch_country")]
    pub justwatch_country: String,
    /// Number of search results requested per query
    #[serde(default = "default_search_page_size")]
    pub search_page_size: u32,
    /// Base URL prepended to poster paths
    #[serde(default = "default_poster_base_url")]
    pub poster_base_url: String,
    /// Resolution profile substituted into poster paths
    #[serde(default = "default_poster_profile")]
    pub poster_profile: String,
    /// HTTP timeout for catalog requests, in seconds
    #[serde(default = "default_catalog_http_timeout_secs")]
    pub catalog_http_timeout_secs: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            justwatch_api_base: default_justwatch_api_base(),
            justwatch_country: default_justwatch_country(),
            search_page_size: default_search_page_size(),
            poster_base_url: default_poster_base_url(),
            poster_profile: default_poster_profile(),
            catalog_http_timeout_secs: default_catalog_http_timeout_secs(),
        }
    }
}

fn default_justwatch_api_base() -> String {
    "https://apis.justwatch.com".to_string()
}

fn default_justwatch_country() -> String {
    "RU".to_string()
}

const fn default_search_page_size() -> u32 {
    30
}

fn default_poster_base_url() -> String {
    "https://images.justwatch.com".to_string()
}

fn default_poster_profile() -> String {
    "s592".to_string()
}

const fn default_catalog_http_timeout_secs() -> u64 {
    30
}

/// Build the layered configuration shared by all settings structs.
///
/// Sources, in order of precedence (last wins): `config/default`,
/// `config/{RUN_MODE}`, `config/local`, `APP_`-prefixed env vars and plain
/// env vars.
///
/// # Errors
///
/// Returns a `ConfigError` if any source fails to load.
pub fn build_config() -> Result<Config, ConfigError> {
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
        // Not checked into git
        .add_source(File::with_name("config/local").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        // Environment::default() maps UPPER_SNAKE_CASE to snake_case
        .add_source(Environment::default().ignore_empty(true))
        .build()
}

impl CatalogSettings {
    /// Create new settings by loading from environment and files
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cinemabot_core::config::CatalogSettings;
    ///
    /// let settings = CatalogSettings::new().expect("Failed to load configuration");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails.
    pub fn new() -> Result<Self, ConfigError> {
        build_config()?.try_deserialize()
    }

    /// Catalog locale derived from the configured country, e.g. `RU` -> `ru_RU`.
    #[must_use]
    pub fn locale(&self) -> String {
        country_locale(&self.justwatch_country)
    }
}

/// Map a two-letter country code to the catalog locale.
///
/// Countries whose primary language differs from the country code are listed
/// explicitly; everything else falls back to `xx_XX`.
#[must_use]
pub fn country_locale(country: &str) -> String {
    let country = country.trim().to_uppercase();
    let language = match country.as_str() {
        "US" | "GB" | "CA" | "AU" | "NZ" | "IE" | "IN" | "ZA" => "en",
        "AT" | "CH" => "de",
        "BE" => "fr",
        "BR" => "pt",
        "MX" | "AR" | "CL" | "CO" | "PE" | "VE" | "EC" => "es",
        "UA" => "uk",
        "BY" | "KZ" => "ru",
        "SE" => "sv",
        "DK" => "da",
        "JP" => "ja",
        "KR" => "ko",
        "CZ" => "cs",
        "GR" => "el",
        _ => return format!("{}_{country}", country.to_lowercase()),
    };
    format!("{language}_{country}")
}

// Button grids

/// Maximum label characters per row in the detail (provider) grid
pub const DETAIL_GRID_MAX_CHARS: usize = 23;
/// Maximum buttons per row in the detail (provider) grid
pub const DETAIL_GRID_MAX_ACTIONS: usize = 3;
/// Maximum label characters per row in the numbered list grid
pub const LIST_GRID_MAX_CHARS: usize = 10;
/// Maximum buttons per row in the numbered list grid
pub const LIST_GRID_MAX_ACTIONS: usize = 5;
/// Maximum number of candidates shown in the list view
pub const LIST_MAX_ENTRIES: usize = 10;

// Transport retries

/// Initial backoff for retried transport calls, in milliseconds
pub const TRANSPORT_INITIAL_BACKOFF_MS: u64 = 500;
/// Maximum backoff for retried transport calls, in milliseconds
pub const TRANSPORT_MAX_BACKOFF_MS: u64 = 10_000;
/// Maximum number of retries for transport calls
pub const TRANSPORT_MAX_RETRIES: usize = 3;
