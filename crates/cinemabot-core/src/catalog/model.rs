use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::ProviderTable;

/// Errors raised while validating a backend payload
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// A required field is absent
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    /// A field is present but has the wrong shape
    #[error("field `{0}` has an unexpected value")]
    InvalidField(&'static str),
}

/// Error returned when a string is not a valid title kind token
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid title kind: {0:?}")]
pub struct InvalidKind(pub String);

/// Content category of a title
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TitleKind {
    /// Feature film
    Movie,
    /// Series
    Show,
    /// Any other category reported by the backend
    Other(String),
}

impl TitleKind {
    /// Lowercase token used by the backend and in routing tokens
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Movie => "movie",
            Self::Show => "show",
            Self::Other(token) => token,
        }
    }
}

impl fmt::Display for TitleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TitleKind {
    type Err = InvalidKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
        if !valid {
            return Err(InvalidKind(s.to_string()));
        }
        Ok(match s {
            "movie" => Self::Movie,
            "show" => Self::Show,
            other => Self::Other(other.to_string()),
        })
    }
}

impl TryFrom<String> for TitleKind {
    type Error = InvalidKind;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TitleKind> for String {
    fn from(kind: TitleKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Summary of a title as returned by a search call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StubRecord {
    /// Backend identifier, unique together with `kind`
    pub id: u64,
    /// Display title
    pub title: String,
    /// Content category
    pub kind: TitleKind,
    /// Original release year, if known
    pub release_year: Option<i32>,
}

impl StubRecord {
    /// Parse one search result item.
    ///
    /// # Errors
    ///
    /// Returns a `PayloadError` if `id`, `title` or `object_type` is missing
    /// or malformed. An ill-typed `original_release_year` is treated as absent.
    pub fn from_json(json: &Value) -> Result<Self, PayloadError> {
        let kind = required_str(json, "object_type")?
            .parse()
            .map_err(|_| PayloadError::InvalidField("object_type"))?;

        Ok(Self {
            id: required_u64(json, "id")?,
            title: required_str(json, "title")?.to_string(),
            kind,
            release_year: optional_i32(json, "original_release_year"),
        })
    }
}

/// A place where a title can be watched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    /// Display name of the provider
    pub provider_name: String,
    /// Deep link to the title on the provider
    pub url: String,
}

/// Complete record for one title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullRecord {
    /// Identity and summary fields
    pub stub: StubRecord,
    /// Short plot description
    pub short_description: String,
    /// Poster path template containing a `{profile}` placeholder
    pub poster_path: String,
    /// Watch offers, at most one per provider name
    pub offers: Vec<Offer>,
}

impl FullRecord {
    /// Parse a details response, resolving provider names through `providers`.
    ///
    /// Offers with an unknown provider or without a web URL are dropped. When a
    /// provider appears more than once, the last URL wins and the position of
    /// the first occurrence is kept.
    ///
    /// # Errors
    ///
    /// Returns a `PayloadError` if any required field is missing or malformed.
    pub fn from_json(json: &Value, providers: &ProviderTable) -> Result<Self, PayloadError> {
        let stub = StubRecord::from_json(json)?;
        let short_description = required_str(json, "short_description")?.to_string();
        let poster_path = required_str(json, "poster")?.to_string();

        let mut offers: Vec<Offer> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        let raw_offers = json.get("offers").and_then(Value::as_array);
        for raw in raw_offers.into_iter().flatten() {
            let Some((provider_id, url)) = parse_offer(raw) else {
                continue;
            };
            let Some(name) = providers.name(provider_id) else {
                debug!(provider_id, title_id = stub.id, "Dropping offer with unknown provider");
                continue;
            };

            if let Some(&index) = positions.get(name) {
                offers[index].url = url;
            } else {
                positions.insert(name.to_string(), offers.len());
                offers.push(Offer {
                    provider_name: name.to_string(),
                    url,
                });
            }
        }

        Ok(Self {
            stub,
            short_description,
            poster_path,
            offers,
        })
    }
}

fn parse_offer(json: &Value) -> Option<(u64, String)> {
    let provider_id = json.get("provider_id")?.as_u64()?;
    let url = json.get("urls")?.get("standard_web")?.as_str()?;
    Some((provider_id, url.to_string()))
}

fn required_str<'a>(json: &'a Value, field: &'static str) -> Result<&'a str, PayloadError> {
    json.get(field)
        .ok_or(PayloadError::MissingField(field))?
        .as_str()
        .ok_or(PayloadError::InvalidField(field))
}

fn required_u64(json: &Value, field: &'static str) -> Result<u64, PayloadError> {
    json.get(field)
        .ok_or(PayloadError::MissingField(field))?
        .as_u64()
        .ok_or(PayloadError::InvalidField(field))
}

fn optional_i32(json: &Value, field: &'static str) -> Option<i32> {
    let value = json.get(field).filter(|v| !v.is_null())?;
    let parsed = value.as_i64().and_then(|v| i32::try_from(v).ok());
    if parsed.is_none() {
        debug!(field, %value, "Ignoring ill-typed optional field");
    }
    parsed
}
