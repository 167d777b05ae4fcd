//! Callback routing tokens
//!
//! Buttons carry their follow-up action as a short string:
//! `<kind>:<id>` opens a full record, `list:<query>` shows the candidate list.

use crate::catalog::TitleKind;
use crate::utils::truncate_bytes;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Prefix of list tokens
pub const LIST_PREFIX: &str = "list";

/// Telegram rejects callback data longer than this many bytes
pub const MAX_CALLBACK_DATA_BYTES: usize = 64;

/// Errors returned when decoding a routing token
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// No `:` separator
    #[error("routing token without separator: {0:?}")]
    MissingSeparator(String),
    /// Unknown or malformed category
    #[error("invalid category in routing token: {0:?}")]
    InvalidKind(String),
    /// Identifier is not a decimal integer
    #[error("invalid identifier in routing token: {0:?}")]
    InvalidId(String),
}

/// Decoded callback action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingToken {
    /// Open the full record of one title
    Open {
        /// Content category
        kind: TitleKind,
        /// Backend identifier
        id: u64,
    },
    /// Show the candidate list for a query
    List {
        /// Original search query
        query: String,
    },
}

impl RoutingToken {
    /// List token for `query`, shortened so the encoded token fits in
    /// Telegram callback data.
    #[must_use]
    pub fn list(query: &str) -> Self {
        let budget = MAX_CALLBACK_DATA_BYTES - LIST_PREFIX.len() - 1;
        Self::List {
            query: truncate_bytes(query, budget).to_string(),
        }
    }

    /// Token opening a full record
    #[must_use]
    pub const fn open(kind: TitleKind, id: u64) -> Self {
        Self::Open { kind, id }
    }
}

impl fmt::Display for RoutingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { kind, id } => write!(f, "{kind}:{id}"),
            Self::List { query } => write!(f, "{LIST_PREFIX}:{query}"),
        }
    }
}

impl FromStr for RoutingToken {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, rest) = s
            .split_once(':')
            .ok_or_else(|| RoutingError::MissingSeparator(s.to_string()))?;

        if prefix == LIST_PREFIX {
            return Ok(Self::List {
                query: rest.to_string(),
            });
        }

        let kind = prefix
            .parse()
            .map_err(|_| RoutingError::InvalidKind(prefix.to_string()))?;
        let id = rest
            .parse()
            .map_err(|_| RoutingError::InvalidId(rest.to_string()))?;
        Ok(Self::Open { kind, id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_open_tokens() {
        assert_eq!(
            "movie:603".parse(),
            Ok(RoutingToken::open(TitleKind::Movie, 603))
        );
        assert_eq!(
            "show:1396".parse(),
            Ok(RoutingToken::open(TitleKind::Show, 1396))
        );
    }

    #[test]
    fn test_parse_list_keeps_colons() {
        assert_eq!(
            "list:star wars: a new hope".parse(),
            Ok(RoutingToken::List {
                query: "star wars: a new hope".to_string()
            })
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(
            "movie:abc".parse::<RoutingToken>(),
            Err(RoutingError::InvalidId("abc".to_string()))
        );
        assert_eq!(
            "nope".parse::<RoutingToken>(),
            Err(RoutingError::MissingSeparator("nope".to_string()))
        );
        assert_eq!(
            "Movie:1".parse::<RoutingToken>(),
            Err(RoutingError::InvalidKind("Movie".to_string()))
        );
        assert_eq!(
            "movie:-1".parse::<RoutingToken>(),
            Err(RoutingError::InvalidId("-1".to_string()))
        );
    }

    #[test]
    fn test_display_roundtrip() {
        for token in [
            RoutingToken::open(TitleKind::Movie, 603),
            RoutingToken::open(TitleKind::Other("show_season".to_string()), 7),
            RoutingToken::list("inception"),
        ] {
            assert_eq!(token.to_string().parse(), Ok(token));
        }
    }

    #[test]
    fn test_list_token_fits_callback_data() {
        let query = "очень длинный запрос ".repeat(10);
        let token = RoutingToken::list(&query).to_string();
        assert!(token.len() <= MAX_CALLBACK_DATA_BYTES);
        assert!(token.starts_with("list:очень"));
    }
}
