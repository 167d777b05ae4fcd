//! Text layouts for the two message kinds
//!
//! Views are rendered as lightweight Markdown (`**bold**`); the transport
//! converts them to its own markup.

use crate::catalog::{FullRecord, StubRecord};
use crate::config::CatalogSettings;
use crate::grid::Action;
use crate::routing::RoutingToken;
use std::fmt::Write as _;

/// Label of the button leading to the full candidate list
pub const MORE_LABEL: &str = "more";

/// Poster URL construction parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterStyle {
    /// Base URL prepended to poster paths
    pub base_url: String,
    /// Resolution profile substituted for `{profile}`
    pub profile: String,
}

impl Default for PosterStyle {
    fn default() -> Self {
        Self::from(&CatalogSettings::default())
    }
}

impl From<&CatalogSettings> for PosterStyle {
    fn from(settings: &CatalogSettings) -> Self {
        Self {
            base_url: settings.poster_base_url.trim_end_matches('/').to_string(),
            profile: settings.poster_profile.clone(),
        }
    }
}

impl PosterStyle {
    /// Absolute poster URL for a poster path template
    #[must_use]
    pub fn url(&self, poster_path: &str) -> String {
        format!(
            "{}{}",
            self.base_url,
            poster_path.replace("{profile}", &self.profile)
        )
    }
}

/// Detail message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// Caption text
    pub caption: String,
    /// Absolute poster URL
    pub poster_url: String,
}

/// Render a full record as a photo caption plus poster URL.
///
/// # Examples
///
/// ```
/// use cinemabot_core::catalog::{FullRecord, StubRecord, TitleKind};
/// use cinemabot_core::render::{render_detail, PosterStyle};
///
/// let record = FullRecord {
///     stub: StubRecord {
///         id: 27205,
///         title: "Inception".to_string(),
///         kind: TitleKind::Movie,
///         release_year: Some(2010),
///     },
///     short_description: "Dreams within dreams.".to_string(),
///     poster_path: "/poster/1/{profile}".to_string(),
///     offers: Vec::new(),
/// };
/// let view = render_detail(&record, &PosterStyle::default());
/// assert_eq!(view.caption, "**Inception (2010)**\n\nDreams within dreams.");
/// assert_eq!(view.poster_url, "https://images.justwatch.com/poster/1/s592");
/// ```
#[must_use]
pub fn render_detail(record: &FullRecord, poster: &PosterStyle) -> DetailView {
    let stub = &record.stub;
    let name_line = match stub.release_year {
        Some(year) => format!("{} ({year})", stub.title),
        None => stub.title.clone(),
    };

    DetailView {
        caption: format!("**{name_line}**\n\n{}", record.short_description),
        poster_url: poster.url(&record.poster_path),
    }
}

/// Render a numbered candidate list.
///
/// Entries keep their input order; the caller limits how many are passed in.
#[must_use]
pub fn render_list(stubs: &[StubRecord], query: &str) -> String {
    let mut text = format!("Search results for \"{query}\":");
    for (index, stub) in stubs.iter().enumerate() {
        let _ = write!(text, "\n{}. {}", index + 1, render_stub(stub));
    }
    text
}

fn render_stub(stub: &StubRecord) -> String {
    match stub.release_year {
        Some(year) => format!("**{}** ({year})", stub.title),
        None => format!("**{}**", stub.title),
    }
}

/// Buttons shown under a detail view: one per offer, then "more" when a
/// query is given.
#[must_use]
pub fn detail_actions(record: &FullRecord, more_query: Option<&str>) -> Vec<Action> {
    let mut actions: Vec<Action> = record
        .offers
        .iter()
        .map(|offer| Action::url(offer.provider_name.as_str(), offer.url.as_str()))
        .collect();

    if let Some(query) = more_query {
        actions.push(Action::callback(MORE_LABEL, RoutingToken::list(query)));
    }
    actions
}

/// Numbered buttons shown under a list view, one per stub.
#[must_use]
pub fn list_actions(stubs: &[StubRecord]) -> Vec<Action> {
    stubs
        .iter()
        .enumerate()
        .map(|(index, stub)| {
            Action::callback(
                (index + 1).to_string(),
                RoutingToken::open(stub.kind.clone(), stub.id),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Offer, TitleKind};
    use crate::grid::ActionTarget;

    fn stub(id: u64, title: &str, kind: TitleKind, year: Option<i32>) -> StubRecord {
        StubRecord {
            id,
            title: title.to_string(),
            kind,
            release_year: year,
        }
    }

    fn record(year: Option<i32>) -> FullRecord {
        FullRecord {
            stub: stub(603, "The Matrix", TitleKind::Movie, year),
            short_description: "Neo wakes up.".to_string(),
            poster_path: "/poster/8583044/{profile}".to_string(),
            offers: vec![Offer {
                provider_name: "Netflix".to_string(),
                url: "https://www.netflix.com/title/20557937".to_string(),
            }],
        }
    }

    #[test]
    fn test_detail_caption_with_year() {
        let view = render_detail(&record(Some(1999)), &PosterStyle::default());
        assert_eq!(view.caption, "**The Matrix (1999)**\n\nNeo wakes up.");
        assert_eq!(
            view.poster_url,
            "https://images.justwatch.com/poster/8583044/s592"
        );
    }

    #[test]
    fn test_detail_caption_without_year() {
        let view = render_detail(&record(None), &PosterStyle::default());
        assert_eq!(view.caption, "**The Matrix**\n\nNeo wakes up.");
        assert!(!view.caption.contains("()"));
    }

    #[test]
    fn test_render_detail_is_idempotent() {
        let record = record(Some(1999));
        let style = PosterStyle::default();
        assert_eq!(render_detail(&record, &style), render_detail(&record, &style));
    }

    #[test]
    fn test_poster_style_from_settings() {
        let settings = CatalogSettings {
            poster_base_url: "https://img.example.com/".to_string(),
            poster_profile: "s166".to_string(),
            ..CatalogSettings::default()
        };
        assert_eq!(
            PosterStyle::from(&settings).url("/poster/1/{profile}/matrix.webp"),
            "https://img.example.com/poster/1/s166/matrix.webp"
        );
    }

    #[test]
    fn test_detail_actions() {
        let actions = detail_actions(&record(Some(1999)), Some("matrix"));
        assert_eq!(actions.len(), 2);
        assert_eq!(
            actions[0].target,
            ActionTarget::Url("https://www.netflix.com/title/20557937".to_string())
        );
        assert_eq!(actions[1].label, MORE_LABEL);
        assert_eq!(
            actions[1].target,
            ActionTarget::Callback("list:matrix".to_string())
        );

        assert_eq!(detail_actions(&record(None), None).len(), 1);
    }

    #[test]
    fn test_list_actions() {
        let stubs = vec![
            stub(603, "The Matrix", TitleKind::Movie, Some(1999)),
            stub(1396, "Breaking Bad", TitleKind::Show, None),
        ];
        let actions = list_actions(&stubs);
        assert_eq!(actions[0].label, "1");
        assert_eq!(actions[0].target, ActionTarget::Callback("movie:603".to_string()));
        assert_eq!(actions[1].label, "2");
        assert_eq!(actions[1].target, ActionTarget::Callback("show:1396".to_string()));
    }

    #[test]
    fn test_render_list() {
        let stubs = vec![
            stub(603, "The Matrix", TitleKind::Movie, Some(1999)),
            stub(604, "The Matrix Reloaded", TitleKind::Movie, None),
        ];
        assert_eq!(
            render_list(&stubs, "matrix"),
            "Search results for \"matrix\":\n1. **The Matrix** (1999)\n2. **The Matrix Reloaded**"
        );
    }
}
