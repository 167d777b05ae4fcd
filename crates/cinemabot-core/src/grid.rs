//! Button grid packing
//!
//! Arranges labeled actions into rows under two limits: total label
//! characters per row and actions per row. Packing is greedy, left to right,
//! and never reorders, drops or splits actions.

use crate::config::{
    DETAIL_GRID_MAX_ACTIONS, DETAIL_GRID_MAX_CHARS, LIST_GRID_MAX_ACTIONS, LIST_GRID_MAX_CHARS,
};
use std::fmt;

/// Where a button leads when tapped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionTarget {
    /// External link, opened by the client
    Url(String),
    /// Routing token delivered back to the bot as callback data
    Callback(String),
}

/// A labeled, selectable action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Button text
    pub label: String,
    /// Opaque target reference
    pub target: ActionTarget,
}

impl Action {
    /// Action opening an external link
    #[must_use]
    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: ActionTarget::Url(url.into()),
        }
    }

    /// Action sending a routing token back to the bot
    #[must_use]
    pub fn callback(label: impl Into<String>, token: impl fmt::Display) -> Self {
        Self {
            label: label.into(),
            target: ActionTarget::Callback(token.to_string()),
        }
    }

    /// Label length in characters
    #[must_use]
    pub fn width(&self) -> usize {
        self.label.chars().count()
    }
}

/// Per-row capacity limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLimits {
    /// Maximum sum of label lengths in a row
    pub max_chars: usize,
    /// Maximum number of actions in a row
    pub max_actions: usize,
}

impl GridLimits {
    /// Limits for provider buttons under a detail view
    pub const DETAIL: Self = Self::new(DETAIL_GRID_MAX_CHARS, DETAIL_GRID_MAX_ACTIONS);
    /// Limits for numbered buttons under a list view
    pub const LIST: Self = Self::new(LIST_GRID_MAX_CHARS, LIST_GRID_MAX_ACTIONS);

    /// Create limits
    #[must_use]
    pub const fn new(max_chars: usize, max_actions: usize) -> Self {
        Self {
            max_chars,
            max_actions,
        }
    }
}

/// One row of the grid
pub type Row = Vec<Action>;

/// Packed rows, top to bottom
pub type ActionGrid = Vec<Row>;

/// Pack actions into rows.
///
/// An action joins the current row only if both the character sum and the
/// action count stay within `limits`; otherwise the row is closed and the
/// action starts a new one. A new row always accepts its first action, so an
/// oversize label ends up alone in its row. Empty input yields a single empty
/// row.
///
/// # Examples
///
/// ```
/// use cinemabot_core::grid::{layout, Action, GridLimits};
///
/// let actions = ["Netflix", "Amazon Prime Video", "HBO Max", "Disney+"]
///     .into_iter()
///     .map(|label| Action::url(label, "https://example.com"));
/// let rows = layout(actions, GridLimits::DETAIL);
/// let labels: Vec<Vec<&str>> = rows
///     .iter()
///     .map(|row| row.iter().map(|a| a.label.as_str()).collect())
///     .collect();
/// assert_eq!(
///     labels,
///     vec![vec!["Netflix"], vec!["Amazon Prime Video"], vec!["HBO Max", "Disney+"]]
/// );
/// ```
#[must_use]
pub fn layout(actions: impl IntoIterator<Item = Action>, limits: GridLimits) -> ActionGrid {
    let mut rows = Vec::new();
    let mut row: Row = Vec::new();
    let mut row_chars = 0;

    for action in actions {
        let width = action.width();
        let fits = row_chars + width <= limits.max_chars && row.len() < limits.max_actions;

        if !row.is_empty() && !fits {
            rows.push(std::mem::take(&mut row));
            row_chars = 0;
        }
        row_chars += width;
        row.push(action);
    }

    rows.push(row);
    rows
}
