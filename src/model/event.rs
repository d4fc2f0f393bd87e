// File: ./src/model/event.rs
use crate::model::resolve::{ResolvedDate, resolve_date};
use serde::{Deserialize, Serialize};

/// One structured event, derived from a single `::`-delimited content line.
///
/// The raw line is the only store; records are recomputed on every
/// filter/render cycle, so there is no caching or identity to maintain.
/// `date_token` and `time_token` stay unparsed prose here; interpretation
/// happens in `resolve` / the export layer.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ParsedEvent {
    pub date_token: String,
    pub time_token: String,
    pub title: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub linked_article_id: Option<String>,
    pub category: Option<String>,
}

impl ParsedEvent {
    pub fn resolve(&self, reference_year: i32) -> ResolvedDate {
        resolve_date(&self.date_token, reference_year)
    }

    /// Textual recurrence check, used by views that must exclude recurring
    /// events without resolving (they have no single sortable date).
    pub fn has_recurring_token(&self) -> bool {
        self.date_token.to_lowercase().contains("every")
    }
}

/// Compact record for summary displays (homepage strips, sidebars).
/// Produced by the independent brief parser; agrees with `ParsedEvent` on
/// the four shared fields for any line both parsers accept.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct EventBrief {
    pub date_token: String,
    pub time_token: String,
    pub title: String,
    pub location: String,
}
