// File: ./src/model/parser.rs
// Total parsers for the event mini-language. Malformed input is an expected
// case signaled by None, never an error.
use crate::model::event::{EventBrief, ParsedEvent};
use log::debug;

const FIELD_DELIMITER: &str = "::";
const ARTICLE_ID_KEY: &str = "articleId=";
const HEADER_MARKER: &str = "**";

/// Parses one raw event line.
///
/// Fields by position: date, time, title, location, description, then zero
/// or more trailing fields. A trailing `articleId=<id>` is captured
/// separately; the first bare trailing field is the category.
///
/// Returns None when fewer than three fields are present or when any of
/// date, time, title is empty after trimming.
pub fn parse_event_line(line: &str) -> Option<ParsedEvent> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).map(str::trim).collect();
    if fields.len() < 3 {
        return None;
    }
    let (date_token, time_token, title) = (fields[0], fields[1], fields[2]);
    if date_token.is_empty() || time_token.is_empty() || title.is_empty() {
        debug!("dropping event line with empty required field: {line:?}");
        return None;
    }

    let mut linked_article_id = None;
    let mut category = None;
    for extra in fields.iter().skip(5) {
        if extra.is_empty() {
            continue;
        }
        if let Some(id) = extra.strip_prefix(ARTICLE_ID_KEY) {
            if linked_article_id.is_none() && !id.is_empty() {
                linked_article_id = Some(id.to_string());
            }
        } else if category.is_none() {
            category = Some(extra.to_string());
        }
    }

    Some(ParsedEvent {
        date_token: date_token.to_string(),
        time_token: time_token.to_string(),
        title: title.to_string(),
        location: non_empty(fields.get(3)),
        description: non_empty(fields.get(4)),
        linked_article_id,
        category,
    })
}

/// The "simple" parser variant for compact summary displays. Requires the
/// first four fields and ignores everything after the location.
pub fn parse_event_brief(line: &str) -> Option<EventBrief> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).map(str::trim).collect();
    if fields.len() < 4 {
        return None;
    }
    if fields[..4].iter().any(|f| f.is_empty()) {
        return None;
    }
    Some(EventBrief {
        date_token: fields[0].to_string(),
        time_token: fields[1].to_string(),
        title: fields[2].to_string(),
        location: fields[3].to_string(),
    })
}

/// A content line beginning with `**` is a section header, not an event.
pub fn is_section_header(line: &str) -> bool {
    line.trim_start().starts_with(HEADER_MARKER)
}

/// Strips the `**` marker (and an optional closing `**`) for display.
pub fn header_text(line: &str) -> &str {
    let trimmed = line.trim();
    let body = trimmed.strip_prefix(HEADER_MARKER).unwrap_or(trimmed);
    let body = body.strip_suffix(HEADER_MARKER).unwrap_or(body);
    body.trim()
}

fn non_empty(field: Option<&&str>) -> Option<String> {
    field.filter(|s| !s.is_empty()).map(|s| s.to_string())
}
