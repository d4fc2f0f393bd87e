// File: ./src/model/mod.rs
pub mod event;
pub mod parser;
pub mod resolve;

pub use event::{EventBrief, ParsedEvent};
pub use parser::{header_text, is_section_header, parse_event_brief, parse_event_line};
pub use resolve::{DayFilter, ResolvedDate, is_weekend_token, resolve_date};
