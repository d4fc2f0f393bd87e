// File: src/feed.rs
// The filter & sectioning engine: turns the raw content collection into
// display-ready section lists, the calendar-dot date set, and the
// homepage upcoming strip. Everything here is a pure function of the feed
// plus the caller's filters and reference date.
use crate::model::parser::{header_text, is_section_header, parse_event_line};
use crate::model::{DayFilter, ParsedEvent, ResolvedDate};
use chrono::NaiveDate;
use log::debug;

/// The category axis of the event filter. `All` passes every event,
/// including ones with no category at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, event: &ParsedEvent) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(name) => event.category.as_deref() == Some(name.as_str()),
        }
    }
}

/// A labeled group of events for display: either content-authored (a `**`
/// header line in the source) or synthesized (events on a selected day).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub header: String,
    pub events: Vec<ParsedEvent>,
}

#[derive(Debug, Clone)]
enum FeedLine {
    Header(String),
    Event(ParsedEvent),
}

/// The parsed event feed, constructed once per content load from the raw
/// lines. Header markers are kept in document order so content-authored
/// grouping survives filtering.
#[derive(Debug, Clone)]
pub struct EventFeed {
    lines: Vec<FeedLine>,
    reference_year: i32,
}

impl EventFeed {
    pub fn from_lines<'a, I>(lines: I, reference_year: i32) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut parsed = Vec::new();
        for raw in lines {
            if raw.trim().is_empty() {
                continue;
            }
            if is_section_header(raw) {
                parsed.push(FeedLine::Header(header_text(raw).to_string()));
            } else if let Some(event) = parse_event_line(raw) {
                parsed.push(FeedLine::Event(event));
            } else {
                debug!("dropping malformed event line: {raw:?}");
            }
        }
        Self {
            lines: parsed,
            reference_year,
        }
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// All parsed events in document order, headers skipped.
    pub fn events(&self) -> impl Iterator<Item = &ParsedEvent> {
        self.lines.iter().filter_map(|line| match line {
            FeedLine::Event(event) => Some(event),
            FeedLine::Header(_) => None,
        })
    }

    /// The single entry point the UI calls on every input change: grouped
    /// sections when no date is selected, otherwise the one synthetic
    /// "events on day D" section. An empty result in selected-date mode is
    /// the display-level "no events for this day" state, not an error.
    pub fn select(
        &self,
        day: DayFilter,
        category: &CategoryFilter,
        selected: Option<NaiveDate>,
    ) -> Vec<Section> {
        match selected {
            Some(date) => self.on_date(date, day, category).into_iter().collect(),
            None => self.sections(day, category),
        }
    }

    /// Content-authored sections with both filter axes applied. Sections
    /// left empty after filtering are dropped entirely; they are never
    /// rendered as bare headers.
    pub fn sections(&self, day: DayFilter, category: &CategoryFilter) -> Vec<Section> {
        let mut sections = Vec::new();
        let mut current = Section {
            header: String::new(),
            events: Vec::new(),
        };
        for line in &self.lines {
            match line {
                FeedLine::Header(header) => {
                    if !current.events.is_empty() {
                        sections.push(std::mem::replace(
                            &mut current,
                            Section {
                                header: header.clone(),
                                events: Vec::new(),
                            },
                        ));
                    } else {
                        // Previous section stayed empty; reuse the accumulator.
                        current.header = header.clone();
                    }
                }
                FeedLine::Event(event) => {
                    if day.matches_token(&event.date_token) && category.matches(event) {
                        current.events.push(event.clone());
                    }
                }
            }
        }
        if !current.events.is_empty() {
            sections.push(current);
        }
        sections
    }

    /// Events occurring on `date`: specific events on that exact day plus
    /// recurring events whose weekday matches, intersected with both filter
    /// axes. Headers are ignored in this mode.
    pub fn on_date(
        &self,
        date: NaiveDate,
        day: DayFilter,
        category: &CategoryFilter,
    ) -> Option<Section> {
        let events: Vec<ParsedEvent> = self
            .events()
            .filter(|event| event.resolve(self.reference_year).occurs_on(date))
            .filter(|event| day.matches_token(&event.date_token) && category.matches(event))
            .cloned()
            .collect();
        if events.is_empty() {
            return None;
        }
        Some(Section {
            header: date.format("%A, %d %B %Y").to_string(),
            events,
        })
    }

    /// Distinct calendar days with at least one event, for the month-widget
    /// dot indicators. Recurring events are deliberately excluded; they have
    /// no single date to mark.
    pub fn event_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .events()
            .filter_map(|event| match event.resolve(self.reference_year) {
                ResolvedDate::Specific(date) => Some(date),
                _ => None,
            })
            .collect();
        dates.sort();
        dates.dedup();
        dates
    }

    /// The first `count` events on or after `today`, ascending by resolved
    /// date. Recurring tokens are excluded up front: in this single-year
    /// model they have no sortable next occurrence.
    pub fn upcoming(&self, today: NaiveDate, count: usize) -> Vec<ParsedEvent> {
        let mut dated: Vec<(NaiveDate, ParsedEvent)> = self
            .events()
            .filter(|event| !event.has_recurring_token())
            .filter_map(|event| match event.resolve(self.reference_year) {
                ResolvedDate::Specific(date) if date >= today => Some((date, event.clone())),
                _ => None,
            })
            .collect();
        // Stable sort keeps document order within a day.
        dated.sort_by_key(|(date, _)| *date);
        dated.into_iter().take(count).map(|(_, event)| event).collect()
    }
}
