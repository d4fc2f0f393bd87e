// File: src/export.rs
// Calendar export: converts a resolved event into an ICS document and a
// Google Calendar deep link. Events whose date token does not resolve to a
// single day, or whose time token yields no start instant, produce no
// artifact (the UI hides its export controls in that case).
use crate::model::ParsedEvent;
use crate::model::resolve::{ResolvedDate, resolve_date};
use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, Utc};
use log::debug;
use url::Url;
use uuid::Uuid;

pub const GOOGLE_CALENDAR_RENDER_URL: &str = "https://www.google.com/calendar/render";

const UTC_BASIC: &str = "%Y%m%dT%H%M%SZ";
const LOCAL_BASIC: &str = "%Y%m%dT%H%M%S";
const DATE_BASIC: &str = "%Y%m%d";

/// An export-ready event. `start == None` means the time token carried no
/// parseable instant; both generators refuse such events instead of
/// guessing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub all_day: bool,
}

/// Builds concrete start/end instants for an event.
///
/// The base day must resolve to a specific date in the reference year;
/// recurring and unresolvable tokens fail the whole conversion. The time
/// token is scanned for up to two `HH:MM[AM|PM]` occurrences (first is
/// start, second is end, missing end defaults to start + 1 hour); an
/// "all day" token maps to midnight..23:59:59.999.
pub fn to_calendar_event(event: &ParsedEvent, reference_year: i32) -> Option<CalendarEvent> {
    let base = match resolve_date(&event.date_token, reference_year) {
        ResolvedDate::Specific(date) => date,
        other => {
            debug!(
                "refusing export for {:?}: date token {:?} resolved to {other:?}",
                event.title, event.date_token
            );
            return None;
        }
    };

    let (start, end, all_day) = if event.time_token.to_lowercase().contains("all day") {
        (
            Some(base.and_hms_opt(0, 0, 0).unwrap()),
            Some(base.and_hms_milli_opt(23, 59, 59, 999).unwrap()),
            true,
        )
    } else {
        match extract_times(&event.time_token).as_slice() {
            [] => (None, None, false),
            [start] => {
                let start = base.and_time(*start);
                (Some(start), Some(start + Duration::hours(1)), false)
            }
            [start, end, ..] => (Some(base.and_time(*start)), Some(base.and_time(*end)), false),
        }
    };

    Some(CalendarEvent {
        title: event.title.clone(),
        description: event.description.clone().unwrap_or_default(),
        location: event.location.clone().unwrap_or_default(),
        start,
        end,
        all_day,
    })
}

/// Scans arbitrary prose for `HH:MM` occurrences with an optional 12-hour
/// marker ("14:00-18:00", "2:30 PM", "Doors 19:00, start 20:00").
/// 12-hour markers normalize to 24-hour time with 12 AM mapping to hour 0.
fn extract_times(token: &str) -> Vec<NaiveTime> {
    let chars: Vec<char> = token.chars().collect();
    let mut times = Vec::new();
    let mut i = 0;

    while i < chars.len() && times.len() < 2 {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        // Measure the digit run; a time needs a 1-2 digit hour followed
        // directly by ":MM" with exactly two minute digits.
        let mut j = i;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        let shaped = j - i <= 2
            && j + 2 < chars.len()
            && chars[j] == ':'
            && chars[j + 1].is_ascii_digit()
            && chars[j + 2].is_ascii_digit()
            && (j + 3 >= chars.len() || !chars[j + 3].is_ascii_digit());
        if !shaped {
            // Skip the whole run so minute digits are not re-scanned as hours.
            i = j;
            continue;
        }

        let mut hour: u32 = chars[i..j].iter().collect::<String>().parse().unwrap_or(99);
        let minute: u32 = chars[j + 1..j + 3]
            .iter()
            .collect::<String>()
            .parse()
            .unwrap_or(99);
        let mut next = j + 3;

        // Optional AM/PM marker, attached or after a single space.
        let mut marker_at = next;
        if marker_at < chars.len() && chars[marker_at] == ' ' {
            marker_at += 1;
        }
        let marker = chars.get(marker_at..marker_at + 2).and_then(|pair| {
            match pair.iter().collect::<String>().to_lowercase().as_str() {
                "am" => Some(false),
                "pm" => Some(true),
                _ => None,
            }
        });
        if let Some(is_pm) = marker
            && (1..=12).contains(&hour)
        {
            hour = match (hour, is_pm) {
                (12, false) => 0,
                (12, true) => 12,
                (h, false) => h,
                (h, true) => h + 12,
            };
            next = marker_at + 2;
        }

        if let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) {
            times.push(time);
        }
        i = next;
    }
    times
}

/// Builds the Google Calendar "add event" deep link. The `url` crate handles
/// query encoding; `dates` uses the compact UTC-basic format for timed
/// events and bare dates (exclusive end) for all-day events.
pub fn google_calendar_url(event: &CalendarEvent) -> Option<String> {
    let start = event.start?;
    let end = event.end?;

    let dates = if event.all_day {
        format!(
            "{}/{}",
            start.date().format(DATE_BASIC),
            (start.date() + Duration::days(1)).format(DATE_BASIC)
        )
    } else {
        format!("{}Z/{}Z", start.format(LOCAL_BASIC), end.format(LOCAL_BASIC))
    };

    let mut url = Url::parse(GOOGLE_CALENDAR_RENDER_URL).ok()?;
    url.query_pairs_mut()
        .append_pair("action", "TEMPLATE")
        .append_pair("text", &event.title)
        .append_pair("dates", &dates)
        .append_pair("details", &event.description)
        .append_pair("location", &event.location);
    Some(url.to_string())
}

/// Emits a minimal VCALENDAR/VEVENT document with CRLF terminators.
///
/// All-day events use `VALUE=DATE` with an exclusive end of start + 1 day;
/// timed events label both instants with the configured `tzid`. Output is
/// byte-identical for identical input except for UID and DTSTAMP, which are
/// generation-dependent by design.
pub fn to_ics(
    event: &CalendarEvent,
    product_name: &str,
    tzid: &str,
    now: DateTime<Utc>,
) -> Option<String> {
    let start = event.start?;
    let end = event.end?;
    let uid = Uuid::new_v4();

    let mut out = String::new();
    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, "VERSION:2.0");
    push_line(&mut out, &format!("PRODID:-//{product_name}//EN"));
    push_line(&mut out, "BEGIN:VEVENT");
    push_line(&mut out, &format!("UID:{uid}"));
    push_line(&mut out, &format!("DTSTAMP:{}", now.format(UTC_BASIC)));
    if event.all_day {
        push_line(
            &mut out,
            &format!("DTSTART;VALUE=DATE:{}", start.date().format(DATE_BASIC)),
        );
        push_line(
            &mut out,
            &format!(
                "DTEND;VALUE=DATE:{}",
                (start.date() + Duration::days(1)).format(DATE_BASIC)
            ),
        );
    } else {
        push_line(
            &mut out,
            &format!("DTSTART;TZID={tzid}:{}", start.format(LOCAL_BASIC)),
        );
        push_line(
            &mut out,
            &format!("DTEND;TZID={tzid}:{}", end.format(LOCAL_BASIC)),
        );
    }
    push_line(&mut out, &format!("SUMMARY:{}", escape_text(&event.title)));
    push_line(
        &mut out,
        &format!("DESCRIPTION:{}", escape_text(&event.description)),
    );
    push_line(
        &mut out,
        &format!("LOCATION:{}", escape_text(&event.location)),
    );
    push_line(&mut out, "END:VEVENT");
    push_line(&mut out, "END:VCALENDAR");
    Some(out)
}

/// Suggested download filename: start date plus a slug of the title.
pub fn suggested_filename(event: &CalendarEvent) -> String {
    match event.start {
        Some(start) => format!("{}__{}.ics", start.date().format("%Y-%m-%d"), slugify(&event.title)),
        None => format!("{}.ics", slugify(&event.title)),
    }
}

fn push_line(buf: &mut String, line: &str) {
    buf.push_str(line);
    buf.push_str("\r\n");
}

/// RFC 5545 TEXT escaping: backslash, semicolon, comma, and embedded line
/// breaks (normalized to a literal \n).
fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

fn slugify(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(50)
        .collect()
}
