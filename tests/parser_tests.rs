// Unit tests for the event line parsers (full and brief variants).
use stadtkalender::model::{header_text, is_section_header, parse_event_brief, parse_event_line};

#[test]
fn test_full_line_with_article_and_category() {
    let line = "30 AUG :: 14:00 :: Opening Ceremony :: Marktplatz :: Parade and speeches :: articleId=altstadtsommer-2025 :: Festival";
    let event = parse_event_line(line).unwrap();

    assert_eq!(event.date_token, "30 AUG");
    assert_eq!(event.time_token, "14:00");
    assert_eq!(event.title, "Opening Ceremony");
    assert_eq!(event.location, Some("Marktplatz".to_string()));
    assert_eq!(event.description, Some("Parade and speeches".to_string()));
    assert_eq!(
        event.linked_article_id,
        Some("altstadtsommer-2025".to_string())
    );
    assert_eq!(event.category, Some("Festival".to_string()));
}

#[test]
fn test_five_field_line_has_no_extras() {
    let event =
        parse_event_line("Every Friday :: 18:00 :: Stammtisch :: Alter Brauhof :: Weekly meetup")
            .unwrap();

    assert_eq!(event.title, "Stammtisch");
    assert!(event.linked_article_id.is_none());
    assert!(event.category.is_none());
}

#[test]
fn test_category_without_article_id() {
    // Category may appear at position 6 when no articleId field precedes it.
    let event =
        parse_event_line("30 AUG :: 10:00 :: Flohmarkt :: Messplatz :: Allerlei :: Markt").unwrap();
    assert_eq!(event.category, Some("Markt".to_string()));
    assert!(event.linked_article_id.is_none());
}

#[test]
fn test_article_id_after_category() {
    let event = parse_event_line(
        "30 AUG :: 10:00 :: Flohmarkt :: Messplatz :: Allerlei :: Markt :: articleId=flohmarkt-30",
    )
    .unwrap();
    assert_eq!(event.category, Some("Markt".to_string()));
    assert_eq!(event.linked_article_id, Some("flohmarkt-30".to_string()));
}

#[test]
fn test_malformed_lines_return_none() {
    assert!(parse_event_line("garbage").is_none());
    assert!(parse_event_line("").is_none());
    assert!(parse_event_line("a :: b").is_none());
    // Empty required fields after trimming.
    assert!(parse_event_line(" :: 14:00 :: Title").is_none());
    assert!(parse_event_line("30 AUG ::  :: Title").is_none());
    assert!(parse_event_line("30 AUG :: 14:00 ::   ").is_none());
}

#[test]
fn test_parser_totality_on_hostile_input() {
    // Never panics, whatever the shape.
    let hostile = [
        ":::::::",
        "::",
        " :: :: :: :: :: :: :: :: ",
        "a::b::c::d::e::f::g::h::i",
        "\u{0}::\u{0}::\u{0}",
        "😀 :: 😀 :: 😀",
    ];
    for line in hostile {
        if let Some(event) = parse_event_line(line) {
            assert!(!event.title.is_empty());
        }
    }
}

#[test]
fn test_missing_optional_fields_are_none() {
    let event = parse_event_line("1 SEP :: 19:30 :: Lesung").unwrap();
    assert!(event.location.is_none());
    assert!(event.description.is_none());

    let event = parse_event_line("1 SEP :: 19:30 :: Lesung ::  :: ").unwrap();
    assert!(event.location.is_none());
    assert!(event.description.is_none());
}

#[test]
fn test_brief_parser_requires_four_fields() {
    assert!(parse_event_brief("30 AUG :: 14:00 :: Opening Ceremony").is_none());

    let brief = parse_event_brief("30 AUG :: 14:00 :: Opening Ceremony :: Marktplatz").unwrap();
    assert_eq!(brief.date_token, "30 AUG");
    assert_eq!(brief.time_token, "14:00");
    assert_eq!(brief.title, "Opening Ceremony");
    assert_eq!(brief.location, "Marktplatz");
}

#[test]
fn test_brief_agrees_with_full_parser() {
    let lines = [
        "30 AUG :: 14:00 :: Opening Ceremony :: Marktplatz :: Parade :: articleId=x :: Festival",
        "Every Friday :: 18:00 :: Stammtisch :: Alter Brauhof :: Weekly meetup",
        "1 SEP :: 19:30 :: Lesung :: Stadtbibliothek",
    ];
    for line in lines {
        let full = parse_event_line(line).unwrap();
        let brief = parse_event_brief(line).unwrap();
        assert_eq!(brief.date_token, full.date_token);
        assert_eq!(brief.time_token, full.time_token);
        assert_eq!(brief.title, full.title);
        assert_eq!(Some(brief.location.as_str()), full.location.as_deref());
    }
}

#[test]
fn test_section_header_detection() {
    assert!(is_section_header("** Altstadtsommer **"));
    assert!(is_section_header("**Kultur"));
    assert!(is_section_header("  ** Indented **"));
    assert!(!is_section_header("30 AUG :: 14:00 :: Opening Ceremony"));
    assert!(!is_section_header("* single star"));

    assert_eq!(header_text("** Altstadtsommer **"), "Altstadtsommer");
    assert_eq!(header_text("**Kultur"), "Kultur");
}
