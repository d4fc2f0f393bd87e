// Tests for feed configuration defaults and TOML round-tripping.
use chrono::NaiveDate;
use stadtkalender::config::FeedConfig;

#[test]
fn test_defaults() {
    let config = FeedConfig::default();
    assert_eq!(config.reference_year, 2025);
    assert_eq!(config.timezone, "Europe/Berlin");
    assert_eq!(config.product_name, "Stadtkalender");
    assert_eq!(config.upcoming_count, 4);
    assert!(config.pinned_today.is_none());
}

#[test]
fn test_empty_toml_yields_defaults() {
    let config = FeedConfig::from_toml_str("").unwrap();
    assert_eq!(config, FeedConfig::default());
}

#[test]
fn test_partial_toml_keeps_other_defaults() {
    let config = FeedConfig::from_toml_str("reference_year = 2026\n").unwrap();
    assert_eq!(config.reference_year, 2026);
    assert_eq!(config.timezone, "Europe/Berlin");
}

#[test]
fn test_toml_round_trip() {
    let mut config = FeedConfig::default();
    config.pinned_today = NaiveDate::from_ymd_opt(2025, 8, 30);
    config.product_name = "Altstadtblatt".to_string();

    let raw = config.to_toml_string().unwrap();
    let parsed = FeedConfig::from_toml_str(&raw).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_pinned_today_overrides_fallback() {
    let mut config = FeedConfig::default();
    let fallback = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
    assert_eq!(config.today_or(fallback), fallback);

    config.pinned_today = NaiveDate::from_ymd_opt(2025, 8, 30);
    assert_eq!(config.today_or(fallback), config.pinned_today.unwrap());
}
