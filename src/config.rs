// File: ./src/config.rs
// Handles feed configuration defaults and (de)serialization. The core never
// reads this implicitly; callers thread the values into the engine.
use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_reference_year() -> i32 {
    2025
}
fn default_timezone() -> String {
    "Europe/Berlin".to_string()
}
fn default_product_name() -> String {
    "Stadtkalender".to_string()
}
fn default_upcoming_count() -> usize {
    4
}

/// Feed-wide settings. The content collection is single-year, so dates
/// resolve against `reference_year`; `timezone` is only a label for ICS
/// TZID parameters (no TZ database is consulted). `pinned_today` lets demo
/// builds fix "today" for deterministic upcoming strips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_reference_year")]
    pub reference_year: i32,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_product_name")]
    pub product_name: String,
    #[serde(default = "default_upcoming_count")]
    pub upcoming_count: usize,
    #[serde(default)]
    pub pinned_today: Option<NaiveDate>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            reference_year: default_reference_year(),
            timezone: default_timezone(),
            product_name: default_product_name(),
            upcoming_count: default_upcoming_count(),
            pinned_today: None,
        }
    }
}

impl FeedConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// "Today" for date-dependent views: the pinned demo date when set,
    /// otherwise the date supplied by the caller.
    pub fn today_or(&self, fallback: NaiveDate) -> NaiveDate {
        self.pinned_today.unwrap_or(fallback)
    }
}
