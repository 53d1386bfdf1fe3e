//! User settings for fintrack
//!
//! Display preferences and the knobs the metrics layer takes as
//! parameters: budget warning threshold, default goal ordering, page size
//! and trend window.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use super::paths::FintrackPaths;
use crate::error::FintrackError;
use crate::metrics::{GoalSort, DEFAULT_WARNING_THRESHOLD, MAX_TREND_MONTHS};

/// User settings, persisted as `config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Percent of a budget at which it is flagged as near its limit
    #[serde(default = "default_warning_threshold")]
    pub budget_warning_threshold: u8,

    #[serde(default)]
    pub default_goal_sort: GoalSort,

    /// Transactions per page in `transaction list`
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Months shown by `report trends`
    #[serde(default = "default_trend_months")]
    pub trend_months: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_warning_threshold() -> u8 {
    DEFAULT_WARNING_THRESHOLD
}

fn default_page_size() -> usize {
    10
}

fn default_trend_months() -> usize {
    6
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            budget_warning_threshold: default_warning_threshold(),
            default_goal_sort: GoalSort::default(),
            page_size: default_page_size(),
            trend_months: default_trend_months(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &FintrackPaths) -> Result<Self, FintrackError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FintrackError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| FintrackError::Config(format!("Failed to parse settings file: {}", e)))?;

        // config.json may have been edited by hand
        settings.validate().map_err(|e| match e {
            FintrackError::Config(msg) => {
                FintrackError::Config(format!("{} in {}", msg, settings_path.display()))
            }
            other => other,
        })?;
        Ok(settings)
    }

    /// Check every setting against the rules [`Settings::set`] enforces
    pub fn validate(&self) -> Result<(), FintrackError> {
        check_date_format(&self.date_format)
            .map_err(|reason| invalid_value("date_format", &self.date_format, reason))?;
        if !(1..=100).contains(&self.budget_warning_threshold) {
            return Err(invalid_value(
                "budget_warning_threshold",
                self.budget_warning_threshold,
                "must be between 1 and 100",
            ));
        }
        if self.page_size == 0 {
            return Err(invalid_value("page_size", self.page_size, "expected a positive number"));
        }
        if !(1..=MAX_TREND_MONTHS).contains(&self.trend_months) {
            return Err(invalid_value(
                "trend_months",
                self.trend_months,
                &format!("must be between 1 and {}", MAX_TREND_MONTHS),
            ));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FintrackPaths) -> Result<(), FintrackError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FintrackError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FintrackError::Io(format!("Failed to write settings file: {}", e)))
    }

    /// Update one setting from its key and a string value
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), FintrackError> {
        let invalid = |reason: &str| invalid_value(key, value, reason);

        match key {
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "date_format" => {
                check_date_format(value).map_err(invalid)?;
                self.date_format = value.to_string();
            }
            "budget_warning_threshold" => {
                let threshold: u8 = value
                    .parse()
                    .map_err(|_| invalid("expected a whole number"))?;
                if !(1..=100).contains(&threshold) {
                    return Err(invalid("must be between 1 and 100"));
                }
                self.budget_warning_threshold = threshold;
            }
            "default_goal_sort" => {
                self.default_goal_sort = value.parse().map_err(|e: String| invalid(&e))?;
            }
            "page_size" => {
                self.page_size = parse_positive(value).ok_or_else(|| invalid("expected a positive number"))?;
            }
            "trend_months" => {
                self.trend_months = parse_positive(value)
                    .filter(|n| *n <= MAX_TREND_MONTHS)
                    .ok_or_else(|| {
                        invalid(&format!("must be between 1 and {}", MAX_TREND_MONTHS))
                    })?;
            }
            _ => {
                return Err(FintrackError::Config(format!(
                    "Unknown setting '{}'. Known settings: {}",
                    key,
                    Self::KEYS.join(", ")
                )))
            }
        }

        Ok(())
    }

    /// Setting keys accepted by [`Settings::set`]
    pub const KEYS: &'static [&'static str] = &[
        "currency_symbol",
        "date_format",
        "budget_warning_threshold",
        "default_goal_sort",
        "page_size",
        "trend_months",
    ];
}

fn invalid_value(key: &str, value: impl std::fmt::Display, reason: &str) -> FintrackError {
    FintrackError::Config(format!("Invalid value '{}' for {}: {}", value, key, reason))
}

/// A date format must render a calendar date; time and zone fields can't
fn check_date_format(format: &str) -> Result<(), &'static str> {
    if format.trim().is_empty() {
        return Err("must not be empty");
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err("not a valid strftime format");
    }

    let sample = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap_or_default();
    let mut rendered = String::new();
    write!(rendered, "{}", sample.format(format))
        .map_err(|_| "only date fields can be used (no time or time zone)")
}

fn parse_positive(value: &str) -> Option<usize> {
    value.trim().parse().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.budget_warning_threshold, 90);
        assert_eq!(settings.default_goal_sort, GoalSort::Progress);
        assert_eq!(settings.page_size, 10);
        assert_eq!(settings.trend_months, 6);
        assert_eq!(settings.currency_symbol, "$");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path());

        let mut settings = Settings::default();
        settings.default_goal_sort = GoalSort::Deadline;
        settings.budget_warning_threshold = 80;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let loaded: Settings = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.page_size, 10);
        assert_eq!(loaded.default_goal_sort, GoalSort::Progress);
    }

    #[test]
    fn test_set() {
        let mut settings = Settings::default();

        settings.set("default_goal_sort", "name").unwrap();
        settings.set("budget_warning_threshold", "75").unwrap();
        settings.set("page_size", "25").unwrap();

        assert_eq!(settings.default_goal_sort, GoalSort::Name);
        assert_eq!(settings.budget_warning_threshold, 75);
        assert_eq!(settings.page_size, 25);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut settings = Settings::default();

        assert!(settings.set("budget_warning_threshold", "0").is_err());
        assert!(settings.set("budget_warning_threshold", "150").is_err());
        assert!(settings.set("page_size", "0").is_err());
        assert!(settings.set("default_goal_sort", "size").is_err());
        assert!(settings.set("colour", "blue").is_err());
        assert!(settings.set("date_format", "%Y-%Q").is_err());
        assert!(settings.set("trend_months", "121").is_err());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_date_format_must_render_a_date() {
        let mut settings = Settings::default();

        assert!(settings.set("date_format", "%H:%M").is_err());
        assert!(settings.set("date_format", "%Y-%m-%d %Z").is_err());
        assert_eq!(settings.date_format, "%Y-%m-%d");

        settings.set("date_format", "%d %b %Y").unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(date.format(&settings.date_format).to_string(), "09 Mar 2025");
    }

    #[test]
    fn test_load_rejects_hand_edited_values() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path());
        paths.ensure_directories().unwrap();

        std::fs::write(paths.settings_file(), r#"{"date_format": "%H:%M"}"#).unwrap();
        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(err.to_string().contains("date_format"));

        std::fs::write(paths.settings_file(), r#"{"trend_months": 100000}"#).unwrap();
        assert!(Settings::load_or_create(&paths).is_err());
    }
}
