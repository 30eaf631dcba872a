//! TOML configuration for calendars and the step loop.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Horae configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HoraeConfig {
    /// Calendar definition.
    pub calendar: CalendarToml,

    /// Time-stepping loop settings.
    #[serde(default)]
    pub step: StepToml,
}

impl HoraeConfig {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse config TOML: {}", path.display()))
    }
}

/// `[calendar]` table. The rule fields apply to `kind = "custom"` only.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarToml {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub days_per_month: Option<Vec<i32>>,
    #[serde(default)]
    pub months_per_year: Option<i32>,
    #[serde(default)]
    pub seconds_per_day: Option<i64>,
    /// `[whole, numerator, denominator]`.
    #[serde(default)]
    pub days_per_year: Option<[i64; 3]>,
}

fn default_kind() -> String {
    "gregorian".to_string()
}

/// `[step]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepToml {
    /// Start date as `Y-M-D`, or a day number for julian_day; omitted for no_calendar.
    #[serde(default)]
    pub start: Option<String>,
    /// Seconds added to the start date (the whole start for no_calendar).
    #[serde(default)]
    pub start_seconds: i64,
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: i64,
    #[serde(default = "default_count")]
    pub count: usize,
}

impl Default for StepToml {
    fn default() -> Self {
        Self {
            start: None,
            start_seconds: 0,
            interval_seconds: default_interval_seconds(),
            count: default_count(),
        }
    }
}

fn default_interval_seconds() -> i64 {
    86_400
}
fn default_count() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config() {
        let config: HoraeConfig = toml::from_str(
            r#"
            [calendar]
            name = "ocean"
            kind = "custom"
            days_per_month = [30, 30, 30]
            seconds_per_day = 86400
            days_per_year = [90, 0, 1]

            [step]
            start = "2000-01-01"
            interval_seconds = 3600
            count = 24
            "#,
        )
        .unwrap();
        assert_eq!(config.calendar.name, "ocean");
        assert_eq!(config.calendar.days_per_year, Some([90, 0, 1]));
        assert_eq!(config.step.interval_seconds, 3_600);
        assert_eq!(config.step.start_seconds, 0);
        assert_eq!(config.step.count, 24);
    }

    #[test]
    fn defaults() {
        let config: HoraeConfig = toml::from_str("[calendar]\n").unwrap();
        assert_eq!(config.calendar.kind, "gregorian");
        assert!(config.calendar.name.is_empty());
        assert_eq!(config.step.interval_seconds, 86_400);
        assert_eq!(config.step.count, 10);
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(toml::from_str::<HoraeConfig>("[calendar]\nleap = true\n").is_err());
        assert!(toml::from_str::<HoraeConfig>("[calendar]\n[io]\n").is_err());
    }
}
