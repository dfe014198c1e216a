//! Scheduler configuration.
//!
//! Loaded from TOML; every key is optional.
//!
//! ```toml
//! workday_start = "07:00:00"
//! chart_padding_days = 2
//! ```

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::models::{default_workday_start, WorkCalendar};
use crate::scheduler::Scheduler;
use crate::timeline::{self, ChartWindow, TimelineRow};

/// Default days of padding on each side of the chart window.
pub const DEFAULT_CHART_PADDING_DAYS: u32 = 2;

/// Tunable scheduling and timeline parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Daily opening time of the workday calendar.
    pub workday_start: NaiveTime,
    /// Calendar days added before the first start and after the last end
    /// when computing the chart window.
    pub chart_padding_days: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            workday_start: default_workday_start(),
            chart_padding_days: DEFAULT_CHART_PADDING_DAYS,
        }
    }
}

impl SchedulerConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Workday calendar described by this config.
    pub fn calendar(&self) -> WorkCalendar {
        WorkCalendar::new().with_workday_start(self.workday_start)
    }

    /// Scheduler on this config's calendar.
    pub fn scheduler(&self) -> Scheduler {
        Scheduler::new().with_calendar(self.calendar())
    }

    /// Chart window of `rows` padded by `chart_padding_days`.
    pub fn chart_window(&self, rows: &[TimelineRow<'_>]) -> Option<ChartWindow> {
        timeline::chart_window(rows, self.chart_padding_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = SchedulerConfig::default();
        assert_eq!(cfg.workday_start, NaiveTime::from_hms_opt(7, 0, 0).unwrap());
        assert_eq!(cfg.chart_padding_days, 2);
        assert_eq!(cfg.calendar(), WorkCalendar::new());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let cfg = SchedulerConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, SchedulerConfig::default());
    }

    #[test]
    fn test_parse_toml() {
        let cfg = SchedulerConfig::from_toml_str(
            "workday_start = \"08:30:00\"\nchart_padding_days = 5\n",
        )
        .unwrap();
        assert_eq!(cfg.workday_start, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(cfg.chart_padding_days, 5);
        assert_eq!(
            cfg.scheduler().calendar().workday_start,
            NaiveTime::from_hms_opt(8, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_invalid_toml() {
        let err = SchedulerConfig::from_toml_str("workday_start = 7").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("invalid scheduler config"));
    }

    #[test]
    fn test_chart_window_uses_padding() {
        use crate::models::Task;

        let cfg = SchedulerConfig::from_toml_str("chart_padding_days = 0").unwrap();
        let scheduler = cfg.scheduler();
        let anchor = scheduler.project_anchor(chrono::NaiveDate::from_ymd_opt(2025, 7, 7).unwrap());
        let scheduled = scheduler.schedule(&[Task::new("a").with_duration(1, 8.0)], anchor);
        let window = cfg.chart_window(&timeline::flatten(&scheduled)).unwrap();
        assert_eq!(window.start, anchor);
        assert_eq!(window.end, scheduled[0].window.end);
    }

    #[test]
    fn test_missing_file() {
        let err = SchedulerConfig::from_toml_file("/nonexistent/wbs-schedule.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
