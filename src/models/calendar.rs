//! Workday calendar.
//!
//! Answers two questions for the scheduling engine: "is this a working
//! day?" and "where does the N-th working day from here fall?".
//!
//! # Time Model
//! Instants are wall-clock `NaiveDateTime` values without a zone. The
//! standard workweek is Monday through Friday; every working day opens at
//! the calendar's workday start (07:00 unless configured otherwise).
//!
//! Calendar arithmetic never fails and never resets the time of day unless
//! the caller asks for it via [`WorkCalendar::at_workday_start`].

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};

/// Default opening time of a working day (07:00).
pub fn default_workday_start() -> NaiveTime {
    NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Monday-Friday calendar with a fixed daily opening time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCalendar {
    /// Time of day at which a working day opens.
    pub workday_start: NaiveTime,
}

impl WorkCalendar {
    /// Creates the standard calendar (Mon-Fri, opening at 07:00).
    pub fn new() -> Self {
        Self {
            workday_start: default_workday_start(),
        }
    }

    /// Sets the daily opening time.
    pub fn with_workday_start(mut self, workday_start: NaiveTime) -> Self {
        self.workday_start = workday_start;
        self
    }

    /// Whether `date` falls inside the standard workweek.
    #[inline]
    pub fn is_workday(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Moves forward until `n` working days have been counted.
    ///
    /// Returns the n-th working day after `instant` at the same time of day.
    /// `n = 0` returns `instant` unchanged, even on a weekend. Any seven
    /// consecutive days hold exactly five working days, so whole weeks are
    /// skipped at once and at most five working days are stepped singly.
    /// Saturates at [`NaiveDateTime::MAX`].
    pub fn advance_working_days(&self, instant: NaiveDateTime, n: u32) -> NaiveDateTime {
        if n == 0 {
            return instant;
        }
        let weeks = (n - 1) / 5;
        let mut current = shift_days(instant, i64::from(weeks) * 7);
        let mut counted = weeks * 5;
        while counted < n {
            if current == NaiveDateTime::MAX {
                return current;
            }
            current = shift_days(current, 1);
            if self.is_workday(current.date()) {
                counted += 1;
            }
        }
        current
    }

    /// Moves a weekend instant to the following Monday.
    ///
    /// Saturday advances two days, Sunday one; weekdays are returned as-is.
    /// The time of day is preserved.
    pub fn snap_to_next_workday(&self, instant: NaiveDateTime) -> NaiveDateTime {
        match instant.weekday() {
            Weekday::Sat => add_days(instant, 2),
            Weekday::Sun => add_days(instant, 1),
            _ => instant,
        }
    }

    /// `date` at the workday opening time.
    #[inline]
    pub fn at_workday_start(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.workday_start)
    }

    /// Whether `instant` is on a working day and strictly after opening time.
    pub fn is_within_open_workday(&self, instant: NaiveDateTime) -> bool {
        self.is_workday(instant.date()) && instant.time() > self.workday_start
    }
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self::new()
    }
}

/// Adds a fractional number of hours, rounded to the millisecond.
///
/// Negative and non-finite hours add nothing; the result saturates at
/// [`NaiveDateTime::MAX`].
pub fn add_hours(instant: NaiveDateTime, hours: f64) -> NaiveDateTime {
    if !(hours.is_finite() && hours > 0.0) {
        return instant;
    }
    // `as` saturates at i64::MAX for absurd hour counts.
    let millis = (hours * 3_600_000.0).round() as i64;
    TimeDelta::try_milliseconds(millis)
        .and_then(|delta| instant.checked_add_signed(delta))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Adds whole calendar days, saturating at [`NaiveDateTime::MAX`].
pub fn add_days(instant: NaiveDateTime, days: u32) -> NaiveDateTime {
    shift_days(instant, i64::from(days))
}

fn shift_days(instant: NaiveDateTime, days: i64) -> NaiveDateTime {
    TimeDelta::try_days(days)
        .and_then(|delta| instant.checked_add_signed(delta))
        .unwrap_or(NaiveDateTime::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2025-07-07 is a Monday.
    fn at(day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, day)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    #[test]
    fn test_is_workday() {
        let cal = WorkCalendar::new();
        assert!(cal.is_workday(at(7, 0, 0).date())); // Mon
        assert!(cal.is_workday(at(11, 0, 0).date())); // Fri
        assert!(!cal.is_workday(at(12, 0, 0).date())); // Sat
        assert!(!cal.is_workday(at(13, 0, 0).date())); // Sun
    }

    #[test]
    fn test_advance_zero_days_is_identity() {
        let cal = WorkCalendar::new();
        assert_eq!(cal.advance_working_days(at(7, 9, 30), 0), at(7, 9, 30));
        // Even on a weekend
        assert_eq!(cal.advance_working_days(at(12, 7, 0), 0), at(12, 7, 0));
    }

    #[test]
    fn test_advance_within_week() {
        let cal = WorkCalendar::new();
        assert_eq!(cal.advance_working_days(at(7, 7, 0), 1), at(8, 7, 0));
        assert_eq!(cal.advance_working_days(at(7, 7, 0), 4), at(11, 7, 0));
    }

    #[test]
    fn test_advance_skips_weekend() {
        let cal = WorkCalendar::new();
        // Fri + 1 working day = Mon
        assert_eq!(cal.advance_working_days(at(11, 15, 0), 1), at(14, 15, 0));
        // Thu + 3 working days = Tue
        assert_eq!(cal.advance_working_days(at(10, 7, 0), 3), at(15, 7, 0));
        // Sat + 1 = Mon
        assert_eq!(cal.advance_working_days(at(12, 7, 0), 1), at(14, 7, 0));
    }

    #[test]
    fn test_snap_to_next_workday() {
        let cal = WorkCalendar::new();
        assert_eq!(cal.snap_to_next_workday(at(12, 10, 15)), at(14, 10, 15));
        assert_eq!(cal.snap_to_next_workday(at(13, 7, 0)), at(14, 7, 0));
        assert_eq!(cal.snap_to_next_workday(at(9, 18, 0)), at(9, 18, 0));
    }

    #[test]
    fn test_open_workday() {
        let cal = WorkCalendar::new();
        assert!(cal.is_within_open_workday(at(7, 7, 1)));
        assert!(!cal.is_within_open_workday(at(7, 7, 0)));
        assert!(!cal.is_within_open_workday(at(7, 6, 59)));
        assert!(!cal.is_within_open_workday(at(12, 15, 0)));
    }

    #[test]
    fn test_custom_workday_start() {
        let cal =
            WorkCalendar::new().with_workday_start(NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(cal.at_workday_start(at(7, 0, 0).date()), at(7, 8, 30));
    }

    #[test]
    fn test_add_hours_fractional() {
        assert_eq!(add_hours(at(7, 7, 0), 8.0), at(7, 15, 0));
        assert_eq!(add_hours(at(7, 7, 0), 1.5), at(7, 8, 30));
        assert_eq!(add_hours(at(7, 22, 0), 4.0), at(8, 2, 0));
    }

    #[test]
    fn test_add_days() {
        assert_eq!(add_days(at(11, 7, 0), 2), at(13, 7, 0));
        assert_eq!(add_days(at(11, 7, 0), 0), at(11, 7, 0));
    }

    fn step_daily(cal: &WorkCalendar, instant: NaiveDateTime, n: u32) -> NaiveDateTime {
        let mut current = instant;
        let mut counted = 0;
        while counted < n {
            current += TimeDelta::days(1);
            if cal.is_workday(current.date()) {
                counted += 1;
            }
        }
        current
    }

    #[test]
    fn test_advance_by_weeks_matches_daily_stepping() {
        let cal = WorkCalendar::new();
        // Start on every day of one week, Monday through Sunday
        for day in 7..=13 {
            for n in 0..40 {
                let start = at(day, 9, 15);
                assert_eq!(
                    cal.advance_working_days(start, n),
                    step_daily(&cal, start, n),
                    "start day {day}, n {n}"
                );
            }
        }
    }

    #[test]
    fn test_saturates_at_max() {
        let cal = WorkCalendar::new();
        let start = at(7, 7, 0);
        assert_eq!(add_days(start, u32::MAX), NaiveDateTime::MAX);
        assert_eq!(add_hours(start, 1e300), NaiveDateTime::MAX);
        assert_eq!(cal.advance_working_days(start, u32::MAX), NaiveDateTime::MAX);
        assert_eq!(cal.snap_to_next_workday(NaiveDateTime::MAX), NaiveDateTime::MAX);
    }

    #[test]
    fn test_add_hours_ignores_negative_and_non_finite() {
        assert_eq!(add_hours(at(7, 7, 0), -3.0), at(7, 7, 0));
        assert_eq!(add_hours(at(7, 7, 0), f64::NAN), at(7, 7, 0));
        assert_eq!(add_hours(at(7, 7, 0), f64::INFINITY), at(7, 7, 0));
    }
}
