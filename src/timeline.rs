//! Gantt timeline helpers.
//!
//! Pure projections of a scheduled forest onto a chart: which rows are
//! visible, what time range the chart covers, how that range splits into
//! month headers, and where each bar sits. No rendering happens here.

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use serde::Serialize;

use crate::models::{add_days, ScheduledTask};

/// A visible chart row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineRow<'a> {
    /// Nesting depth; roots are level 0.
    pub level: usize,
    /// The scheduled task shown on this row.
    pub task: &'a ScheduledTask,
}

/// Time range covered by the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartWindow {
    /// Left edge.
    pub start: NaiveDateTime,
    /// Right edge.
    pub end: NaiveDateTime,
}

impl ChartWindow {
    /// Width of the window.
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Position of `instant` as a percentage of the window width.
    ///
    /// A zero-width window maps everything to 0.
    pub fn percent_of(&self, instant: NaiveDateTime) -> f64 {
        let total = self.duration().num_milliseconds();
        if total <= 0 {
            return 0.0;
        }
        (instant - self.start).num_milliseconds() as f64 / total as f64 * 100.0
    }
}

/// One month header with the days it spans inside the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
    pub days: Vec<NaiveDate>,
}

/// A horizontal bar segment, in percent of the window width.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BarSegment {
    pub offset: f64,
    pub width: f64,
}

/// Lead-time and work segments of one task's bar.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BarGeometry {
    /// `start..work_start`; zero width when there is no lead time.
    pub lead: BarSegment,
    /// `work_start..end`.
    pub work: BarSegment,
}

/// Flattens a scheduled forest into visible rows, depth first.
///
/// Children of a collapsed task (`is_expanded == false`) are skipped, but
/// the collapsed task itself is still listed.
pub fn flatten(forest: &[ScheduledTask]) -> Vec<TimelineRow<'_>> {
    let mut rows = Vec::new();
    for task in forest {
        push_rows(task, 0, &mut rows);
    }
    rows
}

fn push_rows<'a>(task: &'a ScheduledTask, level: usize, rows: &mut Vec<TimelineRow<'a>>) {
    rows.push(TimelineRow { level, task });
    if task.is_expanded {
        for child in &task.children {
            push_rows(child, level + 1, rows);
        }
    }
}

/// Chart range: earliest start minus padding to latest end plus padding.
///
/// Returns `None` when there are no rows. Both edges saturate at the
/// representable date range.
pub fn chart_window(rows: &[TimelineRow<'_>], padding_days: u32) -> Option<ChartWindow> {
    let start = rows.iter().map(|r| r.task.window.start).min()?;
    let end = rows.iter().map(|r| r.task.window.end).max()?;
    let padding = TimeDelta::days(i64::from(padding_days));
    Some(ChartWindow {
        start: start.checked_sub_signed(padding).unwrap_or(NaiveDateTime::MIN),
        end: add_days(end, padding_days),
    })
}

/// Splits the window into month headers.
///
/// Days are visited one at a time from the window's start instant while it
/// is not past the end, so a day is included when its start-time-of-day
/// copy still falls inside the window.
pub fn month_buckets(window: &ChartWindow) -> Vec<MonthBucket> {
    let mut buckets: Vec<MonthBucket> = Vec::new();
    let mut cursor = window.start;
    while cursor <= window.end {
        let day = cursor.date();
        match buckets.last_mut() {
            Some(b) if b.year == day.year() && b.month == day.month() => b.days.push(day),
            _ => buckets.push(MonthBucket {
                year: day.year(),
                month: day.month(),
                days: vec![day],
            }),
        }
        match cursor.checked_add_signed(TimeDelta::days(1)) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    buckets
}

/// Bar placement of `task` within `window`.
pub fn bar_geometry(task: &ScheduledTask, window: &ChartWindow) -> BarGeometry {
    let segment = |from: NaiveDateTime, to: NaiveDateTime| {
        let offset = window.percent_of(from);
        BarSegment {
            offset,
            width: (window.percent_of(to) - offset).max(0.0),
        }
    };
    BarGeometry {
        lead: segment(task.window.start, task.window.work_start),
        work: segment(task.window.work_start, task.window.end),
    }
}
