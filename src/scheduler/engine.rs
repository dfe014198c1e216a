//! Recursive WBS scheduling engine.
//!
//! # Algorithm
//!
//! Each sibling list is a left fold carrying a [`SiblingCursor`]:
//!
//! 1. Pick a tentative start: the previous sibling's start for a
//!    concurrent task that is not first, otherwise the end of the last
//!    sequential sibling.
//! 2. Unless the task is 24/7 or follows the chain, snap the start to the
//!    next workday opening. Work continues immediately instead when the
//!    last sequential sibling ended on that same workday after opening.
//! 3. `work_start = start + lead time` (calendar days).
//! 4. Parents recurse with `work_start` as anchor and end at their latest
//!    child; leaves end after their own duration.
//! 5. Sequential tasks move the sequential cursor to their end; every task
//!    moves the chain cursor to its start.
//!
//! Concurrent tasks never advance the sequential cursor, so a later
//! sequential sibling may start before a long concurrent sibling ends.
//!
//! A non-24/7 multi-day leaf ends at the last working day's opening plus its
//! daily hours, but never before its own work start.
//!
//! Date arithmetic saturates at `NaiveDateTime::MAX`, so absurd durations
//! or lead times pin a task to the end of the representable range instead
//! of failing.
//!
//! # Complexity
//! O(n) in the number of tasks; calendar steps per leaf are bounded.

use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, trace};

use super::cost;
use crate::models::{add_days, add_hours, ScheduledTask, Task, TaskWindow, WorkCalendar};

/// Rolling state threaded through one sibling list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiblingCursor {
    /// End of the latest sequential sibling.
    pub sequential_end: NaiveDateTime,
    /// Start of the immediately previous sibling, of either mode.
    pub chain_start: NaiveDateTime,
}

impl SiblingCursor {
    /// Both cursors at `anchor`.
    pub fn at(anchor: NaiveDateTime) -> Self {
        Self {
            sequential_end: anchor,
            chain_start: anchor,
        }
    }
}

/// WBS scheduler.
///
/// Pure and deterministic: the same forest and anchor always produce the
/// same output. Holds no state between calls.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use wbs_schedule::models::Task;
/// use wbs_schedule::scheduler::Scheduler;
///
/// let scheduler = Scheduler::new();
/// // 2025-07-07 is a Monday
/// let anchor = scheduler.project_anchor(NaiveDate::from_ymd_opt(2025, 7, 7).unwrap());
/// let tasks = vec![
///     Task::new("survey").with_duration(1, 8.0),
///     Task::new("permit").with_duration(1, 8.0),
/// ];
///
/// let scheduled = scheduler.schedule(&tasks, anchor);
/// assert_eq!(scheduled[0].window.end.format("%a %H:%M").to_string(), "Mon 15:00");
/// // Second task continues the same afternoon
/// assert_eq!(scheduled[1].window.start, scheduled[0].window.end);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    calendar: WorkCalendar,
}

impl Scheduler {
    /// Creates a scheduler on the standard Mon-Fri, 07:00 calendar.
    pub fn new() -> Self {
        Self {
            calendar: WorkCalendar::new(),
        }
    }

    /// Sets the workday calendar.
    pub fn with_calendar(mut self, calendar: WorkCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// The workday calendar in use.
    pub fn calendar(&self) -> &WorkCalendar {
        &self.calendar
    }

    /// Project start instant: `date` at workday opening.
    pub fn project_anchor(&self, date: NaiveDate) -> NaiveDateTime {
        self.calendar.at_workday_start(date)
    }

    /// Schedules a forest from `anchor`.
    ///
    /// Returns the forest annotated with windows and costs, in input order.
    /// An empty input yields an empty output.
    pub fn schedule(&self, tasks: &[Task], anchor: NaiveDateTime) -> Vec<ScheduledTask> {
        debug!(
            "event=schedule_start roots={} anchor={}",
            tasks.len(),
            anchor
        );
        let (scheduled, cursor) = self.schedule_siblings(tasks, anchor);
        debug!(
            "event=schedule_done roots={} sequential_end={}",
            scheduled.len(),
            cursor.sequential_end
        );
        scheduled
    }

    /// Schedules one sibling list, returning the scheduled list together
    /// with the final cursor.
    pub fn schedule_siblings(
        &self,
        tasks: &[Task],
        anchor: NaiveDateTime,
    ) -> (Vec<ScheduledTask>, SiblingCursor) {
        tasks.iter().enumerate().fold(
            (Vec::with_capacity(tasks.len()), SiblingCursor::at(anchor)),
            |(mut scheduled, cursor), (index, task)| {
                let (done, next) = self.schedule_task(task, index == 0, cursor);
                scheduled.push(done);
                (scheduled, next)
            },
        )
    }

    fn schedule_task(
        &self,
        task: &Task,
        is_first: bool,
        cursor: SiblingCursor,
    ) -> (ScheduledTask, SiblingCursor) {
        let follows_chain = !is_first && task.is_concurrent();
        let start = self.resolve_start(task, follows_chain, cursor);
        let work_start = add_days(start, task.lead_time_days);

        let (end, children) = if task.has_children() {
            let (children, _) = self.schedule_siblings(&task.children, work_start);
            let end = children
                .iter()
                .map(|c| c.window.end)
                .max()
                .unwrap_or(work_start);
            (end, children)
        } else {
            (self.leaf_end(task, work_start), Vec::new())
        };

        let cost = cost::rollup(task, &children);
        trace!(
            "event=task_scheduled id={} start={} work_start={} end={} total_cost={}",
            task.id,
            start,
            work_start,
            end,
            cost.total_cost
        );

        let next = SiblingCursor {
            sequential_end: if task.is_concurrent() {
                cursor.sequential_end
            } else {
                end
            },
            chain_start: start,
        };
        let window = TaskWindow {
            start,
            work_start,
            end,
        };
        (ScheduledTask::new(task, window, cost, children), next)
    }

    /// Resolves a task's start from the sibling cursor.
    fn resolve_start(
        &self,
        task: &Task,
        follows_chain: bool,
        cursor: SiblingCursor,
    ) -> NaiveDateTime {
        if follows_chain {
            return cursor.chain_start;
        }
        let tentative = cursor.sequential_end;
        if task.is_247 {
            return tentative;
        }

        let snapped = self.calendar.snap_to_next_workday(tentative);
        let last_end = cursor.sequential_end;
        if self.calendar.is_within_open_workday(last_end) && last_end.date() == snapped.date() {
            // Same-day continuation after a sequential sibling.
            last_end
        } else {
            self.calendar.at_workday_start(snapped.date())
        }
    }

    fn leaf_end(&self, task: &Task, work_start: NaiveDateTime) -> NaiveDateTime {
        let hours = task.work_hours();
        if task.is_247 {
            add_hours(add_days(work_start, task.duration_days), hours)
        } else if task.duration_days > 0 {
            let last_day = self
                .calendar
                .advance_working_days(work_start, task.duration_days - 1);
            // A mid-afternoon start with a short final day would otherwise
            // end before it began.
            add_hours(self.calendar.at_workday_start(last_day.date()), hours).max(work_start)
        } else {
            add_hours(work_start, hours)
        }
    }
}

/// Schedules a forest on the standard calendar.
pub fn schedule(tasks: &[Task], anchor: NaiveDateTime) -> Vec<ScheduledTask> {
    Scheduler::new().schedule(tasks, anchor)
}
