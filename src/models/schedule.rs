//! Schedule (solution) model.
//!
//! A scheduled task is an input [`Task`] annotated with everything the
//! engine derives for it: a time window and a cost rollup. The scheduled
//! forest mirrors the input forest node for node, in the same order.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use super::{Resource, ScheduleMode, Task};

/// Derived time window of a task.
///
/// `start <= work_start`; the gap is the task's lead time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskWindow {
    /// When the task's slot opens.
    pub start: NaiveDateTime,
    /// When work actually commences (start + lead time).
    pub work_start: NaiveDateTime,
    /// When the task (or its last child) finishes.
    pub end: NaiveDateTime,
}

impl TaskWindow {
    /// Lead-time portion of the window.
    #[inline]
    pub fn lead_time(&self) -> TimeDelta {
        self.work_start - self.start
    }

    /// Working portion of the window.
    #[inline]
    pub fn work_duration(&self) -> TimeDelta {
        self.end - self.work_start
    }

    /// Whole window, lead time included.
    #[inline]
    pub fn span(&self) -> TimeDelta {
        self.end - self.start
    }
}

/// Derived financials of a task.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRollup {
    /// Cost of resources assigned directly to this task.
    pub resource_cost: f64,
    /// Own resource cost plus all descendants' total cost.
    pub total_cost: f64,
    /// Billed rate minus total cost.
    pub profit: f64,
    /// Profit as a percentage of the billed rate (0 when the rate is 0).
    pub margin: f64,
}

/// A task annotated with its computed window and costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    /// Task identifier.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Working days (calendar days when 24/7).
    pub duration_days: u32,
    /// Daily (or total) hours.
    pub duration_hours: f64,
    /// Lead time in calendar days.
    pub lead_time_days: u32,
    /// Runs around the clock.
    #[serde(rename = "is247")]
    pub is_247: bool,
    /// Billed price.
    pub rate: f64,
    /// Placement relative to the previous sibling.
    pub schedule_mode: ScheduleMode,
    /// Directly assigned resources.
    pub resources: Vec<Resource>,
    /// Presentation-only expansion flag.
    pub is_expanded: bool,
    /// Computed time window.
    #[serde(flatten)]
    pub window: TaskWindow,
    /// Computed financials.
    #[serde(flatten)]
    pub cost: CostRollup,
    /// Scheduled sub-tasks, in input order.
    pub children: Vec<ScheduledTask>,
}

impl ScheduledTask {
    /// Annotates `task` with its computed window, costs, and children.
    pub fn new(
        task: &Task,
        window: TaskWindow,
        cost: CostRollup,
        children: Vec<ScheduledTask>,
    ) -> Self {
        Self {
            id: task.id.clone(),
            name: task.name.clone(),
            duration_days: task.duration_days,
            duration_hours: task.duration_hours,
            lead_time_days: task.lead_time_days,
            is_247: task.is_247,
            rate: task.rate,
            schedule_mode: task.schedule_mode,
            resources: task.resources.clone(),
            is_expanded: task.is_expanded,
            window,
            cost,
            children,
        }
    }

    /// Whether this task has sub-tasks.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Depth-first, pre-order iterator over this task and its descendants.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Finds a task by ID within this subtree.
    pub fn find(&self, id: &str) -> Option<&ScheduledTask> {
        self.iter().find(|t| t.id == id)
    }
}

/// Finds a task by ID anywhere in a scheduled forest.
pub fn find_scheduled<'a>(forest: &'a [ScheduledTask], id: &str) -> Option<&'a ScheduledTask> {
    forest.iter().find_map(|root| root.find(id))
}

/// Pre-order iterator over a scheduled subtree.
pub struct Iter<'a> {
    stack: Vec<&'a ScheduledTask>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a ScheduledTask;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn window() -> TaskWindow {
        TaskWindow {
            start: at(7, 7),
            work_start: at(9, 7),
            end: at(9, 15),
        }
    }

    fn node(id: &str, children: Vec<ScheduledTask>) -> ScheduledTask {
        ScheduledTask::new(&Task::new(id), window(), CostRollup::default(), children)
    }

    #[test]
    fn test_window_durations() {
        let w = window();
        assert_eq!(w.lead_time(), TimeDelta::days(2));
        assert_eq!(w.work_duration(), TimeDelta::hours(8));
        assert_eq!(w.span(), TimeDelta::days(2) + TimeDelta::hours(8));
    }

    #[test]
    fn test_preorder_iteration() {
        let tree = node(
            "root",
            vec![node("a", vec![node("a1", vec![])]), node("b", vec![])],
        );
        let ids: Vec<&str> = tree.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "a", "a1", "b"]);
    }

    #[test]
    fn test_find() {
        let forest = vec![
            node("r1", vec![node("x", vec![])]),
            node("r2", vec![node("y", vec![])]),
        ];
        assert_eq!(find_scheduled(&forest, "y").map(|t| t.id.as_str()), Some("y"));
        assert!(find_scheduled(&forest, "zzz").is_none());
    }

    #[test]
    fn test_serialize_is_flat() {
        let json = serde_json::to_value(node("a", vec![])).unwrap();
        assert_eq!(json["workStart"], "2025-07-09T07:00:00");
        assert_eq!(json["totalCost"], 0.0);
        assert!(json.get("window").is_none());
    }
}
