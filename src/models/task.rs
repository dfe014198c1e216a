//! Task (WBS node) model.
//!
//! A task is one node of a work-breakdown structure. Leaf tasks carry
//! durations; parent tasks derive their span from their children. The order
//! of `children` is significant: it is the order in which siblings are
//! scheduled.
//!
//! # Durations
//! - `duration_days` working days (or calendar days for 24/7 tasks), with
//!   `duration_hours` of work on the final day.
//! - When `duration_days == 0`, `duration_hours` is the whole task.
//! - `lead_time_days` calendar days pass between the task's slot opening and
//!   work actually starting.

use serde::{Deserialize, Deserializer, Serialize};

use super::{lenient, Resource};

/// How a task is placed relative to the sibling directly above it.
///
/// Any label other than `"concurrent"` deserializes as sequential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleMode {
    /// Starts when the previous sequential sibling ends.
    #[default]
    Sequential,
    /// Starts together with the sibling directly above it.
    Concurrent,
}

impl<'de> Deserialize<'de> for ScheduleMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match lenient::label(deserializer)?.as_deref() {
            Some("concurrent") => ScheduleMode::Concurrent,
            _ => ScheduleMode::Sequential,
        })
    }
}

/// A node of the work-breakdown structure.
///
/// Deserialization is lenient: numeric fields accept numeric strings and
/// fall back to zero for anything unparsable (see the `lenient` module).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique, stable identifier.
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    /// Display label.
    #[serde(default)]
    pub name: String,
    /// Working days occupied (calendar days when `is_247`).
    #[serde(default, deserialize_with = "lenient::count")]
    pub duration_days: u32,
    /// Hours of work per day, or in total when `duration_days == 0`.
    #[serde(default, deserialize_with = "lenient::number")]
    pub duration_hours: f64,
    /// Calendar days between the slot opening and work commencing.
    #[serde(default, deserialize_with = "lenient::count")]
    pub lead_time_days: u32,
    /// Runs around the clock, ignoring the workday calendar.
    #[serde(default, rename = "is247", deserialize_with = "lenient::flag")]
    pub is_247: bool,
    /// Billed price of this task.
    #[serde(default, deserialize_with = "lenient::number")]
    pub rate: f64,
    /// Placement relative to the previous sibling.
    #[serde(default)]
    pub schedule_mode: ScheduleMode,
    /// Sub-tasks, in scheduling order.
    #[serde(default)]
    pub children: Vec<Task>,
    /// Resources assigned directly to this task.
    #[serde(default)]
    pub resources: Vec<Resource>,
    /// Presentation-only expansion flag.
    #[serde(default = "default_expanded", deserialize_with = "lenient::flag_or_true")]
    pub is_expanded: bool,
}

fn default_expanded() -> bool {
    true
}

impl Task {
    /// Creates a sequential task with no duration.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            duration_days: 0,
            duration_hours: 0.0,
            lead_time_days: 0,
            is_247: false,
            rate: 0.0,
            schedule_mode: ScheduleMode::Sequential,
            children: Vec::new(),
            resources: Vec::new(),
            is_expanded: true,
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets days and hours of work.
    pub fn with_duration(mut self, days: u32, hours: f64) -> Self {
        self.duration_days = days;
        self.duration_hours = hours;
        self
    }

    /// Sets the lead time in calendar days.
    pub fn with_lead_time(mut self, days: u32) -> Self {
        self.lead_time_days = days;
        self
    }

    /// Marks the task as running around the clock.
    pub fn around_the_clock(mut self) -> Self {
        self.is_247 = true;
        self
    }

    /// Sets the billed rate.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Sets the schedule mode.
    pub fn with_mode(mut self, mode: ScheduleMode) -> Self {
        self.schedule_mode = mode;
        self
    }

    /// Shorthand for `with_mode(ScheduleMode::Concurrent)`.
    pub fn concurrent(self) -> Self {
        self.with_mode(ScheduleMode::Concurrent)
    }

    /// Appends a child task.
    pub fn with_child(mut self, child: Task) -> Self {
        self.children.push(child);
        self
    }

    /// Assigns a resource.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Sets the expansion flag.
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.is_expanded = expanded;
        self
    }

    /// Whether this task has sub-tasks.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether this task runs concurrently with its previous sibling.
    pub fn is_concurrent(&self) -> bool {
        self.schedule_mode == ScheduleMode::Concurrent
    }

    /// `duration_hours`, with negative and non-finite values read as zero.
    pub fn work_hours(&self) -> f64 {
        lenient::finite_or_zero(self.duration_hours).max(0.0)
    }

    /// Hours of labor billed against this task's own resources.
    ///
    /// `duration_days * duration_hours`, or `duration_hours` alone for
    /// tasks with no whole days.
    pub fn effective_hours(&self) -> f64 {
        let hours = self.work_hours();
        if self.duration_days > 0 {
            f64::from(self.duration_days) * hours
        } else {
            hours
        }
    }

    /// Number of tasks in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Task::subtree_len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new("T1")
            .with_name("Site Survey")
            .with_duration(3, 8.0)
            .with_lead_time(2)
            .with_rate(1500.0)
            .concurrent()
            .with_expanded(false)
            .with_resource(Resource::new("R1").with_cost_rate(75.0));

        assert_eq!(task.id, "T1");
        assert_eq!(task.name, "Site Survey");
        assert_eq!(task.duration_days, 3);
        assert_eq!(task.lead_time_days, 2);
        assert!(task.is_concurrent());
        assert!(!task.is_247);
        assert!(!task.is_expanded);
        assert_eq!(task.resources.len(), 1);
    }

    #[test]
    fn test_effective_hours() {
        assert!((Task::new("a").with_duration(3, 8.0).effective_hours() - 24.0).abs() < 1e-10);
        assert!((Task::new("b").with_duration(0, 5.5).effective_hours() - 5.5).abs() < 1e-10);
        assert_eq!(Task::new("c").with_duration(0, f64::NAN).effective_hours(), 0.0);
        assert_eq!(Task::new("d").with_duration(2, -3.0).effective_hours(), 0.0);
    }

    #[test]
    fn test_subtree_len() {
        let tree = Task::new("root")
            .with_child(Task::new("a").with_child(Task::new("a1")))
            .with_child(Task::new("b"));
        assert_eq!(tree.subtree_len(), 4);
        assert!(tree.has_children());
    }

    #[test]
    fn test_deserialize_editor_json() {
        let json = r#"{
            "id": 12,
            "name": "Permit Application",
            "durationDays": "3",
            "durationHours": 8,
            "leadTimeDays": "",
            "is247": false,
            "rate": "10000",
            "scheduleMode": "concurrent",
            "children": [],
            "resources": [{"id": 105, "name": "Legal Team", "rate": 300, "cost": 220}]
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "12");
        assert_eq!(task.duration_days, 3);
        assert_eq!(task.lead_time_days, 0);
        assert!((task.rate - 10_000.0).abs() < 1e-10);
        assert_eq!(task.schedule_mode, ScheduleMode::Concurrent);
        assert!(task.is_expanded);
        assert_eq!(task.resources[0].id, "105");
    }

    #[test]
    fn test_deserialize_minimal() {
        let task: Task = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert_eq!(task.schedule_mode, ScheduleMode::Sequential);
        assert_eq!(task.duration_hours, 0.0);
        assert!(task.children.is_empty());
    }

    #[test]
    fn test_unknown_mode_is_sequential() {
        let task: Task =
            serde_json::from_str(r#"{"id": "x", "scheduleMode": "parallel"}"#).unwrap();
        assert_eq!(task.schedule_mode, ScheduleMode::Sequential);
        let task: Task = serde_json::from_str(r#"{"id": "x", "scheduleMode": 3}"#).unwrap();
        assert_eq!(task.schedule_mode, ScheduleMode::Sequential);
        let task: Task =
            serde_json::from_str(r#"{"id": "x", "scheduleMode": " Concurrent"}"#).unwrap();
        assert_eq!(task.schedule_mode, ScheduleMode::Concurrent);
    }

    #[test]
    fn test_serialize_uses_editor_keys() {
        let json = serde_json::to_value(Task::new("a").around_the_clock()).unwrap();
        assert_eq!(json["is247"], true);
        assert_eq!(json["scheduleMode"], "sequential");
        assert!(json.get("durationDays").is_some());
    }

    #[test]
    fn test_stringly_flags() {
        let json = r#"{"id": "x", "is247": "true", "isExpanded": 0}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.is_247);
        assert!(!task.is_expanded);

        let json = r#"{"id": "y", "is247": 1, "isExpanded": "garbage"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.is_247);
        assert!(task.is_expanded);
    }
}
