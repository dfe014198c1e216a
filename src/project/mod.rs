//! Editable WBS project.
//!
//! # Responsibility
//! - Own the unscheduled task forest and the resource pool.
//! - Apply structural edits: add, remove, update, reorder, assign.
//! - Hand the scheduler an immutable nested snapshot on demand.
//!
//! # Invariants
//! - Task IDs are unique across the whole project.
//! - Every node has at most one parent; the forest has no cycles.
//! - Reordering only happens between root tasks.
//! - Scheduled output is never cached: call [`Project::schedule`] after
//!   every edit.
//!
//! # Representation
//! The forest is an arena keyed by task ID. Each node stores its own task
//! fields, its parent, and its ordered child IDs, so removal and reordering
//! never deep-copy subtrees.

mod pool;

pub use pool::ResourcePool;

use chrono::NaiveDate;
use log::debug;
use std::collections::{HashMap, HashSet};

use crate::error::{ProjectError, ProjectResult};
use crate::models::{Resource, ScheduleMode, ScheduledTask, Task};
use crate::scheduler::Scheduler;
use crate::validation::{validate_tasks, ValidationResult};

/// A single-field edit applied by [`Project::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum TaskUpdate {
    /// Display label.
    Name(String),
    /// Working (or calendar, when 24/7) days.
    DurationDays(u32),
    /// Daily or total hours.
    DurationHours(f64),
    /// Lead time in calendar days.
    LeadTimeDays(u32),
    /// Around-the-clock flag.
    Is247(bool),
    /// Billed rate.
    Rate(f64),
    /// Sibling placement mode.
    ScheduleMode(ScheduleMode),
    /// Presentation-only expansion flag.
    Expanded(bool),
    /// Replaces the assigned resources.
    Resources(Vec<Resource>),
}

impl TaskUpdate {
    fn field(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::DurationDays(_) => "duration_days",
            Self::DurationHours(_) => "duration_hours",
            Self::LeadTimeDays(_) => "lead_time_days",
            Self::Is247(_) => "is_247",
            Self::Rate(_) => "rate",
            Self::ScheduleMode(_) => "schedule_mode",
            Self::Expanded(_) => "is_expanded",
            Self::Resources(_) => "resources",
        }
    }

    fn apply(self, task: &mut Task) {
        match self {
            Self::Name(v) => task.name = v,
            Self::DurationDays(v) => task.duration_days = v,
            Self::DurationHours(v) => task.duration_hours = v,
            Self::LeadTimeDays(v) => task.lead_time_days = v,
            Self::Is247(v) => task.is_247 = v,
            Self::Rate(v) => task.rate = v,
            Self::ScheduleMode(v) => task.schedule_mode = v,
            Self::Expanded(v) => task.is_expanded = v,
            Self::Resources(v) => task.resources = v,
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    // `task.children` is always empty; structure lives in `children`.
    task: Task,
    parent: Option<String>,
    children: Vec<String>,
}

/// An editable WBS forest with its resource pool and start date.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use wbs_schedule::models::{Resource, Task};
/// use wbs_schedule::project::Project;
/// use wbs_schedule::scheduler::Scheduler;
///
/// let mut project = Project::new("Warehouse", NaiveDate::from_ymd_opt(2025, 7, 9).unwrap());
/// let crane = Resource::new("crane").with_name("Crane").with_cost_rate(180.0);
/// project.pool_mut().add(crane).unwrap();
/// project.add_root(Task::new("phase-1").with_rate(25_000.0)).unwrap();
/// project.add_child("phase-1", Task::new("lift").with_duration(1, 8.0)).unwrap();
/// project.assign_resource("lift", "crane").unwrap();
///
/// let scheduled = project.schedule(&Scheduler::new());
/// assert_eq!(scheduled[0].cost.total_cost, 1440.0);
/// ```
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    start_date: NaiveDate,
    roots: Vec<String>,
    nodes: HashMap<String, Node>,
    pool: ResourcePool,
    assignment_seq: u64,
}

impl Project {
    /// Creates an empty project starting on `start_date`.
    pub fn new(name: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start_date,
            roots: Vec::new(),
            nodes: HashMap::new(),
            pool: ResourcePool::new(),
            assignment_seq: 0,
        }
    }

    /// Creates a project from an existing forest.
    ///
    /// # Errors
    /// `DuplicateTaskId` if any ID appears twice.
    pub fn from_tasks(
        name: impl Into<String>,
        start_date: NaiveDate,
        tasks: Vec<Task>,
    ) -> ProjectResult<Self> {
        let mut project = Self::new(name, start_date);
        for task in tasks {
            project.add_root(task)?;
        }
        Ok(project)
    }

    /// Project name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Day on which scheduling starts.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Changes the start day.
    pub fn set_start_date(&mut self, start_date: NaiveDate) {
        debug!("event=project_start_changed date={start_date}");
        self.start_date = start_date;
    }

    /// The resource pool.
    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    /// Mutable access to the resource pool.
    pub fn pool_mut(&mut self) -> &mut ResourcePool {
        &mut self.pool
    }

    /// Number of tasks at any depth.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the project has no tasks.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether a task with this ID exists.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Root task IDs in order.
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Child IDs of a task, in order.
    pub fn children_of(&self, id: &str) -> Option<&[String]> {
        self.nodes.get(id).map(|n| n.children.as_slice())
    }

    /// Parent ID of a task; `None` for roots and unknown IDs.
    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.parent.as_deref())
    }

    /// A task's own fields (its `children` list is empty).
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.nodes.get(id).map(|n| &n.task)
    }

    /// Appends a task (and any children it carries) as the last root.
    ///
    /// # Errors
    /// `DuplicateTaskId` if any ID in the subtree already exists.
    pub fn add_root(&mut self, task: Task) -> ProjectResult<()> {
        self.ensure_ids_free(&task)?;
        debug!("event=task_added id={} parent=none", task.id);
        let id = self.insert_subtree(task, None);
        self.roots.push(id);
        Ok(())
    }

    /// Appends a task (and any children it carries) under `parent_id`.
    ///
    /// # Errors
    /// - `ParentNotFound` if `parent_id` does not exist.
    /// - `DuplicateTaskId` if any ID in the subtree already exists.
    pub fn add_child(&mut self, parent_id: &str, task: Task) -> ProjectResult<()> {
        if !self.nodes.contains_key(parent_id) {
            return Err(ProjectError::ParentNotFound(parent_id.to_string()));
        }
        self.ensure_ids_free(&task)?;
        debug!("event=task_added id={} parent={}", task.id, parent_id);
        let id = self.insert_subtree(task, Some(parent_id.to_string()));
        if let Some(parent) = self.nodes.get_mut(parent_id) {
            parent.children.push(id);
        }
        Ok(())
    }

    /// Removes a task and its entire subtree.
    ///
    /// Returns the removed subtree as a nested task.
    pub fn remove(&mut self, id: &str) -> ProjectResult<Task> {
        let removed = self
            .build(id)
            .ok_or_else(|| ProjectError::TaskNotFound(id.to_string()))?;

        match self.nodes.get(id).and_then(|n| n.parent.clone()) {
            Some(parent_id) => {
                if let Some(parent) = self.nodes.get_mut(&parent_id) {
                    parent.children.retain(|c| c != id);
                }
            }
            None => self.roots.retain(|r| r != id),
        }

        let mut ids = Vec::new();
        collect_ids(&removed, &mut ids);
        for removed_id in &ids {
            self.nodes.remove(*removed_id);
        }
        debug!("event=task_removed id={} subtree_len={}", id, ids.len());
        Ok(removed)
    }

    /// Applies a single-field edit.
    pub fn update(&mut self, id: &str, update: TaskUpdate) -> ProjectResult<()> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| ProjectError::TaskNotFound(id.to_string()))?;
        debug!("event=task_updated id={} field={}", id, update.field());
        update.apply(&mut node.task);
        Ok(())
    }

    /// Moves root `id` before root `before`.
    ///
    /// With `None`, or a `before` that is not a root, `id` moves to the end.
    /// Moving a task before itself leaves the order unchanged.
    ///
    /// # Errors
    /// - `TaskNotFound` if `id` does not exist.
    /// - `NotARoot` if `id` is not a root task.
    pub fn move_before(&mut self, id: &str, before: Option<&str>) -> ProjectResult<()> {
        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| ProjectError::TaskNotFound(id.to_string()))?;
        if node.parent.is_some() {
            return Err(ProjectError::NotARoot(id.to_string()));
        }
        if before == Some(id) {
            return Ok(());
        }

        self.roots.retain(|r| r != id);
        let target = before.and_then(|b| self.roots.iter().position(|r| r == b));
        match target {
            Some(index) => self.roots.insert(index, id.to_string()),
            None => self.roots.push(id.to_string()),
        }
        debug!(
            "event=task_moved id={} before={}",
            id,
            before.unwrap_or("end")
        );
        Ok(())
    }

    /// Copies a pool resource onto a task under a fresh ID.
    ///
    /// Returns the ID of the new copy.
    ///
    /// # Errors
    /// - `TaskNotFound` if the task does not exist.
    /// - `ResourceNotFound` if the pool has no such resource.
    /// - `ResourceAlreadyAssigned` if the task already has a resource of that
    ///   name.
    pub fn assign_resource(
        &mut self,
        task_id: &str,
        pool_resource_id: &str,
    ) -> ProjectResult<String> {
        let template = self
            .pool
            .get(pool_resource_id)
            .cloned()
            .ok_or_else(|| ProjectError::ResourceNotFound(pool_resource_id.to_string()))?;
        let node = self
            .nodes
            .get_mut(task_id)
            .ok_or_else(|| ProjectError::TaskNotFound(task_id.to_string()))?;
        if node.task.resources.iter().any(|r| r.name == template.name) {
            return Err(ProjectError::ResourceAlreadyAssigned {
                task_id: task_id.to_string(),
                name: template.name,
            });
        }

        self.assignment_seq += 1;
        let copy_id = format!("{}:{}#{}", task_id, template.id, self.assignment_seq);
        node.task.resources.push(template.copy_as(copy_id.clone()));
        debug!(
            "event=resource_assigned task={} pool_resource={} copy={}",
            task_id, pool_resource_id, copy_id
        );
        Ok(copy_id)
    }

    /// Removes an assigned resource from a task.
    pub fn unassign_resource(
        &mut self,
        task_id: &str,
        resource_id: &str,
    ) -> ProjectResult<Resource> {
        let node = self
            .nodes
            .get_mut(task_id)
            .ok_or_else(|| ProjectError::TaskNotFound(task_id.to_string()))?;
        let index = node
            .task
            .resources
            .iter()
            .position(|r| r.id == resource_id)
            .ok_or_else(|| ProjectError::ResourceNotFound(resource_id.to_string()))?;
        debug!("event=resource_unassigned task={task_id} resource={resource_id}");
        Ok(node.task.resources.remove(index))
    }

    /// Nested copy of the forest, in order.
    pub fn snapshot(&self) -> Vec<Task> {
        self.roots.iter().filter_map(|id| self.build(id)).collect()
    }

    /// Checks the current forest for bad numbers and duplicate IDs.
    pub fn validate(&self) -> ValidationResult {
        validate_tasks(&self.snapshot())
    }

    /// Schedules a fresh snapshot from the project start date.
    pub fn schedule(&self, scheduler: &Scheduler) -> Vec<ScheduledTask> {
        let anchor = scheduler.project_anchor(self.start_date);
        scheduler.schedule(&self.snapshot(), anchor)
    }

    fn build(&self, id: &str) -> Option<Task> {
        let node = self.nodes.get(id)?;
        let mut task = node.task.clone();
        task.children = node.children.iter().filter_map(|c| self.build(c)).collect();
        Some(task)
    }

    fn ensure_ids_free(&self, task: &Task) -> ProjectResult<()> {
        let mut ids = Vec::new();
        collect_ids(task, &mut ids);
        let mut seen = HashSet::new();
        for id in ids {
            if self.nodes.contains_key(id) || !seen.insert(id) {
                return Err(ProjectError::DuplicateTaskId(id.to_string()));
            }
        }
        Ok(())
    }

    fn insert_subtree(&mut self, mut task: Task, parent: Option<String>) -> String {
        let children = std::mem::take(&mut task.children);
        let id = task.id.clone();
        self.nodes.insert(
            id.clone(),
            Node {
                task,
                parent,
                children: Vec::with_capacity(children.len()),
            },
        );
        for child in children {
            let child_id = self.insert_subtree(child, Some(id.clone()));
            if let Some(node) = self.nodes.get_mut(&id) {
                node.children.push(child_id);
            }
        }
        id
    }
}

fn collect_ids<'a>(task: &'a Task, out: &mut Vec<&'a str>) {
    out.push(task.id.as_str());
    for child in &task.children {
        collect_ids(child, out);
    }
}
