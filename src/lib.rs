//! Work-breakdown-structure scheduling and cost rollup.
//!
//! Takes a forest of tasks (each with durations, a schedule mode, lead
//! time, a 24/7 flag, a billed rate, and assigned resources) plus a project
//! start date, and derives when every task starts, when its work begins,
//! and when it ends, along with cost, profit, and margin rolled up the tree.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Resource`, `ScheduledTask`,
//!   `WorkCalendar`
//! - **`scheduler`**: The scheduling engine, cost aggregation, and project
//!   summary
//! - **`project`**: Editable project arena and resource pool
//! - **`timeline`**: Gantt row flattening, chart window, month headers, bars
//! - **`validation`**: Input integrity checks (duplicate IDs, bad numbers)
//! - **`config`**: TOML-loadable scheduler settings
//! - **`error`**: Error types for edits and config loading
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use wbs_schedule::models::Task;
//! use wbs_schedule::scheduler::{ProjectSummary, Scheduler};
//!
//! let tasks = vec![
//!     Task::new("design").with_duration(2, 8.0).with_rate(4000.0),
//!     Task::new("build").with_duration(3, 8.0),
//! ];
//! let scheduler = Scheduler::new();
//! let anchor = scheduler.project_anchor(NaiveDate::from_ymd_opt(2025, 7, 7).unwrap());
//! let scheduled = scheduler.schedule(&tasks, anchor);
//!
//! assert!(scheduled[1].window.start >= scheduled[0].window.end);
//! let summary = ProjectSummary::calculate(&scheduled);
//! assert_eq!(summary.task_count, 2);
//! ```
//!
//! # Logging
//!
//! The crate logs through the `log` facade and never installs a logger.

pub mod config;
pub mod error;
pub mod models;
pub mod project;
pub mod scheduler;
pub mod timeline;
pub mod validation;

pub use config::SchedulerConfig;
pub use error::{ConfigError, ProjectError, ProjectResult};
pub use project::{Project, ResourcePool, TaskUpdate};
pub use scheduler::{schedule, ProjectSummary, Scheduler};
