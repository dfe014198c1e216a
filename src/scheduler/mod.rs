//! WBS scheduling engine and cost rollup.
//!
//! # Algorithm
//!
//! [`Scheduler`] walks the task forest top-down in a single pass. Each
//! sibling list is folded left to right; every task's start is derived from
//! the previous siblings, its children are scheduled from its work start,
//! and its costs are rolled up once the children are done.
//!
//! The pass is pure: no I/O, no shared state, no incremental updates. Any
//! change to the forest or the project start means scheduling again.
//!
//! # Summary
//!
//! [`ProjectSummary`] aggregates a scheduled forest into project totals.

pub mod cost;
mod engine;
mod summary;

pub use engine::{schedule, Scheduler, SiblingCursor};
pub use summary::ProjectSummary;
