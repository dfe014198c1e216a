//! Project-level rollup.
//!
//! Aggregates a scheduled forest into headline figures.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Start | Earliest root start |
//! | Finish | Latest root end |
//! | Makespan | Finish − start |
//! | Total cost | Σ root total cost |
//! | Total billed | Σ root rate |
//! | Profit | Total billed − total cost |
//! | Margin | Profit / total billed × 100 (0 when nothing is billed) |
//!
//! Only root rates count toward the billed total: a parent's rate is the
//! price of its whole subtree.

use chrono::{NaiveDateTime, TimeDelta};

use super::cost;
use crate::models::{finite_or_zero, ScheduledTask};

/// Headline figures of a scheduled project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    /// Earliest start across root tasks.
    pub start: Option<NaiveDateTime>,
    /// Latest end across root tasks.
    pub finish: Option<NaiveDateTime>,
    /// Sum of root total costs.
    pub total_cost: f64,
    /// Sum of root rates.
    pub total_billed: f64,
    /// Billed minus cost.
    pub profit: f64,
    /// Profit as a percentage of billed.
    pub margin: f64,
    /// Number of tasks at any depth.
    pub task_count: usize,
    /// Number of tasks with no children.
    pub leaf_count: usize,
}

impl ProjectSummary {
    /// Computes the summary of a scheduled forest.
    pub fn calculate(forest: &[ScheduledTask]) -> Self {
        let start = forest.iter().map(|t| t.window.start).min();
        let finish = forest.iter().map(|t| t.window.end).max();
        let total_cost: f64 = forest.iter().map(|t| t.cost.total_cost).sum();
        let total_billed: f64 = forest.iter().map(|t| finite_or_zero(t.rate)).sum();

        let mut task_count = 0;
        let mut leaf_count = 0;
        for task in forest.iter().flat_map(ScheduledTask::iter) {
            task_count += 1;
            if !task.has_children() {
                leaf_count += 1;
            }
        }

        Self {
            start,
            finish,
            total_cost,
            total_billed,
            profit: total_billed - total_cost,
            margin: cost::margin(total_billed, total_cost),
            task_count,
            leaf_count,
        }
    }

    /// Finish − start; zero for an empty project.
    pub fn makespan(&self) -> TimeDelta {
        match (self.start, self.finish) {
            (Some(start), Some(finish)) => finish - start,
            _ => TimeDelta::zero(),
        }
    }

    /// Whether the project is profitable with at least `min_margin` percent.
    pub fn meets_margin(&self, min_margin: f64) -> bool {
        self.total_billed > 0.0 && self.margin >= min_margin
    }
}
