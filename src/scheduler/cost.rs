//! Cost aggregation.
//!
//! Runs inside the scheduling pass, after a task's children have been
//! scheduled, so every child already carries its own `total_cost`.
//!
//! | Quantity | Definition |
//! |----------|-----------|
//! | Effective hours | `days * hours`, or `hours` when `days == 0` |
//! | Resource cost | Σ `cost_rate * effective hours` over own resources |
//! | Total cost | resource cost + Σ child total cost |
//! | Profit | rate − total cost |
//! | Margin | profit / rate × 100, or 0 when rate ≤ 0 |
//!
//! Negative profit and margin are valid (an over-budget task).

use crate::models::{finite_or_zero, CostRollup, ScheduledTask, Task};

/// Cost of the resources assigned directly to `task`.
pub fn resource_cost(task: &Task) -> f64 {
    let hours = task.effective_hours();
    task.resources.iter().map(|r| r.cost_for(hours)).sum()
}

/// Profit as a percentage of `rate`.
///
/// A non-positive rate yields a zero margin instead of a division by zero.
pub fn margin(rate: f64, total_cost: f64) -> f64 {
    if rate > 0.0 {
        (rate - total_cost) / rate * 100.0
    } else {
        0.0
    }
}

/// Computes a task's financials from its own resources and its already
/// scheduled children.
pub fn rollup(task: &Task, children: &[ScheduledTask]) -> CostRollup {
    let rate = finite_or_zero(task.rate);
    let own = resource_cost(task);
    let total_cost = own + children.iter().map(|c| c.cost.total_cost).sum::<f64>();

    CostRollup {
        resource_cost: own,
        total_cost,
        profit: rate - total_cost,
        margin: margin(rate, total_cost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Resource, TaskWindow};
    use chrono::NaiveDate;

    fn scheduled_child(total_cost: f64) -> ScheduledTask {
        let t = NaiveDate::from_ymd_opt(2025, 7, 7)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap();
        ScheduledTask::new(
            &Task::new("child"),
            TaskWindow {
                start: t,
                work_start: t,
                end: t,
            },
            CostRollup {
                total_cost,
                ..CostRollup::default()
            },
            Vec::new(),
        )
    }

    #[test]
    fn test_resource_cost_multi_day() {
        // 3 days × 8h = 24h; 75/h + 25/h = 100/h → 2400
        let task = Task::new("T")
            .with_duration(3, 8.0)
            .with_resource(Resource::new("a").with_cost_rate(75.0))
            .with_resource(Resource::new("b").with_cost_rate(25.0));
        assert!((resource_cost(&task) - 2400.0).abs() < 1e-9);
    }

    #[test]
    fn test_resource_cost_hours_only() {
        let task = Task::new("T")
            .with_duration(0, 4.0)
            .with_resource(Resource::new("a").with_cost_rate(50.0));
        assert!((resource_cost(&task) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_resource_cost_no_resources() {
        assert_eq!(resource_cost(&Task::new("T").with_duration(5, 8.0)), 0.0);
    }

    #[test]
    fn test_margin_zero_rate() {
        assert_eq!(margin(0.0, 500.0), 0.0);
        assert_eq!(margin(-10.0, 500.0), 0.0);
        assert!((margin(1000.0, 600.0) - 40.0).abs() < 1e-9);
        assert!((margin(1000.0, 1500.0) + 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_rollup_parent_with_children() {
        // Parent's own resource: 1 day × 8h × 90/h = 720
        let parent = Task::new("P")
            .with_rate(5000.0)
            .with_duration(1, 8.0)
            .with_resource(Resource::new("pm").with_cost_rate(90.0));
        let children = vec![scheduled_child(300.0), scheduled_child(700.0)];

        let r = rollup(&parent, &children);
        assert!((r.resource_cost - 720.0).abs() < 1e-9);
        assert!((r.total_cost - 1720.0).abs() < 1e-9);
        assert!((r.profit - 3280.0).abs() < 1e-9);
        assert!((r.margin - 65.6).abs() < 1e-9);
    }

    #[test]
    fn test_rollup_over_budget() {
        let task = Task::new("T")
            .with_rate(100.0)
            .with_duration(0, 2.0)
            .with_resource(Resource::new("a").with_cost_rate(100.0));
        let r = rollup(&task, &[]);
        assert!((r.profit + 100.0).abs() < 1e-9);
        assert!((r.margin + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_rollup_non_finite_rate() {
        let task = Task::new("T").with_rate(f64::NAN);
        let r = rollup(&task, &[scheduled_child(10.0)]);
        assert_eq!(r.margin, 0.0);
        assert!((r.profit + 10.0).abs() < 1e-9);
    }
}
