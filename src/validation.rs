//! Input validation for WBS forests.
//!
//! Checks structural integrity of a task forest before it is edited or
//! scheduled. Detects:
//! - Duplicate task IDs anywhere in the forest
//! - Duplicate resource IDs within a single task
//! - Non-finite durations and money values
//!
//! The scheduler does not require validation to pass: it coerces bad
//! numbers to zero. Validation exists so callers can report them.

use crate::models::Task;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tasks share the same ID.
    DuplicateTaskId,
    /// Two resources on the same task share the same ID.
    DuplicateResourceId,
    /// A duration or money field is NaN or infinite.
    NonFiniteValue,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a task forest.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues in
/// depth-first order.
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for task in tasks {
        check_task(task, &mut seen, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_task<'a>(task: &'a Task, seen: &mut HashSet<&'a str>, errors: &mut Vec<ValidationError>) {
    if !seen.insert(task.id.as_str()) {
        errors.push(ValidationError::new(
            ValidationErrorKind::DuplicateTaskId,
            format!("Duplicate task ID: {}", task.id),
        ));
    }

    for (field, value) in [("durationHours", task.duration_hours), ("rate", task.rate)] {
        if !value.is_finite() {
            errors.push(non_finite(&format!("Task '{}'", task.id), field, value));
        }
    }

    let mut resource_ids = HashSet::new();
    for r in &task.resources {
        if !resource_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateResourceId,
                format!("Task '{}' has duplicate resource ID: {}", task.id, r.id),
            ));
        }
        for (field, value) in [("billRate", r.bill_rate), ("costRate", r.cost_rate)] {
            if !value.is_finite() {
                errors.push(non_finite(
                    &format!("Resource '{}' on task '{}'", r.id, task.id),
                    field,
                    value,
                ));
            }
        }
    }

    for child in &task.children {
        check_task(child, seen, errors);
    }
}

fn non_finite(owner: &str, field: &str, value: f64) -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::NonFiniteValue,
        format!("{owner} has non-finite {field}: {value}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Resource;

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::new("1")
                .with_rate(10_000.0)
                .with_child(
                    Task::new("11")
                        .with_duration(2, 8.0)
                        .with_resource(Resource::new("r1").with_cost_rate(75.0))
                        .with_resource(Resource::new("r2").with_cost_rate(90.0)),
                )
                .with_child(Task::new("12").with_duration(0, 4.0)),
            Task::new("2").with_duration(1, 8.0),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_tasks(&sample_tasks()).is_ok());
        assert!(validate_tasks(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_task_id_across_levels() {
        let mut tasks = sample_tasks();
        tasks[1] = Task::new("2").with_child(Task::new("11"));

        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateTaskId);
        assert!(errors[0].message.contains("11"));
    }

    #[test]
    fn test_duplicate_resource_within_task() {
        let tasks = vec![Task::new("1")
            .with_resource(Resource::new("r1"))
            .with_resource(Resource::new("r1"))];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateResourceId));
    }

    #[test]
    fn test_same_resource_on_different_tasks_is_fine() {
        let tasks = vec![
            Task::new("1").with_resource(Resource::new("r1")),
            Task::new("2").with_resource(Resource::new("r1")),
        ];
        assert!(validate_tasks(&tasks).is_ok());
    }

    #[test]
    fn test_non_finite_values() {
        let tasks = vec![Task::new("1")
            .with_duration(1, f64::NAN)
            .with_rate(f64::INFINITY)
            .with_resource(Resource::new("r").with_cost_rate(f64::NEG_INFINITY))];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::NonFiniteValue));
        assert!(errors.iter().any(|e| e.message.contains("costRate")));
    }

    #[test]
    fn test_multiple_errors() {
        let tasks = vec![
            Task::new("a").with_rate(f64::NAN),
            Task::new("a"),
        ];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
