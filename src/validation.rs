//! Input validation for task graphs.
//!
//! Checks structural integrity of tasks and edges before scheduling.
//! Detects:
//! - Duplicate or non-contiguous task IDs
//! - Non-positive or non-finite task costs
//! - Negative or non-finite communication costs
//! - Edges referencing unknown tasks, and duplicate edges
//! - Circular precedence dependencies (DAG validation)
//!
//! [`TaskGraph::new`](crate::models::TaskGraph::new) runs the structural
//! checks only. Cycles are left to the timing computation, which reports
//! them as [`ScheduleError::Cycle`](crate::ScheduleError::Cycle).
//!
//! # Reference
//! Kahn (1962), "Topological sorting of large networks"

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::models::{Edge, Task};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Two tasks share the same ID.
    DuplicateId,
    /// Task IDs do not form the contiguous range `0..n`.
    NonContiguousId,
    /// A task cost is zero, negative, or not finite.
    InvalidCost,
    /// A communication cost is negative or not finite.
    InvalidCommCost,
    /// An edge references a task that doesn't exist.
    UnknownTask,
    /// The same `(src, dst)` pair appears twice.
    DuplicateEdge,
    /// Precedence graph contains a cycle.
    CyclicDependency,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates tasks and edges without looking for cycles.
///
/// Checks:
/// 1. No duplicate task IDs
/// 2. Task IDs cover `0..n` exactly
/// 3. Every task cost is finite and strictly positive
/// 4. Every communication cost is finite and non-negative
/// 5. Every edge endpoint names an existing task
/// 6. No `(src, dst)` pair appears twice
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_structure(tasks: &[Task], edges: &[Edge]) -> ValidationResult {
    let mut errors = Vec::new();
    let n = tasks.len();

    let mut task_ids = HashSet::new();
    for task in tasks {
        if !task_ids.insert(task.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }
        if task.id >= n {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonContiguousId,
                format!("Task ID {} outside 0..{n}", task.id),
            ));
        }
        if !task.cost.is_finite() || task.cost <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCost,
                format!("Task {} has cost {}", task.id, task.cost),
            ));
        }
    }

    let mut seen_edges = HashSet::new();
    for edge in edges {
        for endpoint in [edge.src, edge.dst] {
            if !task_ids.contains(&endpoint) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownTask,
                    format!(
                        "Edge {} -> {} references unknown task {endpoint}",
                        edge.src, edge.dst
                    ),
                ));
            }
        }
        if !edge.comm.is_finite() || edge.comm < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCommCost,
                format!(
                    "Edge {} -> {} has communication cost {}",
                    edge.src, edge.dst, edge.comm
                ),
            ));
        }
        if !seen_edges.insert((edge.src, edge.dst)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateEdge,
                format!("Duplicate edge {} -> {}", edge.src, edge.dst),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates tasks and edges, including acyclicity.
///
/// Cycle detection only runs when the structural checks pass, since it
/// needs every edge endpoint to be an index into the task list.
pub fn validate_graph(tasks: &[Task], edges: &[Edge]) -> ValidationResult {
    validate_structure(tasks, edges)?;
    match detect_cycle(tasks.len(), edges) {
        Some(err) => Err(vec![err]),
        None => Ok(()),
    }
}

/// Detects cycles by running Kahn's algorithm and counting ordered nodes.
fn detect_cycle(n: usize, edges: &[Edge]) -> Option<ValidationError> {
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut in_degree = vec![0usize; n];
    for edge in edges {
        successors[edge.src].push(edge.dst);
        in_degree[edge.dst] += 1;
    }

    let mut queue: VecDeque<usize> = (0..n).filter(|&t| in_degree[t] == 0).collect();
    let mut ordered = 0;
    while let Some(task) = queue.pop_front() {
        ordered += 1;
        for &next in &successors[task] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    if ordered == n {
        return None;
    }
    let stuck: Vec<String> = (0..n)
        .filter(|&t| in_degree[t] > 0)
        .map(|t| t.to_string())
        .collect();
    Some(ValidationError::new(
        ValidationErrorKind::CyclicDependency,
        format!(
            "Circular dependency detected involving tasks [{}]",
            stuck.join(", ")
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tasks() -> Vec<Task> {
        vec![Task::new(0, 10.0), Task::new(1, 20.0), Task::new(2, 5.0)]
    }

    fn sample_edges() -> Vec<Edge> {
        vec![Edge::new(0, 1, 2.0), Edge::new(0, 2, 3.0), Edge::new(1, 2, 0.0)]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_structure(&sample_tasks(), &sample_edges()).is_ok());
        assert!(validate_graph(&sample_tasks(), &sample_edges()).is_ok());
    }

    #[test]
    fn test_empty_input() {
        assert!(validate_graph(&[], &[]).is_ok());
    }

    #[test]
    fn test_duplicate_task_id() {
        let tasks = vec![Task::new(0, 1.0), Task::new(0, 2.0)];
        let errs = validate_structure(&tasks, &[]).unwrap_err();
        assert!(errs
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_non_contiguous_id() {
        let tasks = vec![Task::new(0, 1.0), Task::new(5, 2.0)];
        let errs = validate_structure(&tasks, &[]).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].kind, ValidationErrorKind::NonContiguousId);
    }

    #[test]
    fn test_invalid_costs() {
        let tasks = vec![
            Task::new(0, 0.0),
            Task::new(1, -3.0),
            Task::new(2, f64::NAN),
        ];
        let errs = validate_structure(&tasks, &[]).unwrap_err();
        assert_eq!(errs.len(), 3);
        assert!(errs
            .iter()
            .all(|e| e.kind == ValidationErrorKind::InvalidCost));
    }

    #[test]
    fn test_invalid_comm_cost() {
        let edges = vec![Edge::new(0, 1, -1.0)];
        let errs = validate_structure(&sample_tasks(), &edges).unwrap_err();
        assert_eq!(errs[0].kind, ValidationErrorKind::InvalidCommCost);
    }

    #[test]
    fn test_unknown_endpoint() {
        let edges = vec![Edge::new(0, 7, 1.0)];
        let errs = validate_structure(&sample_tasks(), &edges).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].kind, ValidationErrorKind::UnknownTask);
        assert!(errs[0].message.contains('7'));
    }

    #[test]
    fn test_duplicate_edge() {
        let edges = vec![Edge::new(0, 1, 1.0), Edge::new(0, 1, 4.0)];
        let errs = validate_structure(&sample_tasks(), &edges).unwrap_err();
        assert_eq!(errs[0].kind, ValidationErrorKind::DuplicateEdge);
    }

    #[test]
    fn test_cycle_detected() {
        let tasks = vec![Task::new(0, 1.0), Task::new(1, 1.0), Task::new(2, 1.0)];
        let edges = vec![Edge::new(0, 1, 0.0), Edge::new(1, 2, 0.0), Edge::new(2, 1, 0.0)];
        assert!(validate_structure(&tasks, &edges).is_ok());

        let errs = validate_graph(&tasks, &edges).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].kind, ValidationErrorKind::CyclicDependency);
        assert!(errs[0].message.contains("1, 2"));
    }

    #[test]
    fn test_self_loop_is_cycle() {
        let tasks = vec![Task::new(0, 1.0)];
        let edges = vec![Edge::new(0, 0, 0.0)];
        let errs = validate_graph(&tasks, &edges).unwrap_err();
        assert_eq!(errs[0].kind, ValidationErrorKind::CyclicDependency);
    }

    #[test]
    fn test_multiple_errors_collected() {
        let tasks = vec![Task::new(0, -1.0), Task::new(0, 1.0)];
        let edges = vec![Edge::new(0, 3, 1.0)];
        let errs = validate_structure(&tasks, &edges).unwrap_err();
        assert!(errs.len() >= 3);
    }
}
