//! Error types shared by the timing engine, schedulers, and evaluator.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while building graphs, validating assignments, or scheduling.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// The edge relation is not acyclic: topological ordering stopped early.
    #[error("task graph contains a cycle: ordered {ordered} of {total} tasks")]
    Cycle {
        /// Tasks placed in topological order before the queue ran dry.
        ordered: usize,
        /// Total task count.
        total: usize,
    },

    /// An assignment maps a task to a processor outside `[0, processor_count)`.
    #[error("task {task} assigned to processor {processor}, but only {processor_count} processors exist")]
    ProcessorOutOfRange {
        /// Offending task.
        task: usize,
        /// Processor it was mapped to.
        processor: usize,
        /// Number of available processors.
        processor_count: usize,
    },

    /// An assignment does not have exactly one entry per task.
    #[error("assignment covers {actual} tasks, graph has {expected}")]
    AssignmentLength {
        /// Task count of the graph.
        expected: usize,
        /// Entries in the assignment.
        actual: usize,
    },

    /// A task appears more than once while building an assignment.
    #[error("task {task} assigned more than once")]
    DuplicateTask {
        /// Task seen twice.
        task: usize,
    },

    /// A task has no processor while building an assignment.
    #[error("task {task} has no processor assignment")]
    MissingTask {
        /// Task without a processor.
        task: usize,
    },

    /// Scheduling requires at least one processor.
    #[error("processor count must be at least 1")]
    NoProcessors,

    /// Structural problems found while constructing a task graph.
    #[error("invalid task graph: {}", summarize(.0))]
    InvalidGraph(Vec<ValidationError>),

    /// Scheduler or evaluator parameters outside their domain.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ScheduleError {
    /// Whether this error belongs to the invalid-assignment family.
    pub fn is_invalid_assignment(&self) -> bool {
        matches!(
            self,
            ScheduleError::ProcessorOutOfRange { .. }
                | ScheduleError::AssignmentLength { .. }
                | ScheduleError::DuplicateTask { .. }
                | ScheduleError::MissingTask { .. }
        )
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_cycle_message() {
        let err = ScheduleError::Cycle {
            ordered: 1,
            total: 3,
        };
        assert_eq!(
            err.to_string(),
            "task graph contains a cycle: ordered 1 of 3 tasks"
        );
    }

    #[test]
    fn test_invalid_graph_joins_messages() {
        let err = ScheduleError::InvalidGraph(vec![
            ValidationError::new(ValidationErrorKind::InvalidCost, "task 0 has cost -1"),
            ValidationError::new(ValidationErrorKind::UnknownTask, "edge 0 -> 9: unknown task 9"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid task graph: task 0 has cost -1; edge 0 -> 9: unknown task 9"
        );
    }

    #[test]
    fn test_invalid_assignment_family() {
        assert!(ScheduleError::MissingTask { task: 0 }.is_invalid_assignment());
        assert!(ScheduleError::AssignmentLength {
            expected: 2,
            actual: 1
        }
        .is_invalid_assignment());
        assert!(!ScheduleError::NoProcessors.is_invalid_assignment());
        assert!(!ScheduleError::Cycle {
            ordered: 0,
            total: 2
        }
        .is_invalid_assignment());
    }
}
