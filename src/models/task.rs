//! Task and edge models.
//!
//! A task is an indivisible unit of work with a processing time that is
//! identical on every processor. An edge is a data dependency between two
//! tasks, carrying a communication cost paid only when producer and
//! consumer run on different processors.
//!
//! # Reference
//! Topcuoglu et al. (2002), "Performance-Effective and Low-Complexity Task
//! Scheduling for Heterogeneous Computing", Section 2

use serde::{Deserialize, Serialize};

/// A task (DAG node) to be scheduled.
///
/// # Time Representation
/// Costs are in abstract time units. The evaluator's cost model treats
/// one unit as one second when converting to billable hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task index, unique and contiguous in `0..n`.
    #[serde(alias = "task")]
    pub id: usize,
    /// Processing time (> 0).
    pub cost: f64,
}

impl Task {
    /// Creates a new task.
    pub fn new(id: usize, cost: f64) -> Self {
        Self { id, cost }
    }
}

/// A precedence edge `src → dst`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Producer task ID.
    pub src: usize,
    /// Consumer task ID.
    pub dst: usize,
    /// Communication cost (≥ 0), incurred only across processors.
    #[serde(default)]
    pub comm: f64,
}

impl Edge {
    /// Creates a new edge.
    pub fn new(src: usize, dst: usize, comm: f64) -> Self {
        Self { src, dst, comm }
    }

    /// Creates an edge without communication cost.
    pub fn local(src: usize, dst: usize) -> Self {
        Self::new(src, dst, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_legacy_field_name() {
        let task: Task = serde_json::from_str(r#"{"task": 3, "cost": 12.5}"#).unwrap();
        assert_eq!(task, Task::new(3, 12.5));
    }

    #[test]
    fn test_edge_comm_defaults_to_zero() {
        let edge: Edge = serde_json::from_str(r#"{"src": 0, "dst": 1}"#).unwrap();
        assert_eq!(edge, Edge::local(0, 1));
    }
}
