//! Timing engine: start/finish times of a fixed assignment.
//!
//! # Execution Model
//!
//! - One FIFO queue per processor, non-preemptive.
//! - Tasks are visited in topological order; each one joins the queue of its
//!   assigned processor. The per-processor execution order is therefore the
//!   topological order restricted to that processor. No insertion into
//!   earlier idle gaps.
//! - A task is ready once every predecessor has finished, plus the edge's
//!   communication cost when the predecessor ran on another processor.
//!
//! ```text
//! ready(t)  = max over pred ( AFT[pred] + (comm(pred, t) if proc(pred) ≠ proc(t) else 0) )
//! AST(t)    = max(available[proc(t)], ready(t))
//! AFT(t)    = AST(t) + cost(t)
//! ```
//!
//! # Example
//! ```
//! use dag_schedule::models::{Assignment, Edge, TaskGraph};
//! use dag_schedule::timing::compute_timing;
//!
//! let graph = TaskGraph::from_costs(&[5.0, 5.0], vec![Edge::new(0, 1, 3.0)]).unwrap();
//! let split = compute_timing(&graph, &Assignment::new(vec![0, 1]), 2).unwrap();
//! assert_eq!(split.makespan(), 13.0);
//! let local = compute_timing(&graph, &Assignment::new(vec![0, 0]), 2).unwrap();
//! assert_eq!(local.makespan(), 10.0);
//! ```

use crate::error::{Result, ScheduleError};
use crate::models::{Assignment, TaskGraph, Timing};

/// Computes timings for many assignments over one graph.
///
/// The topological order is computed once in [`TimingEngine::new`], so a
/// cyclic graph is rejected before any assignment is looked at. The GA
/// fitness function reuses one engine for the whole run.
#[derive(Debug, Clone)]
pub struct TimingEngine<'a> {
    graph: &'a TaskGraph,
    order: Vec<usize>,
}

impl<'a> TimingEngine<'a> {
    /// Prepares an engine for `graph`.
    ///
    /// # Errors
    /// [`ScheduleError::Cycle`] if the graph is not acyclic.
    pub fn new(graph: &'a TaskGraph) -> Result<Self> {
        let order = graph.topological_order()?;
        Ok(Self { graph, order })
    }

    /// The graph this engine evaluates.
    pub fn graph(&self) -> &'a TaskGraph {
        self.graph
    }

    /// Topological order used for traversal.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Computes AST/AFT for every task under `assignment`.
    ///
    /// # Errors
    /// Invalid-assignment errors from [`Assignment::validate`].
    pub fn compute(&self, assignment: &Assignment, processor_count: usize) -> Result<Timing> {
        assignment.validate(self.graph.len(), processor_count)?;

        let mut available = vec![0.0_f64; processor_count];
        let mut timing = Timing::zeroed(self.graph.len());
        let placement = assignment.as_slice();

        for &task in &self.order {
            let processor = placement[task];
            let ready = ready_time(self.graph, task, processor, placement, &timing.finish);
            let start = available[processor].max(ready);
            let finish = start + self.graph.cost(task);
            timing.start[task] = start;
            timing.finish[task] = finish;
            available[processor] = finish;
        }

        Ok(timing)
    }

    /// Makespan of `assignment` (max AFT).
    pub fn makespan(&self, assignment: &Assignment, processor_count: usize) -> Result<f64> {
        Ok(self.compute(assignment, processor_count)?.makespan())
    }

    /// Longest path through the DAG under `assignment`, counting each task's
    /// cost and each edge's communication cost only when its endpoints sit
    /// on different processors. Ignores processor contention, so it is a
    /// lower bound on the makespan of the same assignment.
    ///
    /// # Errors
    /// [`ScheduleError::AssignmentLength`] if the assignment does not cover
    /// every task.
    pub fn critical_path_length(&self, assignment: &Assignment) -> Result<f64> {
        if assignment.len() != self.graph.len() {
            return Err(ScheduleError::AssignmentLength {
                expected: self.graph.len(),
                actual: assignment.len(),
            });
        }

        let placement = assignment.as_slice();
        let mut longest = vec![0.0_f64; self.graph.len()];
        for &task in &self.order {
            let ready = ready_time(self.graph, task, placement[task], placement, &longest);
            longest[task] = ready + self.graph.cost(task);
        }
        Ok(longest.into_iter().fold(0.0, f64::max))
    }
}

/// Computes AST/AFT for `assignment` on `graph` with `processor_count` processors.
///
/// Pure; builds a fresh [`TimingEngine`] per call.
///
/// # Errors
/// - [`ScheduleError::Cycle`] if the graph is cyclic
/// - invalid-assignment errors if the assignment is malformed
pub fn compute_timing(
    graph: &TaskGraph,
    assignment: &Assignment,
    processor_count: usize,
) -> Result<Timing> {
    TimingEngine::new(graph)?.compute(assignment, processor_count)
}

/// Time at which `task` could start on `processor` given its predecessors'
/// placement and finish times.
///
/// `placement[pred]` and `finish[pred]` must already be committed for every
/// predecessor of `task`. Returns `0.0` for entry tasks.
pub fn ready_time(
    graph: &TaskGraph,
    task: usize,
    processor: usize,
    placement: &[usize],
    finish: &[f64],
) -> f64 {
    graph
        .predecessors(task)
        .iter()
        .map(|&pred| {
            if placement[pred] == processor {
                finish[pred]
            } else {
                finish[pred] + graph.comm(pred, task)
            }
        })
        .fold(0.0, f64::max)
}
