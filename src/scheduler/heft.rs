//! HEFT list scheduler.
//!
//! # Algorithm
//!
//! 1. Compute the upward rank of every task by reverse-topological
//!    accumulation:
//!    `rank_u(t) = cost(t) + max_{s ∈ succ(t)} (comm(t, s) + rank_u(s))`.
//! 2. Visit tasks by descending rank (ties: ascending task ID).
//! 3. For each task, try every processor and compute
//!    `EST = max(available[p], ready(t, p))`, `EFT = EST + cost(t)`.
//!    Commit the task to the processor with the smallest EFT (ties: lowest
//!    processor index). Committed timings are never revisited.
//!
//! Processors are identical, so the "heterogeneous" part of HEFT reduces to
//! the communication model: an edge is free only when both ends share a
//! processor. Placement is append-only (no insertion into idle gaps).
//!
//! # Complexity
//! O(n log n + e·p) where n=tasks, e=edges, p=processors.
//!
//! # Reference
//! Topcuoglu et al. (2002), "Performance-Effective and Low-Complexity Task
//! Scheduling for Heterogeneous Computing", IEEE TPDS 13(3)

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::models::{Assignment, TaskGraph, Timing};
use crate::timing::ready_time;

/// Upward rank of every task, indexed by task ID.
///
/// Iterates the topological order backwards, so deep graphs do not recurse.
///
/// # Errors
/// [`ScheduleError::Cycle`] if the graph is not acyclic.
pub fn upward_ranks(graph: &TaskGraph) -> Result<Vec<f64>> {
    let order = graph.topological_order()?;
    let mut ranks = vec![0.0_f64; graph.len()];
    for &task in order.iter().rev() {
        let tail = graph
            .successors(task)
            .iter()
            .map(|&succ| graph.comm(task, succ) + ranks[succ])
            .fold(0.0, f64::max);
        ranks[task] = graph.cost(task) + tail;
    }
    Ok(ranks)
}

/// Task IDs sorted by descending rank, ties broken by ascending ID.
pub fn rank_order(ranks: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..ranks.len()).collect();
    order.sort_by(|&a, &b| ranks[b].total_cmp(&ranks[a]).then_with(|| a.cmp(&b)));
    order
}

/// Output of a HEFT run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeftResult {
    /// Processor chosen for each task.
    pub assignment: Assignment,
    /// Latest committed finish time.
    pub makespan: f64,
    /// AST/AFT as committed during placement.
    pub timing: Timing,
    /// Upward rank per task.
    pub ranks: Vec<f64>,
}

/// Heterogeneous Earliest Finish Time scheduler.
///
/// Deterministic: identical graphs and processor counts always produce
/// identical results.
///
/// # Example
///
/// ```
/// use dag_schedule::models::{Edge, TaskGraph};
/// use dag_schedule::scheduler::HeftScheduler;
///
/// let graph = TaskGraph::from_costs(&[5.0, 5.0], vec![Edge::new(0, 1, 3.0)]).unwrap();
/// let result = HeftScheduler::new().schedule(&graph, 2).unwrap();
/// assert_eq!(result.assignment.as_slice(), &[0, 0]);
/// assert_eq!(result.makespan, 10.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HeftScheduler;

impl HeftScheduler {
    /// Creates a new scheduler.
    pub fn new() -> Self {
        Self
    }

    /// Schedules `graph` onto `processor_count` identical processors.
    ///
    /// # Errors
    /// - [`ScheduleError::NoProcessors`] if `processor_count == 0`
    /// - [`ScheduleError::Cycle`] if the graph is not acyclic
    pub fn schedule(&self, graph: &TaskGraph, processor_count: usize) -> Result<HeftResult> {
        if processor_count == 0 {
            return Err(ScheduleError::NoProcessors);
        }

        let ranks = upward_ranks(graph)?;
        let n = graph.len();
        let mut placement = vec![0usize; n];
        let mut timing = Timing::zeroed(n);
        let mut available = vec![0.0_f64; processor_count];

        // With positive costs, every predecessor outranks its successors, so
        // popping the highest-ranked ready task walks the rank order exactly.
        // The ready queue keeps that true under floating-point rounding.
        let mut remaining_preds: Vec<usize> =
            (0..n).map(|t| graph.predecessors(t).len()).collect();
        let mut ready: BinaryHeap<RankedTask> = (0..n)
            .filter(|&t| remaining_preds[t] == 0)
            .map(|t| RankedTask::new(t, ranks[t]))
            .collect();

        while let Some(RankedTask { task, .. }) = ready.pop() {
            let cost = graph.cost(task);
            let mut best = (0usize, f64::INFINITY, f64::INFINITY);

            for processor in 0..processor_count {
                let ready_at = ready_time(graph, task, processor, &placement, &timing.finish);
                let start = available[processor].max(ready_at);
                let finish = start + cost;
                trace!("task {task} on P{processor}: EST={start} EFT={finish}");
                if finish < best.2 {
                    best = (processor, start, finish);
                }
            }

            let (processor, start, finish) = best;
            placement[task] = processor;
            timing.start[task] = start;
            timing.finish[task] = finish;
            available[processor] = finish;
            debug!(
                "HEFT commit task {task} (rank {:.3}) → P{processor} [{start}, {finish}]",
                ranks[task]
            );

            for &succ in graph.successors(task) {
                remaining_preds[succ] -= 1;
                if remaining_preds[succ] == 0 {
                    ready.push(RankedTask::new(succ, ranks[succ]));
                }
            }
        }

        Ok(HeftResult {
            assignment: Assignment::new(placement),
            makespan: timing.makespan(),
            timing,
            ranks,
        })
    }
}

/// Max-heap entry: higher rank first, then lower ID.
#[derive(Debug, Clone, Copy)]
struct RankedTask {
    task: usize,
    rank: f64,
}

impl RankedTask {
    fn new(task: usize, rank: f64) -> Self {
        Self { task, rank }
    }
}

impl PartialEq for RankedTask {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankedTask {}

impl PartialOrd for RankedTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankedTask {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .total_cmp(&other.rank)
            .then_with(|| other.task.cmp(&self.task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Edge;
    use crate::timing::TimingEngine;

    fn chain(costs: &[f64]) -> TaskGraph {
        let edges = (1..costs.len()).map(|i| Edge::local(i - 1, i)).collect();
        TaskGraph::from_costs(costs, edges).unwrap()
    }

    /// Topcuoglu-style 6-task graph with mixed communication costs.
    fn sample_graph() -> TaskGraph {
        TaskGraph::from_costs(
            &[10.0, 8.0, 12.0, 6.0, 9.0, 4.0],
            vec![
                Edge::new(0, 1, 4.0),
                Edge::new(0, 2, 6.0),
                Edge::new(0, 3, 2.0),
                Edge::new(1, 4, 5.0),
                Edge::new(2, 4, 3.0),
                Edge::new(3, 5, 7.0),
                Edge::new(4, 5, 1.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_upward_ranks_chain() {
        let ranks = upward_ranks(&chain(&[1.0, 2.0, 3.0])).unwrap();
        assert_eq!(ranks, vec![6.0, 5.0, 3.0]);
    }

    #[test]
    fn test_upward_ranks_with_comm() {
        let ranks = upward_ranks(&sample_graph()).unwrap();
        // 5: 4; 4: 9+1+4=14; 3: 6+7+4=17; 2: 12+3+14=29; 1: 8+5+14=27;
        // 0: 10 + max(4+27, 6+29, 2+17) = 45
        assert_eq!(ranks, vec![45.0, 27.0, 29.0, 17.0, 14.0, 4.0]);
    }

    #[test]
    fn test_rank_order_ties_by_id() {
        assert_eq!(rank_order(&[3.0, 5.0, 3.0, 5.0]), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_chain_makespan_any_processor_count() {
        let g = chain(&[10.0, 10.0, 10.0]);
        for p in 1..=5 {
            let result = HeftScheduler::new().schedule(&g, p).unwrap();
            assert!((result.makespan - 30.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_colocates_when_comm_dominates() {
        let g = TaskGraph::from_costs(&[5.0, 5.0], vec![Edge::new(0, 1, 3.0)]).unwrap();
        let result = HeftScheduler::new().schedule(&g, 2).unwrap();
        assert_eq!(result.assignment.as_slice(), &[0, 0]);
        assert!((result.makespan - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_independent_tasks_spread() {
        let g = TaskGraph::from_costs(&[3.0; 4], vec![]).unwrap();
        let result = HeftScheduler::new().schedule(&g, 2).unwrap();
        assert_eq!(result.assignment.as_slice(), &[0, 1, 0, 1]);
        assert!((result.makespan - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_deterministic() {
        let g = sample_graph();
        let a = HeftScheduler::new().schedule(&g, 3).unwrap();
        let b = HeftScheduler::new().schedule(&g, 3).unwrap();
        assert_eq!(a.assignment, b.assignment);
        assert_eq!(a.makespan, b.makespan);
        assert_eq!(a.timing, b.timing);
    }

    #[test]
    fn test_committed_timing_respects_precedence() {
        let g = sample_graph();
        let result = HeftScheduler::new().schedule(&g, 3).unwrap();
        let timing = &result.timing;
        for t in 0..g.len() {
            assert!((timing.duration_of(t) - g.cost(t)).abs() < 1e-9);
            for &pred in g.predecessors(t) {
                let comm = if result.assignment.processor_of(pred)
                    == result.assignment.processor_of(t)
                {
                    0.0
                } else {
                    g.comm(pred, t)
                };
                assert!(timing.start_of(t) + 1e-9 >= timing.finish_of(pred) + comm);
            }
        }
        let engine = TimingEngine::new(&g).unwrap();
        let cp = engine.critical_path_length(&result.assignment).unwrap();
        assert!(result.makespan + 1e-9 >= cp);
    }

    #[test]
    fn test_sample_graph_schedule() {
        let result = HeftScheduler::new().schedule(&sample_graph(), 2).unwrap();
        // Order by rank: 0, 2, 1, 3, 4, 5.
        // 0 → P0 [0,10]; 2 → P0 [10,22]; 1 → P1 [14,22] (P0 would end 30);
        // 3 → P0 [22,28] (tie with P1); 4 → P1 [25,34]; 5 → P0 [35,39] (tie with P1)
        assert_eq!(result.assignment.as_slice(), &[0, 1, 0, 0, 1, 0]);
        assert_eq!(result.timing.start, vec![0.0, 14.0, 10.0, 22.0, 25.0, 35.0]);
        assert!((result.makespan - 39.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_graph() {
        let result = HeftScheduler::new().schedule(&TaskGraph::empty(), 4).unwrap();
        assert!(result.assignment.is_empty());
        assert!((result.makespan - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_cycle_propagates() {
        let g = TaskGraph::from_costs(&[1.0, 1.0], vec![Edge::local(0, 1), Edge::local(1, 0)])
            .unwrap();
        let err = HeftScheduler::new().schedule(&g, 2).unwrap_err();
        assert!(matches!(err, ScheduleError::Cycle { .. }));
    }

    #[test]
    fn test_zero_processors() {
        let err = HeftScheduler::new().schedule(&chain(&[1.0]), 0).unwrap_err();
        assert_eq!(err, ScheduleError::NoProcessors);
    }
}
