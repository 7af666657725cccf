//! Task graph (DAG) model.
//!
//! Holds tasks and edges together with the derived predecessor, successor,
//! and communication-cost indices. Built once and never mutated; all
//! schedulers and the evaluator borrow it.
//!
//! # Invariants
//! - Task IDs are exactly `0..n`, and `tasks()[i].id == i`.
//! - Every edge endpoint is a valid task ID.
//! - Acyclicity is *not* checked here; [`TaskGraph::topological_order`]
//!   reports cycles as [`ScheduleError::Cycle`].

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use super::{Edge, Task};
use crate::error::{Result, ScheduleError};
use crate::validation::validate_structure;

/// An immutable task graph with adjacency indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GraphData", into = "GraphData")]
pub struct TaskGraph {
    tasks: Vec<Task>,
    edges: Vec<Edge>,
    predecessors: Vec<Vec<usize>>,
    successors: Vec<Vec<usize>>,
    comm: HashMap<(usize, usize), f64>,
}

/// Wire form of a task graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GraphData {
    tasks: Vec<Task>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl TryFrom<GraphData> for TaskGraph {
    type Error = ScheduleError;

    fn try_from(data: GraphData) -> Result<Self> {
        TaskGraph::new(data.tasks, data.edges)
    }
}

impl From<TaskGraph> for GraphData {
    fn from(graph: TaskGraph) -> Self {
        GraphData {
            tasks: graph.tasks,
            edges: graph.edges,
        }
    }
}

impl TaskGraph {
    /// Builds a graph from tasks and edges in linear time.
    ///
    /// Tasks may arrive in any order; they are stored sorted by ID.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidGraph`] with every structural problem found
    /// by [`validate_structure`].
    pub fn new(mut tasks: Vec<Task>, edges: Vec<Edge>) -> Result<Self> {
        validate_structure(&tasks, &edges).map_err(ScheduleError::InvalidGraph)?;
        tasks.sort_by_key(|t| t.id);

        let n = tasks.len();
        let mut predecessors = vec![Vec::new(); n];
        let mut successors = vec![Vec::new(); n];
        let mut comm = HashMap::with_capacity(edges.len());
        for edge in &edges {
            predecessors[edge.dst].push(edge.src);
            successors[edge.src].push(edge.dst);
            comm.insert((edge.src, edge.dst), edge.comm);
        }

        Ok(Self {
            tasks,
            edges,
            predecessors,
            successors,
            comm,
        })
    }

    /// Builds a graph whose task `i` has cost `costs[i]`.
    pub fn from_costs(costs: &[f64], edges: Vec<Edge>) -> Result<Self> {
        let tasks = costs
            .iter()
            .enumerate()
            .map(|(id, &cost)| Task::new(id, cost))
            .collect();
        Self::new(tasks, edges)
    }

    /// A graph with no tasks.
    pub fn empty() -> Self {
        Self {
            tasks: Vec::new(),
            edges: Vec::new(),
            predecessors: Vec::new(),
            successors: Vec::new(),
            comm: HashMap::new(),
        }
    }

    /// Number of tasks.
    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the graph has no tasks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks, indexed by ID.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Processing cost of a task.
    ///
    /// # Panics
    /// If `task >= self.len()`.
    #[inline]
    pub fn cost(&self, task: usize) -> f64 {
        self.tasks[task].cost
    }

    /// Direct predecessors of a task.
    #[inline]
    pub fn predecessors(&self, task: usize) -> &[usize] {
        &self.predecessors[task]
    }

    /// Direct successors of a task.
    #[inline]
    pub fn successors(&self, task: usize) -> &[usize] {
        &self.successors[task]
    }

    /// Communication cost of edge `src → dst`, or `0.0` if there is no such edge.
    #[inline]
    pub fn comm(&self, src: usize, dst: usize) -> f64 {
        self.comm.get(&(src, dst)).copied().unwrap_or(0.0)
    }

    /// Sum of all task costs.
    pub fn total_cost(&self) -> f64 {
        self.tasks.iter().map(|t| t.cost).sum()
    }

    /// Largest single task cost (`0.0` for an empty graph).
    pub fn max_cost(&self) -> f64 {
        self.tasks.iter().map(|t| t.cost).fold(0.0, f64::max)
    }

    /// Topological order via Kahn's algorithm (in-degree queue).
    ///
    /// Tasks with equal depth come out in ascending ID order, so the result
    /// is deterministic.
    ///
    /// # Errors
    /// [`ScheduleError::Cycle`] if fewer than `n` tasks could be ordered.
    pub fn topological_order(&self) -> Result<Vec<usize>> {
        let n = self.len();
        let mut in_degree: Vec<usize> = self.predecessors.iter().map(Vec::len).collect();
        let mut queue: VecDeque<usize> = (0..n).filter(|&t| in_degree[t] == 0).collect();
        let mut order = Vec::with_capacity(n);

        while let Some(task) = queue.pop_front() {
            order.push(task);
            for &next in &self.successors[task] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    queue.push_back(next);
                }
            }
        }

        if order.len() != n {
            return Err(ScheduleError::Cycle {
                ordered: order.len(),
                total: n,
            });
        }
        Ok(order)
    }
}
