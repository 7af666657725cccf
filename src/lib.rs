//! DAG task scheduling on identical processors.
//!
//! Schedules a task graph onto a fixed number of processors with two
//! heuristics and scores the result on several objectives. Offline and
//! single-shot: no task arrival, preemption, or processor failure is modeled.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Edge`, `TaskGraph`, `Assignment`, `Timing`
//! - **`validation`**: Input integrity checks (duplicate IDs, costs, edge endpoints, DAG cycles)
//! - **`timing`**: Start/finish times of an assignment under one FIFO queue per processor
//! - **`scheduler`**: HEFT list scheduling and the multi-objective `Evaluator`
//! - **`ga`**: Genetic-algorithm scheduler minimizing makespan
//! - **`comparison`**: Run both schedulers on one graph and evaluate each
//!
//! # Data Flow
//!
//! ```text
//! TaskGraph + processor count ──► HeftScheduler | GaScheduler ──► Assignment
//! Assignment ──► Evaluator (timing engine) ──► MetricsRecord
//! ```
//!
//! # Example
//!
//! ```
//! use dag_schedule::models::{Edge, TaskGraph};
//! use dag_schedule::scheduler::{Evaluator, HeftScheduler};
//!
//! let graph = TaskGraph::from_costs(
//!     &[10.0, 10.0, 10.0],
//!     vec![Edge::local(0, 1), Edge::local(1, 2)],
//! ).unwrap();
//! let heft = HeftScheduler::new().schedule(&graph, 4).unwrap();
//! let metrics = Evaluator::default().evaluate(&heft.assignment, &graph, 4).unwrap();
//! assert_eq!(metrics.makespan, 30.0);
//! ```
//!
//! # References
//!
//! - Topcuoglu et al. (2002), "Performance-Effective and Low-Complexity Task
//!   Scheduling for Heterogeneous Computing"
//! - Kwok & Ahmad (1999), "Static Scheduling Algorithms for Allocating
//!   Directed Task Graphs to Multiprocessors"

pub mod comparison;
pub mod error;
pub mod ga;
pub mod models;
pub mod scheduler;
pub mod timing;
pub mod validation;

pub use error::{Result, ScheduleError};
