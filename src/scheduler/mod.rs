//! List scheduling and schedule evaluation.
//!
//! # Algorithm
//!
//! `HeftScheduler` orders tasks by upward rank and greedily places each one
//! on the processor giving the earliest finish time. It is a fast,
//! deterministic baseline, not an optimal scheduler.
//!
//! # KPI
//!
//! `Evaluator` computes makespan, energy, monetary cost, reliability, and
//! load balance for any assignment, regardless of which scheduler made it.
//!
//! # References
//!
//! - Topcuoglu et al. (2002), "Performance-Effective and Low-Complexity Task
//!   Scheduling for Heterogeneous Computing"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1.2

mod heft;
mod kpi;

pub use heft::{rank_order, upward_ranks, HeftResult, HeftScheduler};
pub use kpi::{Evaluator, EvaluatorConfig, MetricsRecord, ProcessorUsage, ScheduleReport};
