//! Side-by-side evaluation of HEFT and GA on one task graph.
//!
//! Produces one metrics row per algorithm, in the layout external result
//! writers expect: `algorithm, makespan, energy, cost, reliability,
//! load_balance`.

use std::fmt;

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ga::GaScheduler;
use crate::models::TaskGraph;
use crate::scheduler::{Evaluator, HeftScheduler, MetricsRecord};

/// Scheduling algorithm label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Heterogeneous Earliest Finish Time list scheduling.
    #[serde(rename = "HEFT")]
    Heft,
    /// Genetic-algorithm assignment search.
    #[serde(rename = "GA")]
    Ga,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Heft => write!(f, "HEFT"),
            Algorithm::Ga => write!(f, "GA"),
        }
    }
}

/// Metrics of one algorithm's schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmResult {
    /// Algorithm that produced the schedule.
    pub algorithm: Algorithm,
    /// Evaluated metrics of that schedule.
    #[serde(flatten)]
    pub metrics: MetricsRecord,
}

/// Rows for every algorithm run on one graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// One row per algorithm, in run order.
    pub rows: Vec<AlgorithmResult>,
}

impl Comparison {
    /// Metrics for `algorithm`, if it was run.
    pub fn get(&self, algorithm: Algorithm) -> Option<&MetricsRecord> {
        self.rows
            .iter()
            .find(|r| r.algorithm == algorithm)
            .map(|r| &r.metrics)
    }
}

/// Schedules `graph` with HEFT and the GA, then evaluates both assignments.
///
/// Rows come back HEFT first, then GA. The GA draws from `rng` only.
pub fn compare_schedulers<R: Rng + ?Sized>(
    graph: &TaskGraph,
    processor_count: usize,
    ga: &GaScheduler,
    evaluator: &Evaluator,
    rng: &mut R,
) -> Result<Comparison> {
    let heft = HeftScheduler::new().schedule(graph, processor_count)?;
    let ga_result = ga.schedule(graph, processor_count, rng)?;

    let rows = vec![
        AlgorithmResult {
            algorithm: Algorithm::Heft,
            metrics: evaluator.evaluate(&heft.assignment, graph, processor_count)?,
        },
        AlgorithmResult {
            algorithm: Algorithm::Ga,
            metrics: evaluator.evaluate(&ga_result.assignment, graph, processor_count)?,
        },
    ];
    for row in &rows {
        info!(
            "{} on {} tasks / {} processors: makespan {:.3}",
            row.algorithm,
            graph.len(),
            processor_count,
            row.metrics.makespan
        );
    }
    Ok(Comparison { rows })
}
