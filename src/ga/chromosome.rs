//! Processor-assignment chromosome.
//!
//! # Encoding
//!
//! One gene per task: `genes[i]` is the processor of task `i`. Every gene
//! vector of length `n` with values below the processor count decodes to a
//! valid [`Assignment`]; execution order comes from the timing engine.

use rand::Rng;

use crate::error::Result;
use crate::models::{Assignment, TaskGraph};
use crate::timing::TimingEngine;

/// Processor-per-task chromosome for the scheduling GA.
///
/// Lower fitness = better schedule (minimization convention).
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    /// Processor index per task.
    pub genes: Vec<usize>,
    /// Makespan of the decoded assignment; `INFINITY` until evaluated.
    pub fitness: f64,
}

impl Chromosome {
    /// Wraps genes as an unevaluated chromosome.
    pub fn new(genes: Vec<usize>) -> Self {
        Self {
            genes,
            fitness: f64::INFINITY,
        }
    }

    /// Load-biased random genes.
    ///
    /// Visits tasks in `order` (rank-descending). Each task goes, with
    /// probability `greedy_probability`, to the processor with the least
    /// cumulative assigned cost so far (ties: lowest index), otherwise to a
    /// uniformly random processor. The chosen processor's load grows by the
    /// task's cost either way.
    ///
    /// The load here is assigned cost only and ignores timing.
    pub fn greedy_random<R: Rng + ?Sized>(
        graph: &TaskGraph,
        order: &[usize],
        processor_count: usize,
        greedy_probability: f64,
        rng: &mut R,
    ) -> Self {
        let mut genes = vec![0usize; graph.len()];
        let mut load = vec![0.0_f64; processor_count];

        for &task in order {
            let processor = if rng.random_bool(greedy_probability) {
                least_loaded(&load)
            } else {
                rng.random_range(0..processor_count)
            };
            genes[task] = processor;
            load[processor] += graph.cost(task);
        }

        Self::new(genes)
    }

    /// Number of genes.
    #[inline]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether there are no genes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Whether fitness has been computed.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_finite()
    }

    /// Decodes into an assignment.
    pub fn to_assignment(&self) -> Assignment {
        Assignment::new(self.genes.clone())
    }

    /// Computes and stores fitness (makespan).
    pub fn evaluate(&mut self, engine: &TimingEngine<'_>, processor_count: usize) -> Result<f64> {
        self.fitness = engine.makespan(&self.to_assignment(), processor_count)?;
        Ok(self.fitness)
    }
}

fn least_loaded(load: &[f64]) -> usize {
    let mut best = 0;
    for (p, &l) in load.iter().enumerate().skip(1) {
        if l < load[best] {
            best = p;
        }
    }
    best
}
