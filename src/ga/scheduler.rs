//! Generational GA minimizing makespan.
//!
//! # Algorithm
//!
//! 1. Build `population_size` load-biased individuals, visiting tasks in
//!    HEFT upward-rank order.
//! 2. Evaluate each individual's makespan with the timing engine.
//! 3. For each generation: copy the fittest individual unchanged, then fill
//!    the rest with tournament-selected parents, single-point crossover, and
//!    per-gene reset mutation. Evaluate the newcomers.
//! 4. Return the best individual seen across all generations.
//!
//! The random source is always passed in by the caller, so runs are
//! reproducible from a seed and independent runs share no state.

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::chromosome::Chromosome;
use super::config::GaConfig;
use super::operators::{reset_mutation, single_point_crossover, tournament_select};
use crate::error::{Result, ScheduleError};
use crate::models::{Assignment, TaskGraph};
use crate::scheduler::{rank_order, upward_ranks};
use crate::timing::TimingEngine;

/// Output of a GA run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaResult {
    /// Best assignment found.
    pub assignment: Assignment,
    /// Its makespan.
    pub makespan: f64,
    /// Best-ever fitness after each generation; index 0 is the initial
    /// population. Non-increasing.
    pub history: Vec<f64>,
    /// Number of fitness evaluations performed.
    pub evaluations: usize,
}

/// Genetic-algorithm scheduler.
///
/// # Example
/// ```
/// use dag_schedule::ga::{GaConfig, GaScheduler};
/// use dag_schedule::models::{Edge, TaskGraph};
///
/// let graph = TaskGraph::from_costs(&[10.0, 10.0, 10.0], vec![Edge::local(0, 1), Edge::local(1, 2)]).unwrap();
/// let ga = GaScheduler::new(GaConfig::default().with_generations(5)).unwrap();
/// let result = ga.schedule_seeded(&graph, 4, 42).unwrap();
/// assert_eq!(result.makespan, 30.0);
/// assert_eq!(result.history.len(), 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GaScheduler {
    config: GaConfig,
}

impl GaScheduler {
    /// Creates a scheduler.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidConfig`] if the configuration is out of range.
    pub fn new(config: GaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Parameters in use.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs the GA with a [`SmallRng`] seeded from `seed`.
    pub fn schedule_seeded(
        &self,
        graph: &TaskGraph,
        processor_count: usize,
        seed: u64,
    ) -> Result<GaResult> {
        let mut rng = SmallRng::seed_from_u64(seed);
        self.schedule(graph, processor_count, &mut rng)
    }

    /// Runs the GA, drawing all randomness from `rng`.
    ///
    /// # Errors
    /// - [`ScheduleError::NoProcessors`] if `processor_count == 0`
    /// - [`ScheduleError::Cycle`] if the graph is not acyclic
    pub fn schedule<R: Rng + ?Sized>(
        &self,
        graph: &TaskGraph,
        processor_count: usize,
        rng: &mut R,
    ) -> Result<GaResult> {
        if processor_count == 0 {
            return Err(ScheduleError::NoProcessors);
        }
        let cfg = &self.config;
        let engine = TimingEngine::new(graph)?;
        let order = rank_order(&upward_ranks(graph)?);

        let mut population: Vec<Chromosome> = (0..cfg.population_size)
            .map(|_| {
                Chromosome::greedy_random(
                    graph,
                    &order,
                    processor_count,
                    cfg.greedy_init_probability,
                    rng,
                )
            })
            .collect();
        let mut evaluations = evaluate_all(&mut population, &engine, processor_count)?;

        let mut best = fittest(&population).clone();
        let mut history = Vec::with_capacity(cfg.generations + 1);
        history.push(best.fitness);

        if cfg.generations == 0 {
            warn!("GA configured with 0 generations; returning best initial individual");
        }

        for generation in 1..=cfg.generations {
            let mut next = Vec::with_capacity(cfg.population_size);
            next.push(fittest(&population).clone());

            while next.len() < cfg.population_size {
                let p1 = tournament_select(&population, cfg.tournament_size, rng);
                let p2 = tournament_select(&population, cfg.tournament_size, rng);
                let (mut c1, mut c2) = single_point_crossover(p1, p2, rng);
                reset_mutation(&mut c1, processor_count, cfg.mutation_rate, rng);
                reset_mutation(&mut c2, processor_count, cfg.mutation_rate, rng);
                next.push(c1);
                if next.len() < cfg.population_size {
                    next.push(c2);
                }
            }

            evaluations += evaluate_all(&mut next[1..], &engine, processor_count)?;
            population = next;

            let generation_best = fittest(&population);
            if generation_best.fitness < best.fitness {
                best = generation_best.clone();
            }
            history.push(best.fitness);
            debug!(
                "GA generation {generation}: generation best {:.3}, best-ever {:.3}",
                generation_best.fitness, best.fitness
            );
        }

        info!(
            "GA finished: {} generations, {} evaluations, best makespan {:.3}",
            cfg.generations, evaluations, best.fitness
        );

        Ok(GaResult {
            assignment: best.to_assignment(),
            makespan: best.fitness,
            history,
            evaluations,
        })
    }
}

/// Evaluates every individual, returning how many were evaluated.
fn evaluate_all(
    population: &mut [Chromosome],
    engine: &TimingEngine<'_>,
    processor_count: usize,
) -> Result<usize> {
    for individual in population.iter_mut() {
        individual.evaluate(engine, processor_count)?;
    }
    Ok(population.len())
}

/// Lowest-fitness individual; the earliest one wins ties.
fn fittest(population: &[Chromosome]) -> &Chromosome {
    let mut best = &population[0];
    for individual in &population[1..] {
        if individual.fitness < best.fitness {
            best = individual;
        }
    }
    best
}
