//! GA tuning parameters.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Parameters of the generational GA.
///
/// # Example
/// ```
/// use dag_schedule::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_generations(100)
///     .with_mutation_rate(0.05);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.tournament_size, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Individuals per generation (≥ 1).
    pub population_size: usize,
    /// Number of generations after the initial population.
    pub generations: usize,
    /// Per-gene probability of resetting to a random processor.
    pub mutation_rate: f64,
    /// Contestants per tournament (≥ 1; clamped to the population size).
    pub tournament_size: usize,
    /// Probability that initialization places a task on the least-loaded
    /// processor instead of a random one.
    pub greedy_init_probability: f64,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            generations: 40,
            mutation_rate: 0.1,
            tournament_size: 3,
            greedy_init_probability: 0.7,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation count.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the greedy placement probability used during initialization.
    pub fn with_greedy_init_probability(mut self, probability: f64) -> Self {
        self.greedy_init_probability = probability;
        self
    }

    /// Checks sizes are positive and probabilities lie in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(ScheduleError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(ScheduleError::InvalidConfig(
                "tournament_size must be at least 1".into(),
            ));
        }
        for (name, p) in [
            ("mutation_rate", self.mutation_rate),
            ("greedy_init_probability", self.greedy_init_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ScheduleError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }
}
