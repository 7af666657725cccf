//! Schedule quality metrics (KPIs).
//!
//! Derives five performance indicators from a finished assignment by
//! running the timing engine once and applying closed-form models.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | `max AFT` |
//! | Energy | `Σ_p (P_idle + P_dyn · u_p²) · makespan` |
//! | Cost | `Σ_p (max AFT_p − min AST_p) / 3600 · price_per_hour`, busy processors only |
//! | Reliability | `exp(−Σ_p λ0 (1 + 4 u_p) · makespan)` |
//! | Load balance | Sample standard deviation of per-processor busy time |
//!
//! where `u_p = busy_p / makespan` is the utilization of processor `p` and
//! `busy_p = Σ (AFT − AST)` over its tasks.
//!
//! # Reference
//! - Huang et al. (2012), energy model with quadratic dynamic power
//! - Toussi et al. (2022), hourly-billed cloud instance cost
//! - Shatz & Wang (1989), Poisson failure model for task reliability

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::models::{Assignment, TaskGraph, Timing};
use crate::timing::compute_timing;

/// Constants of the energy, cost, and reliability models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Static power drawn by every processor for the whole makespan.
    pub idle_power: f64,
    /// Dynamic power at full utilization (scaled by `u²`).
    pub max_dynamic_power: f64,
    /// Instance price per billed hour.
    pub price_per_hour: f64,
    /// Time units per billed hour.
    pub seconds_per_hour: f64,
    /// Base failure rate λ0 of an idle processor.
    pub base_failure_rate: f64,
    /// Slope of the failure rate in utilization: `λ = λ0 (1 + k·u)`.
    pub utilization_failure_factor: f64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            idle_power: 1.0,
            max_dynamic_power: 1.0,
            price_per_hour: 0.1,
            seconds_per_hour: 3600.0,
            base_failure_rate: 1e-5,
            utilization_failure_factor: 4.0,
        }
    }
}

impl EvaluatorConfig {
    /// Sets the static power.
    pub fn with_idle_power(mut self, power: f64) -> Self {
        self.idle_power = power;
        self
    }

    /// Sets the dynamic power at full utilization.
    pub fn with_max_dynamic_power(mut self, power: f64) -> Self {
        self.max_dynamic_power = power;
        self
    }

    /// Sets the hourly instance price.
    pub fn with_price_per_hour(mut self, price: f64) -> Self {
        self.price_per_hour = price;
        self
    }

    /// Sets the base failure rate λ0.
    pub fn with_base_failure_rate(mut self, rate: f64) -> Self {
        self.base_failure_rate = rate;
        self
    }

    /// Checks every constant is finite and non-negative, and the hour length positive.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("idle_power", self.idle_power),
            ("max_dynamic_power", self.max_dynamic_power),
            ("price_per_hour", self.price_per_hour),
            ("base_failure_rate", self.base_failure_rate),
            ("utilization_failure_factor", self.utilization_failure_factor),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ScheduleError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !self.seconds_per_hour.is_finite() || self.seconds_per_hour <= 0.0 {
            return Err(ScheduleError::InvalidConfig(format!(
                "seconds_per_hour must be positive, got {}",
                self.seconds_per_hour
            )));
        }
        Ok(())
    }
}

/// The five schedule performance indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Latest finish time.
    pub makespan: f64,
    /// Total energy over the makespan.
    pub energy: f64,
    /// Monetary cost of billed processor time.
    pub cost: f64,
    /// Probability the whole schedule completes without a failure.
    pub reliability: f64,
    /// Sample standard deviation of per-processor busy time.
    pub load_balance: f64,
}

impl MetricsRecord {
    /// Metrics of a schedule with no tasks.
    pub const EMPTY: MetricsRecord = MetricsRecord {
        makespan: 0.0,
        energy: 0.0,
        cost: 0.0,
        reliability: 1.0,
        load_balance: 0.0,
    };
}

/// Per-processor breakdown behind a [`MetricsRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorUsage {
    /// Processor index.
    pub processor: usize,
    /// Number of tasks placed here.
    pub task_count: usize,
    /// Σ (AFT − AST) of its tasks.
    pub busy_time: f64,
    /// `busy_time / makespan` (0 when makespan is 0).
    pub utilization: f64,
    /// `max AFT − min AST` of its tasks (0 when idle).
    pub billed_span: f64,
}

/// Metrics plus the timing and per-processor data they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// Headline metrics.
    pub metrics: MetricsRecord,
    /// One entry per processor, idle ones included.
    pub processors: Vec<ProcessorUsage>,
    /// AST/AFT from the timing engine.
    pub timing: Timing,
}

/// Multi-objective schedule evaluator.
///
/// Deterministic and side-effect free for a fixed configuration.
///
/// # Example
///
/// ```
/// use dag_schedule::models::{Assignment, TaskGraph};
/// use dag_schedule::scheduler::{Evaluator, MetricsRecord};
///
/// let evaluator = Evaluator::default();
/// let metrics = evaluator.evaluate(&Assignment::new(vec![]), &TaskGraph::empty(), 4).unwrap();
/// assert_eq!(metrics, MetricsRecord::EMPTY);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    /// Creates an evaluator with the given model constants.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidConfig`] if a constant is out of range.
    pub fn new(config: EvaluatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Model constants in use.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Computes the five metrics for `assignment`.
    ///
    /// # Errors
    /// Cycle and invalid-assignment errors from the timing engine.
    pub fn evaluate(
        &self,
        assignment: &Assignment,
        graph: &TaskGraph,
        processor_count: usize,
    ) -> Result<MetricsRecord> {
        Ok(self
            .evaluate_detailed(assignment, graph, processor_count)?
            .metrics)
    }

    /// Like [`evaluate`](Self::evaluate), also returning timing and per-processor usage.
    pub fn evaluate_detailed(
        &self,
        assignment: &Assignment,
        graph: &TaskGraph,
        processor_count: usize,
    ) -> Result<ScheduleReport> {
        let timing = compute_timing(graph, assignment, processor_count)?;
        let report = self.summarize(timing, assignment, processor_count);
        debug!("evaluated schedule: {:?}", report.metrics);
        Ok(report)
    }

    fn summarize(
        &self,
        timing: Timing,
        assignment: &Assignment,
        processor_count: usize,
    ) -> ScheduleReport {
        let cfg = &self.config;
        let makespan = timing.makespan();

        let processors: Vec<ProcessorUsage> = (0..processor_count)
            .map(|p| {
                let mut task_count = 0;
                let mut busy_time = 0.0;
                let mut first_start = f64::INFINITY;
                let mut last_finish = f64::NEG_INFINITY;
                for t in assignment.tasks_on(p) {
                    task_count += 1;
                    busy_time += timing.duration_of(t);
                    first_start = first_start.min(timing.start_of(t));
                    last_finish = last_finish.max(timing.finish_of(t));
                }
                let billed_span = if task_count == 0 {
                    0.0
                } else {
                    last_finish - first_start
                };
                let utilization = if makespan > 0.0 {
                    busy_time / makespan
                } else {
                    0.0
                };
                ProcessorUsage {
                    processor: p,
                    task_count,
                    busy_time,
                    utilization,
                    billed_span,
                }
            })
            .collect();

        let energy: f64 = processors
            .iter()
            .map(|u| (cfg.idle_power + cfg.max_dynamic_power * u.utilization.powi(2)) * makespan)
            .sum();

        let cost: f64 = processors
            .iter()
            .filter(|u| u.task_count > 0)
            .map(|u| u.billed_span / cfg.seconds_per_hour * cfg.price_per_hour)
            .sum();

        let hazard: f64 = processors
            .iter()
            .map(|u| {
                cfg.base_failure_rate * (1.0 + cfg.utilization_failure_factor * u.utilization)
                    * makespan
            })
            .sum();
        let reliability = (-hazard).exp();

        let loads: Vec<f64> = processors.iter().map(|u| u.busy_time).collect();
        let load_balance = sample_std_dev(&loads);

        ScheduleReport {
            metrics: MetricsRecord {
                makespan,
                energy,
                cost,
                reliability,
                load_balance,
            },
            processors,
            timing,
        }
    }
}

/// Bessel-corrected standard deviation; `0.0` for fewer than two samples.
fn sample_std_dev(values: &[f64]) -> f64 {
    let n = values.len();
    if n <= 1 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}
