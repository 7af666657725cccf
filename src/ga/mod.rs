//! GA-based scheduling optimization.
//!
//! A generational genetic algorithm over processor assignments, with
//! makespan from the timing engine as its only objective.
//!
//! # Encoding
//!
//! - One gene per task; gene `i` is the processor of task `i`.
//! - Execution order is not encoded: the timing engine derives it from the
//!   graph's topological order.
//!
//! # Submodules
//!
//! - [`operators`]: tournament selection, single-point crossover, reset mutation
//!
//! # Reference
//! - Hou, Ansari & Ren (1994), "A Genetic Algorithm for Multiprocessor Scheduling"
//! - Omara & Arafa (2010), "Genetic algorithms for task scheduling problem"

mod chromosome;
mod config;
pub mod operators;
mod scheduler;

pub use chromosome::Chromosome;
pub use config::GaConfig;
pub use operators::{reset_mutation, single_point_crossover, tournament_select};
pub use scheduler::{GaResult, GaScheduler};
