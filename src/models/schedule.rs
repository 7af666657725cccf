//! Per-task timing of a concrete schedule.
//!
//! A [`Timing`] is produced fresh by the timing engine (or by HEFT while it
//! commits tasks) and is never updated incrementally.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};

/// Actual start and finish times, indexed by task ID.
///
/// `finish[t] = start[t] + cost[t]` for every task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    /// Actual start time (AST) per task.
    pub start: Vec<f64>,
    /// Actual finish time (AFT) per task.
    pub finish: Vec<f64>,
}

impl Timing {
    /// Zeroed timing for `n` tasks.
    pub fn zeroed(n: usize) -> Self {
        Self {
            start: vec![0.0; n],
            finish: vec![0.0; n],
        }
    }

    /// Number of tasks.
    #[inline]
    pub fn len(&self) -> usize {
        self.finish.len()
    }

    /// Whether there are no tasks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.finish.is_empty()
    }

    /// Makespan: latest finish time (`0.0` with no tasks).
    pub fn makespan(&self) -> f64 {
        self.finish.iter().copied().fold(0.0, f64::max)
    }

    /// AST of a task.
    #[inline]
    pub fn start_of(&self, task: usize) -> f64 {
        self.start[task]
    }

    /// AFT of a task.
    #[inline]
    pub fn finish_of(&self, task: usize) -> f64 {
        self.finish[task]
    }

    /// Busy time of a task (AFT − AST).
    #[inline]
    pub fn duration_of(&self, task: usize) -> f64 {
        self.finish[task] - self.start[task]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_makespan() {
        let t = Timing {
            start: vec![0.0, 5.0, 2.0],
            finish: vec![5.0, 8.0, 9.5],
        };
        assert!((t.makespan() - 9.5).abs() < 1e-10);
        assert!((t.duration_of(2) - 7.5).abs() < 1e-10);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_empty_timing() {
        let t = Timing::default();
        assert!(t.is_empty());
        assert!((t.makespan() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_zeroed() {
        let t = Timing::zeroed(2);
        assert_eq!(t.start, vec![0.0, 0.0]);
        assert_eq!(t.finish, vec![0.0, 0.0]);
    }
}
