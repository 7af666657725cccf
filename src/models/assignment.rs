//! Task-to-processor assignment.
//!
//! The output of every scheduler: a total mapping from task ID to processor
//! index. Processors need not all be used.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// A total mapping `task → processor`, stored densely by task ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    processors: Vec<usize>,
}

impl Assignment {
    /// Wraps a dense vector where entry `i` is the processor of task `i`.
    pub fn new(processors: Vec<usize>) -> Self {
        Self { processors }
    }

    /// Builds an assignment from `(task, processor)` pairs.
    ///
    /// # Errors
    /// - [`ScheduleError::DuplicateTask`] if a task appears twice
    /// - [`ScheduleError::MissingTask`] if a task in `0..task_count` is absent
    ///   or a pair names a task outside that range
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (usize, usize)>,
        task_count: usize,
    ) -> Result<Self> {
        let mut slots: Vec<Option<usize>> = vec![None; task_count];
        for (task, processor) in pairs {
            let slot = slots
                .get_mut(task)
                .ok_or(ScheduleError::MissingTask { task })?;
            if slot.replace(processor).is_some() {
                return Err(ScheduleError::DuplicateTask { task });
            }
        }

        let processors = slots
            .into_iter()
            .enumerate()
            .map(|(task, slot)| slot.ok_or(ScheduleError::MissingTask { task }))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { processors })
    }

    /// Builds an assignment from a `task → processor` map.
    pub fn from_map(map: &HashMap<usize, usize>, task_count: usize) -> Result<Self> {
        Self::from_pairs(map.iter().map(|(&t, &p)| (t, p)), task_count)
    }

    /// Checks that the assignment covers `task_count` tasks and every
    /// processor index is below `processor_count`.
    pub fn validate(&self, task_count: usize, processor_count: usize) -> Result<()> {
        if processor_count == 0 {
            return Err(ScheduleError::NoProcessors);
        }
        if self.processors.len() != task_count {
            return Err(ScheduleError::AssignmentLength {
                expected: task_count,
                actual: self.processors.len(),
            });
        }
        for (task, &processor) in self.processors.iter().enumerate() {
            if processor >= processor_count {
                return Err(ScheduleError::ProcessorOutOfRange {
                    task,
                    processor,
                    processor_count,
                });
            }
        }
        Ok(())
    }

    /// Processor of a task.
    ///
    /// # Panics
    /// If `task` is out of range.
    #[inline]
    pub fn processor_of(&self, task: usize) -> usize {
        self.processors[task]
    }

    /// Number of tasks covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// Whether the assignment covers no tasks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Dense view: entry `i` is the processor of task `i`.
    pub fn as_slice(&self) -> &[usize] {
        &self.processors
    }

    /// Consumes the assignment, returning the dense vector.
    pub fn into_inner(self) -> Vec<usize> {
        self.processors
    }

    /// Tasks placed on a processor, in ascending ID order.
    pub fn tasks_on(&self, processor: usize) -> impl Iterator<Item = usize> + '_ {
        self.processors
            .iter()
            .enumerate()
            .filter(move |&(_, &p)| p == processor)
            .map(|(t, _)| t)
    }

    /// Number of tasks per processor.
    pub fn task_counts(&self, processor_count: usize) -> Vec<usize> {
        let mut counts = vec![0; processor_count];
        for &p in &self.processors {
            if let Some(c) = counts.get_mut(p) {
                *c += 1;
            }
        }
        counts
    }
}

impl From<Vec<usize>> for Assignment {
    fn from(processors: Vec<usize>) -> Self {
        Self::new(processors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs() {
        let a = Assignment::from_pairs(vec![(1, 0), (0, 2), (2, 1)], 3).unwrap();
        assert_eq!(a.as_slice(), &[2, 0, 1]);
    }

    #[test]
    fn test_from_pairs_duplicate() {
        let err = Assignment::from_pairs(vec![(0, 0), (0, 1)], 2).unwrap_err();
        assert_eq!(err, ScheduleError::DuplicateTask { task: 0 });
    }

    #[test]
    fn test_from_pairs_missing() {
        let err = Assignment::from_pairs(vec![(0, 0)], 2).unwrap_err();
        assert_eq!(err, ScheduleError::MissingTask { task: 1 });

        let err = Assignment::from_pairs(vec![(0, 0), (5, 0)], 1).unwrap_err();
        assert_eq!(err, ScheduleError::MissingTask { task: 5 });
    }

    #[test]
    fn test_from_map() {
        let map: HashMap<usize, usize> = [(0, 1), (1, 1)].into_iter().collect();
        let a = Assignment::from_map(&map, 2).unwrap();
        assert_eq!(a.as_slice(), &[1, 1]);
    }

    #[test]
    fn test_validate() {
        let a = Assignment::new(vec![0, 1, 1]);
        assert!(a.validate(3, 2).is_ok());
        assert_eq!(a.validate(3, 0), Err(ScheduleError::NoProcessors));
        assert_eq!(
            a.validate(4, 2),
            Err(ScheduleError::AssignmentLength {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(
            a.validate(3, 1),
            Err(ScheduleError::ProcessorOutOfRange {
                task: 1,
                processor: 1,
                processor_count: 1
            })
        );
    }

    #[test]
    fn test_tasks_on_and_counts() {
        let a = Assignment::new(vec![0, 2, 0, 2]);
        assert_eq!(a.tasks_on(0).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(a.tasks_on(1).count(), 0);
        assert_eq!(a.task_counts(3), vec![2, 0, 2]);
    }

    #[test]
    fn test_serde_transparent() {
        let a = Assignment::new(vec![1, 0]);
        assert_eq!(serde_json::to_string(&a).unwrap(), "[1,0]");
    }
}
