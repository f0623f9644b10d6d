//! Process registry.
//!
//! Single owner of process state for one simulation run. Processes are
//! addressed by their input index, so policy engines work over plain
//! `usize` handles instead of holding references into the registry.

use serde::Serialize;

use super::{Process, ProcessSpec};
use crate::error::{InvariantError, InvariantErrorKind};
use crate::validation::{validate_processes, ValidationError};

/// Validated processes plus their mutable simulation state.
///
/// # Example
/// ```
/// use cpu_sched::models::{ProcessRegistry, ProcessSpec};
///
/// let registry = ProcessRegistry::register(&[
///     ProcessSpec::new("A", 5, 0),
///     ProcessSpec::new("B", 3, 1),
/// ]).unwrap();
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.snapshot()[1].remaining_time, 3);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessRegistry {
    processes: Vec<Process>,
}

impl ProcessRegistry {
    /// Validates `specs` and builds fresh process records.
    ///
    /// Fails with every validation problem found; no registry is built
    /// from partially valid input.
    pub fn register(specs: &[ProcessSpec]) -> Result<Self, Vec<ValidationError>> {
        validate_processes(specs)?;
        let processes = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| Process::from_spec(i, spec))
            .collect();
        Ok(Self { processes })
    }

    /// Current state of every process, in input order.
    pub fn snapshot(&self) -> &[Process] {
        &self.processes
    }

    /// Number of registered processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether no processes are registered.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Process at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Process> {
        self.processes.get(index)
    }

    /// Looks up a process by ID.
    pub fn find(&self, id: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.id == id)
    }

    /// Indices ordered by arrival time, ties by input order.
    pub fn arrival_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.processes.len()).collect();
        // Stable sort keeps input order among equal arrivals.
        order.sort_by_key(|&i| self.processes[i].arrival_time);
        order
    }

    /// Earliest arrival strictly after `clock` among unfinished processes.
    pub fn next_arrival_after(&self, clock: i64) -> Option<i64> {
        self.processes
            .iter()
            .filter(|p| !p.is_finished() && p.arrival_time > clock)
            .map(|p| p.arrival_time)
            .min()
    }

    /// Indices of processes that are ready at `clock`, in input order.
    pub fn ready_at(&self, clock: i64) -> Vec<usize> {
        self.processes
            .iter()
            .filter(|p| p.is_ready_at(clock))
            .map(|p| p.index)
            .collect()
    }

    /// Charges `run` ticks of CPU time to the process at `index`.
    ///
    /// Returns the remaining time after the charge.
    pub fn execute(&mut self, index: usize, run: i64) -> Result<i64, InvariantError> {
        let process = self.slot_mut(index)?;
        if run <= 0 || run > process.remaining_time {
            return Err(InvariantError::new(
                InvariantErrorKind::RunOverrun,
                format!(
                    "Cannot run '{}' for {} ticks with {} remaining",
                    process.id, run, process.remaining_time
                ),
            ));
        }
        process.remaining_time -= run;
        Ok(process.remaining_time)
    }

    /// Records the completion time of a finished process.
    pub fn complete(&mut self, index: usize, time: i64) -> Result<(), InvariantError> {
        let process = self.slot_mut(index)?;
        if process.completion_time.is_some() || process.remaining_time != 0 {
            return Err(InvariantError::new(
                InvariantErrorKind::AlreadyCompleted,
                format!(
                    "Cannot complete '{}' at {}: remaining {}, completion {:?}",
                    process.id, time, process.remaining_time, process.completion_time
                ),
            ));
        }
        process.completion_time = Some(time);
        Ok(())
    }

    /// Whether every process has finished.
    pub fn all_complete(&self) -> bool {
        self.processes.iter().all(Process::is_finished)
    }

    /// Fails unless every process has a completion time.
    pub fn ensure_all_complete(&self) -> Result<(), InvariantError> {
        match self.processes.iter().find(|p| p.completion_time.is_none()) {
            Some(p) => Err(InvariantError::new(
                InvariantErrorKind::IncompleteProcess,
                format!(
                    "Process '{}' never completed ({} ticks remaining)",
                    p.id, p.remaining_time
                ),
            )),
            None => Ok(()),
        }
    }

    /// Sum of all burst times.
    pub fn total_burst(&self) -> i64 {
        self.processes.iter().map(|p| p.burst_time).sum()
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Process, InvariantError> {
        self.processes.get_mut(index).ok_or_else(|| {
            InvariantError::new(
                InvariantErrorKind::RunOverrun,
                format!("No process at index {index}"),
            )
        })
    }
}

impl std::ops::Index<usize> for ProcessRegistry {
    type Output = Process;

    fn index(&self, index: usize) -> &Process {
        &self.processes[index]
    }
}
