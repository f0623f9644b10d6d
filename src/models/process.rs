//! Process model.
//!
//! A process is the unit of work the CPU executes. The caller describes
//! each one with a [`ProcessSpec`]; the registry normalizes specs into
//! [`Process`] records that also carry the mutable simulation state.
//!
//! # Time Representation
//! All times are integer ticks relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};

/// Caller-supplied description of a process.
///
/// Input order matters: it is the last-resort tie-breaker for every policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Unique process label.
    pub id: String,
    /// Total CPU time required (ticks).
    pub burst_time: i64,
    /// Time at which the process becomes ready (ticks).
    pub arrival_time: i64,
    /// Scheduling priority. Only the priority policy reads it.
    pub priority: Option<i32>,
}

impl ProcessSpec {
    /// Creates a spec without a priority.
    pub fn new(id: impl Into<String>, burst_time: i64, arrival_time: i64) -> Self {
        Self {
            id: id.into(),
            burst_time,
            arrival_time,
            priority: None,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }
}

impl<S: Into<String>> From<(S, i64, i64)> for ProcessSpec {
    /// `(name, burst_time, arrival_time)`
    fn from((id, burst_time, arrival_time): (S, i64, i64)) -> Self {
        Self::new(id, burst_time, arrival_time)
    }
}

impl<S: Into<String>> From<(S, i64, i64, i32)> for ProcessSpec {
    /// `(name, burst_time, arrival_time, priority)`
    fn from((id, burst_time, arrival_time, priority): (S, i64, i64, i32)) -> Self {
        Self::new(id, burst_time, arrival_time).with_priority(priority)
    }
}

/// A registered process: immutable input plus simulation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Position in the caller's input sequence.
    pub index: usize,
    /// Unique process label.
    pub id: String,
    /// Ready time (ticks).
    pub arrival_time: i64,
    /// Total CPU demand (ticks).
    pub burst_time: i64,
    /// Optional scheduling priority.
    pub priority: Option<i32>,
    /// CPU time still owed. Starts at `burst_time`.
    pub remaining_time: i64,
    /// Set once, the instant `remaining_time` reaches zero.
    pub completion_time: Option<i64>,
}

impl Process {
    pub(crate) fn from_spec(index: usize, spec: &ProcessSpec) -> Self {
        Self {
            index,
            id: spec.id.clone(),
            arrival_time: spec.arrival_time,
            burst_time: spec.burst_time,
            priority: spec.priority,
            remaining_time: spec.burst_time,
            completion_time: None,
        }
    }

    /// Whether all of the burst has been executed.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    /// Whether the process has arrived by `clock` and still needs the CPU.
    #[inline]
    pub fn is_ready_at(&self, clock: i64) -> bool {
        self.arrival_time <= clock && !self.is_finished()
    }

    /// CPU time consumed so far.
    #[inline]
    pub fn executed_time(&self) -> i64 {
        self.burst_time - self.remaining_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_builder() {
        let spec = ProcessSpec::new("P1", 5, 2).with_priority(3);
        assert_eq!(spec.id, "P1");
        assert_eq!(spec.burst_time, 5);
        assert_eq!(spec.arrival_time, 2);
        assert_eq!(spec.priority, Some(3));
    }

    #[test]
    fn test_spec_from_tuples() {
        let plain: ProcessSpec = ("A", 5, 0).into();
        assert_eq!(plain, ProcessSpec::new("A", 5, 0));

        let prio: ProcessSpec = ("B", 3, 1, 7).into();
        assert_eq!(prio.priority, Some(7));
        assert_eq!(prio.arrival_time, 1);
    }

    #[test]
    fn test_process_from_spec() {
        let p = Process::from_spec(4, &ProcessSpec::new("A", 6, 1));
        assert_eq!(p.index, 4);
        assert_eq!(p.remaining_time, 6);
        assert_eq!(p.completion_time, None);
        assert_eq!(p.executed_time(), 0);
        assert!(!p.is_finished());
    }

    #[test]
    fn test_ready_at() {
        let mut p = Process::from_spec(0, &ProcessSpec::new("A", 2, 3));
        assert!(!p.is_ready_at(2));
        assert!(p.is_ready_at(3));
        p.remaining_time = 0;
        assert!(!p.is_ready_at(10));
    }
}
