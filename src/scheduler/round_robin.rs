//! Round-robin scheduler.
//!
//! # Algorithm
//!
//! A FIFO ready queue of process indices and a clock starting at 0.
//! Processes arriving at t=0 are queued in input order. Then, until every
//! process finishes:
//!
//! 1. If the queue is empty, record idle time up to the next arrival and
//!    queue every process that has arrived by then.
//! 2. Pop the head `P` and run it for `min(quantum, remaining)`.
//! 3. Queue every process that arrived during that slice (arrival order,
//!    input order on ties), *then* re-queue `P` if it still has work.
//!    Newly arrived processes therefore go ahead of the preempted one.
//!
//! Consecutive slices of the same process collapse into one segment.

use std::collections::VecDeque;
use std::iter::Peekable;

use tracing::{debug, trace};

use super::advance;
use crate::error::InvariantError;
use crate::models::{ProcessRegistry, Timeline, TimelineBuilder};

/// Preemptive round-robin with a fixed quantum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobinScheduler {
    quantum: i64,
}

impl RoundRobinScheduler {
    /// Creates a scheduler with the given time slice.
    ///
    /// The quantum must already be validated as positive; see
    /// [`crate::validation::validate_quantum`].
    pub fn new(quantum: i64) -> Self {
        Self { quantum }
    }

    /// The time slice.
    pub fn quantum(&self) -> i64 {
        self.quantum
    }

    /// Runs every process in `registry` to completion.
    pub fn schedule(&self, registry: &mut ProcessRegistry) -> Result<Timeline, InvariantError> {
        let mut pending = registry.arrival_order().into_iter().peekable();
        let mut queue: VecDeque<usize> = VecDeque::with_capacity(registry.len());
        let mut builder = TimelineBuilder::new();
        let mut clock = 0;

        admit(&mut pending, &mut queue, registry, clock);

        loop {
            let Some(idx) = queue.pop_front() else {
                let Some(&next) = pending.peek() else {
                    break;
                };
                let arrival = registry[next].arrival_time;
                debug!(start = clock, end = arrival, "cpu idle");
                builder.append_idle(clock, arrival)?;
                clock = arrival;
                admit(&mut pending, &mut queue, registry, clock);
                continue;
            };

            let run = self.quantum.min(registry[idx].remaining_time);
            let end = advance(clock, run)?;
            debug!(process = %registry[idx].id, start = clock, end, "dispatch");
            builder.append_busy(&registry[idx].id, clock, end)?;
            let remaining = registry.execute(idx, run)?;
            clock = end;

            // Arrivals in (start, end] queue ahead of the preempted process.
            admit(&mut pending, &mut queue, registry, clock);

            if remaining == 0 {
                registry.complete(idx, clock)?;
            } else {
                trace!(process = %registry[idx].id, remaining, "requeue");
                queue.push_back(idx);
            }
        }

        Ok(builder.finalize())
    }
}

/// Moves every pending process that has arrived by `clock` onto the queue.
///
/// `pending` yields indices in arrival order, so stopping at the first
/// future arrival is enough.
fn admit<I>(
    pending: &mut Peekable<I>,
    queue: &mut VecDeque<usize>,
    registry: &ProcessRegistry,
    clock: i64,
) where
    I: Iterator<Item = usize>,
{
    while let Some(idx) = pending.next_if(|&i| registry[i].arrival_time <= clock) {
        trace!(process = %registry[idx].id, clock, "enqueue");
        queue.push_back(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProcessSpec, Segment};

    fn run(quantum: i64, specs: &[ProcessSpec]) -> (Timeline, ProcessRegistry) {
        let mut registry = ProcessRegistry::register(specs).unwrap();
        let timeline = RoundRobinScheduler::new(quantum)
            .schedule(&mut registry)
            .unwrap();
        assert!(registry.ensure_all_complete().is_ok());
        (timeline, registry)
    }

    fn completion(r: &ProcessRegistry, id: &str) -> Option<i64> {
        r.find(id).and_then(|p| p.completion_time)
    }

    #[test]
    fn test_rr_newcomer_goes_before_preempted() {
        // B arrives at 1, during A's first slice, so it runs before A resumes.
        let (t, r) = run(2, &[ProcessSpec::new("A", 5, 0), ProcessSpec::new("B", 2, 1)]);
        assert_eq!(
            t.segments(),
            &[
                Segment::busy("A", 0, 2),
                Segment::busy("B", 2, 4),
                Segment::busy("A", 4, 7),
            ]
        );
        assert_eq!(completion(&r, "A"), Some(7));
        assert_eq!(completion(&r, "B"), Some(4));
    }

    #[test]
    fn test_rr_alternation() {
        let (t, r) = run(2, &[ProcessSpec::new("A", 5, 0), ProcessSpec::new("B", 3, 1)]);
        assert_eq!(
            t.segments(),
            &[
                Segment::busy("A", 0, 2),
                Segment::busy("B", 2, 4),
                Segment::busy("A", 4, 6),
                Segment::busy("B", 6, 7),
                Segment::busy("A", 7, 8),
            ]
        );
        assert_eq!(completion(&r, "A"), Some(8));
        assert_eq!(completion(&r, "B"), Some(7));
    }

    #[test]
    fn test_rr_arrival_at_slice_end_is_admitted_first() {
        // B arrives exactly when A's slice ends: (0, 2] includes 2.
        let (t, _) = run(2, &[ProcessSpec::new("A", 4, 0), ProcessSpec::new("B", 1, 2)]);
        assert_eq!(
            t.segments(),
            &[
                Segment::busy("A", 0, 2),
                Segment::busy("B", 2, 3),
                Segment::busy("A", 3, 5),
            ]
        );
    }

    #[test]
    fn test_rr_simultaneous_arrivals_in_input_order() {
        let (t, _) = run(
            1,
            &[
                ProcessSpec::new("C", 1, 0),
                ProcessSpec::new("A", 1, 0),
                ProcessSpec::new("B", 1, 0),
            ],
        );
        let ids: Vec<_> = t
            .segments()
            .iter()
            .filter_map(|s| s.process_id.as_deref())
            .collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_rr_arrivals_within_slice_queue_by_arrival_time() {
        // C is listed before B but arrives later; both land during A's slice.
        let (t, r) = run(
            4,
            &[
                ProcessSpec::new("A", 6, 0),
                ProcessSpec::new("C", 1, 3),
                ProcessSpec::new("B", 1, 1),
            ],
        );
        assert_eq!(
            t.segments(),
            &[
                Segment::busy("A", 0, 4),
                Segment::busy("B", 4, 5),
                Segment::busy("C", 5, 6),
                Segment::busy("A", 6, 8),
            ]
        );
        assert_eq!(completion(&r, "A"), Some(8));
    }

    #[test]
    fn test_rr_same_tick_arrivals_within_slice_keep_input_order() {
        let (t, _) = run(
            4,
            &[
                ProcessSpec::new("A", 6, 0),
                ProcessSpec::new("C", 1, 2),
                ProcessSpec::new("B", 1, 2),
            ],
        );
        assert_eq!(
            t.segments(),
            &[
                Segment::busy("A", 0, 4),
                Segment::busy("C", 4, 5),
                Segment::busy("B", 5, 6),
                Segment::busy("A", 6, 8),
            ]
        );
    }

    #[test]
    fn test_rr_idle_until_next_arrival() {
        let (t, r) = run(3, &[ProcessSpec::new("A", 2, 1), ProcessSpec::new("B", 2, 6)]);
        assert_eq!(
            t.segments(),
            &[
                Segment::idle(0, 1),
                Segment::busy("A", 1, 3),
                Segment::idle(3, 6),
                Segment::busy("B", 6, 8),
            ]
        );
        assert_eq!(completion(&r, "B"), Some(8));
    }

    #[test]
    fn test_rr_large_quantum_behaves_like_fcfs() {
        let (t, _) = run(
            100,
            &[
                ProcessSpec::new("A", 5, 0),
                ProcessSpec::new("B", 3, 1),
                ProcessSpec::new("C", 2, 2),
            ],
        );
        assert_eq!(
            t.segments(),
            &[
                Segment::busy("A", 0, 5),
                Segment::busy("B", 5, 8),
                Segment::busy("C", 8, 10),
            ]
        );
    }

    #[test]
    fn test_rr_single_process_merges_slices() {
        let (t, r) = run(1, &[ProcessSpec::new("A", 4, 0)]);
        assert_eq!(t.segments(), &[Segment::busy("A", 0, 4)]);
        assert_eq!(completion(&r, "A"), Some(4));
    }

    #[test]
    fn test_rr_empty() {
        let (t, _) = run(2, &[]);
        assert!(t.is_empty());
    }
}
