//! Selection-based non-preemptive scheduler (SJF and priority).
//!
//! # Algorithm
//!
//! At each decision point:
//! 1. Collect the ready set: arrived and unfinished processes.
//! 2. If it is empty, record idle time up to the next arrival.
//! 3. Otherwise pick the best ready process with the rule engine and run
//!    it to completion. Arrivals during the run never interrupt it.
//!
//! SJF ranks by burst time and priority scheduling by static priority;
//! both break ties by arrival time and then by input order.
//!
//! # Complexity
//! O(n²): one linear scan of the ready set per dispatch.

use tracing::debug;

use super::advance;
use crate::config::PriorityOrder;
use crate::dispatching::{rules, RuleEngine};
use crate::error::{InvariantError, InvariantErrorKind};
use crate::models::{ProcessRegistry, Timeline, TimelineBuilder};

/// Non-preemptive scheduler driven by a rule chain.
#[derive(Debug, Clone)]
pub struct SelectionScheduler {
    engine: RuleEngine,
}

impl SelectionScheduler {
    /// Uses a custom rule chain. Input order is always the final tie-breaker.
    pub fn with_engine(engine: RuleEngine) -> Self {
        Self { engine }
    }

    /// Shortest job first (non-preemptive).
    pub fn shortest_job_first() -> Self {
        Self::with_engine(
            RuleEngine::new()
                .with_rule(rules::ShortestBurst)
                .with_tie_breaker(rules::ArrivalTime),
        )
    }

    /// Static priority (non-preemptive).
    pub fn priority(order: PriorityOrder) -> Self {
        Self::with_engine(
            RuleEngine::new()
                .with_rule(rules::Priority::new(order))
                .with_tie_breaker(rules::ArrivalTime),
        )
    }

    /// Runs every process in `registry` to completion.
    pub fn schedule(&self, registry: &mut ProcessRegistry) -> Result<Timeline, InvariantError> {
        let mut builder = TimelineBuilder::new();
        let mut clock = 0;

        while !registry.all_complete() {
            let ready = registry.ready_at(clock);
            let Some(idx) = self.engine.select_best(registry.snapshot(), &ready) else {
                let next = registry.next_arrival_after(clock).ok_or_else(|| {
                    InvariantError::new(
                        InvariantErrorKind::IncompleteProcess,
                        format!("Nothing ready or pending at {clock} but work remains"),
                    )
                })?;
                debug!(start = clock, end = next, "cpu idle");
                builder.append_idle(clock, next)?;
                clock = next;
                continue;
            };

            let run = registry[idx].remaining_time;
            let end = advance(clock, run)?;
            debug!(
                process = %registry[idx].id,
                start = clock,
                end,
                ready = ready.len(),
                "dispatch"
            );
            builder.append_busy(&registry[idx].id, clock, end)?;
            registry.execute(idx, run)?;
            registry.complete(idx, end)?;
            clock = end;
        }

        Ok(builder.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProcessSpec, Segment};

    fn run(scheduler: &SelectionScheduler, specs: &[ProcessSpec]) -> Timeline {
        let mut registry = ProcessRegistry::register(specs).unwrap();
        let timeline = scheduler.schedule(&mut registry).unwrap();
        assert!(registry.ensure_all_complete().is_ok());
        timeline
    }

    #[test]
    fn test_sjf_is_non_preemptive() {
        // A runs to 7 even though shorter B and C arrive meanwhile
        let t = run(
            &SelectionScheduler::shortest_job_first(),
            &[
                ProcessSpec::new("A", 7, 0),
                ProcessSpec::new("B", 4, 2),
                ProcessSpec::new("C", 1, 4),
            ],
        );
        assert_eq!(
            t.segments(),
            &[
                Segment::busy("A", 0, 7),
                Segment::busy("C", 7, 8),
                Segment::busy("B", 8, 12),
            ]
        );
    }

    #[test]
    fn test_sjf_tie_by_arrival_then_input() {
        let t = run(
            &SelectionScheduler::shortest_job_first(),
            &[
                ProcessSpec::new("long", 4, 0),
                ProcessSpec::new("b", 2, 2),
                ProcessSpec::new("a", 2, 1),
                ProcessSpec::new("c", 2, 1),
            ],
        );
        // At t=4: a(arr 1), c(arr 1), b(arr 2) all burst 2 → a, c, b
        let ids: Vec<_> = t
            .segments()
            .iter()
            .filter_map(|s| s.process_id.as_deref())
            .collect();
        assert_eq!(ids, vec!["long", "a", "c", "b"]);
    }

    #[test]
    fn test_sjf_idle_gap() {
        let t = run(
            &SelectionScheduler::shortest_job_first(),
            &[ProcessSpec::new("A", 2, 0), ProcessSpec::new("B", 1, 5)],
        );
        assert_eq!(
            t.segments(),
            &[
                Segment::busy("A", 0, 2),
                Segment::idle(2, 5),
                Segment::busy("B", 5, 6),
            ]
        );
    }

    #[test]
    fn test_priority_lower_value_first() {
        let t = run(
            &SelectionScheduler::priority(PriorityOrder::LowerFirst),
            &[
                ProcessSpec::new("A", 5, 0).with_priority(2),
                ProcessSpec::new("B", 3, 0).with_priority(1),
            ],
        );
        assert_eq!(
            t.segments(),
            &[Segment::busy("B", 0, 3), Segment::busy("A", 3, 8)]
        );
    }

    #[test]
    fn test_priority_higher_value_first() {
        let t = run(
            &SelectionScheduler::priority(PriorityOrder::HigherFirst),
            &[
                ProcessSpec::new("A", 5, 0).with_priority(2),
                ProcessSpec::new("B", 3, 0).with_priority(1),
            ],
        );
        assert_eq!(
            t.segments(),
            &[Segment::busy("A", 0, 5), Segment::busy("B", 5, 8)]
        );
    }

    #[test]
    fn test_priority_does_not_preempt() {
        let t = run(
            &SelectionScheduler::priority(PriorityOrder::LowerFirst),
            &[
                ProcessSpec::new("low", 4, 0).with_priority(9),
                ProcessSpec::new("high", 2, 1).with_priority(0),
            ],
        );
        assert_eq!(
            t.segments(),
            &[Segment::busy("low", 0, 4), Segment::busy("high", 4, 6)]
        );
    }

    #[test]
    fn test_consecutive_runs_of_distinct_processes_stay_separate() {
        let t = run(
            &SelectionScheduler::shortest_job_first(),
            &[ProcessSpec::new("A", 1, 0), ProcessSpec::new("B", 1, 0)],
        );
        assert_eq!(t.len(), 2);
    }
}
