//! First-come, first-served scheduler.
//!
//! # Algorithm
//!
//! 1. Sort processes by arrival time (input order on ties).
//! 2. Walk the sorted list with a clock starting at 0.
//! 3. If the clock lags the next arrival, record idle time up to it.
//! 4. Run the process to completion and advance the clock.
//!
//! # Complexity
//! O(n log n) for the sort, O(n) for the walk.

use tracing::debug;

use super::advance;
use crate::dispatching::{rules, RuleEngine};
use crate::error::InvariantError;
use crate::models::{ProcessRegistry, Timeline, TimelineBuilder};

/// Non-preemptive FCFS.
#[derive(Debug, Clone)]
pub struct FcfsScheduler {
    engine: RuleEngine,
}

impl FcfsScheduler {
    /// Creates the scheduler.
    pub fn new() -> Self {
        Self {
            engine: RuleEngine::new().with_rule(rules::ArrivalTime),
        }
    }

    /// Runs every process in `registry` to completion.
    pub fn schedule(&self, registry: &mut ProcessRegistry) -> Result<Timeline, InvariantError> {
        let order = self.engine.sort_indices(registry.snapshot());
        let mut builder = TimelineBuilder::new();
        let mut clock = 0;

        for idx in order {
            let arrival = registry[idx].arrival_time;
            if clock < arrival {
                debug!(start = clock, end = arrival, "cpu idle");
                builder.append_idle(clock, arrival)?;
                clock = arrival;
            }

            let burst = registry[idx].remaining_time;
            let end = advance(clock, burst)?;
            debug!(process = %registry[idx].id, start = clock, end, "dispatch");
            builder.append_busy(&registry[idx].id, clock, end)?;
            registry.execute(idx, burst)?;
            registry.complete(idx, end)?;
            clock = end;
        }

        Ok(builder.finalize())
    }
}

impl Default for FcfsScheduler {
    fn default() -> Self {
        Self::new()
    }
}
