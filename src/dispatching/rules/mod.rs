//! Built-in selection rules.
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.

use super::{DispatchingRule, RuleScore};
use crate::config::PriorityOrder;
use crate::models::Process;

/// First come, first served.
///
/// Ranks by arrival time.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalTime;

impl DispatchingRule for ArrivalTime {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        process.arrival_time
    }

    fn description(&self) -> &'static str {
        "First Come First Served"
    }
}

/// Shortest job first.
///
/// Ranks by total burst time, not by remaining time: a process that has
/// already run is not favoured over a fresh one of the same length.
#[derive(Debug, Clone, Copy)]
pub struct ShortestBurst;

impl DispatchingRule for ShortestBurst {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        process.burst_time
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Static priority.
///
/// Processes without a priority rank last.
#[derive(Debug, Clone, Copy, Default)]
pub struct Priority {
    /// Which end of the numeric range wins.
    pub order: PriorityOrder,
}

impl Priority {
    /// Creates a priority rule with the given ranking.
    pub fn new(order: PriorityOrder) -> Self {
        Self { order }
    }
}

impl DispatchingRule for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        match (process.priority, self.order) {
            (None, _) => RuleScore::MAX,
            (Some(p), PriorityOrder::LowerFirst) => RuleScore::from(p),
            (Some(p), PriorityOrder::HigherFirst) => -RuleScore::from(p),
        }
    }

    fn description(&self) -> &'static str {
        "Static Priority"
    }
}
