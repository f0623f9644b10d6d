//! Scheduling policies, metrics and the simulation entry points.
//!
//! # Policies
//!
//! | Policy | Preemptive | Ready-set ranking |
//! |--------|-----------|-------------------|
//! | FCFS | no | arrival time, then input order |
//! | SJF | no | burst time, then arrival, then input order |
//! | Priority | no | priority (see `PriorityOrder`), then input order |
//! | Round-robin | yes | FIFO queue with a fixed quantum |
//!
//! Every policy drives a `ProcessRegistry` to completion and records a
//! `Timeline`; `MetricsCalculator` then derives per-process waiting,
//! completion and turnaround times from both.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod fcfs;
mod kpi;
mod policy;
mod round_robin;
mod selection;
mod simulation;

pub use fcfs::FcfsScheduler;
pub use kpi::{MetricsCalculator, MetricsTable, ProcessMetrics, ScheduleSummary};
pub use policy::{ParsePolicyError, Policy, PolicyInput, PolicyKind};
pub use round_robin::RoundRobinScheduler;
pub use selection::SelectionScheduler;
pub use simulation::{
    schedule_fcfs, schedule_priority, schedule_round_robin, schedule_sjf, simulate,
    SimulationOutcome, SimulationRequest, Simulator,
};

use crate::error::{InvariantError, InvariantErrorKind};

/// Moves the clock forward by `run` ticks.
fn advance(clock: i64, run: i64) -> Result<i64, InvariantError> {
    clock.checked_add(run).ok_or_else(|| {
        InvariantError::new(
            InvariantErrorKind::ClockOverflow,
            format!("Clock {clock} cannot advance by {run}"),
        )
    })
}
