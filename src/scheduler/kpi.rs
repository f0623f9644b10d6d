//! Per-process timing metrics and schedule summary.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Completion | Time the last slice of the process ends |
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - burst |
//! | Response | first dispatch - arrival (summary only) |
//!
//! Metrics are read from a finalized timeline and cross-checked against
//! the registry; any disagreement is an engine defect.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{InvariantError, InvariantErrorKind};
use crate::models::{ProcessRegistry, Timeline};

/// Timing results for one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Time spent ready but not running.
    pub waiting: i64,
    /// Time the process finished.
    pub completion: i64,
    /// Time from arrival to completion.
    pub turnaround: i64,
}

/// Metrics keyed by process ID.
pub type MetricsTable = BTreeMap<String, ProcessMetrics>;

/// Derives [`ProcessMetrics`] from a finished run.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Computes metrics for every registered process.
    ///
    /// # Errors
    /// Fails if a process never completed, if its completion time differs
    /// from the end of its last segment, if the CPU time it received differs
    /// from its burst, or if its waiting time would be negative.
    pub fn calculate(
        timeline: &Timeline,
        registry: &ProcessRegistry,
    ) -> Result<MetricsTable, InvariantError> {
        let mut table = MetricsTable::new();

        for process in registry.snapshot() {
            let completion = process.completion_time.ok_or_else(|| {
                InvariantError::new(
                    InvariantErrorKind::IncompleteProcess,
                    format!("Process '{}' has no completion time", process.id),
                )
            })?;

            if timeline.completion_of(&process.id) != Some(completion) {
                return Err(mismatch(format!(
                    "Process '{}' completed at {} but its last segment ends at {:?}",
                    process.id,
                    completion,
                    timeline.completion_of(&process.id)
                )));
            }

            let executed = timeline.busy_time_for(&process.id);
            if executed != process.executed_time() || executed != process.burst_time {
                return Err(mismatch(format!(
                    "Process '{}' ran {} ticks on the timeline, {} in the registry, burst is {}",
                    process.id,
                    executed,
                    process.executed_time(),
                    process.burst_time
                )));
            }

            let turnaround = completion - process.arrival_time;
            let waiting = turnaround - process.burst_time;
            if waiting < 0 {
                return Err(mismatch(format!(
                    "Process '{}' has negative waiting time {}",
                    process.id, waiting
                )));
            }

            table.insert(
                process.id.clone(),
                ProcessMetrics {
                    waiting,
                    completion,
                    turnaround,
                },
            );
        }

        Ok(table)
    }
}

fn mismatch(message: String) -> InvariantError {
    InvariantError::new(InvariantErrorKind::MetricMismatch, message)
}

/// Whole-schedule performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// End of the last segment.
    pub makespan: i64,
    /// Total time the CPU ran a process.
    pub busy_time: i64,
    /// Total time the CPU was idle.
    pub idle_time: i64,
    /// busy_time / makespan (0.0..1.0).
    pub cpu_utilization: f64,
    /// Mean waiting time.
    pub avg_waiting: f64,
    /// Mean turnaround time.
    pub avg_turnaround: f64,
    /// Mean time from arrival to first dispatch.
    pub avg_response: f64,
    /// Completed processes per tick.
    pub throughput: f64,
    /// Direct process-to-process switches.
    pub context_switches: usize,
}

impl ScheduleSummary {
    /// Computes the summary of a finished run.
    pub fn calculate(
        timeline: &Timeline,
        registry: &ProcessRegistry,
        metrics: &MetricsTable,
    ) -> Self {
        let makespan = timeline.makespan();
        let busy_time = timeline.busy_time();
        let count = metrics.len();

        // Totals can exceed the i64 range even when each term fits.
        let mean = |total: f64| {
            if count == 0 {
                0.0
            } else {
                total / count as f64
            }
        };

        let total_waiting: f64 = metrics.values().map(|m| m.waiting as f64).sum();
        let total_turnaround: f64 = metrics.values().map(|m| m.turnaround as f64).sum();
        let total_response: f64 = registry
            .snapshot()
            .iter()
            .filter_map(|p| timeline.first_start_of(&p.id).map(|s| (s - p.arrival_time) as f64))
            .sum();

        let (cpu_utilization, throughput) = if makespan > 0 {
            (
                busy_time as f64 / makespan as f64,
                count as f64 / makespan as f64,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            makespan,
            busy_time,
            idle_time: timeline.idle_time(),
            cpu_utilization,
            avg_waiting: mean(total_waiting),
            avg_turnaround: mean(total_turnaround),
            avg_response: mean(total_response),
            throughput,
            context_switches: timeline.context_switches(),
        }
    }
}
