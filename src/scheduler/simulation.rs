//! End-to-end simulation runs.
//!
//! # Pipeline
//!
//! 1. Validate the process list and the policy parameters, collecting
//!    every problem.
//! 2. Register the processes (fresh state per run).
//! 3. Run the policy, which drives the timeline builder.
//! 4. Finalize the timeline and derive metrics from it.
//!
//! A run yields either a complete [`SimulationOutcome`] or an error,
//! never a partial timeline.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{MetricsCalculator, MetricsTable, Policy, PolicyKind, ProcessMetrics, ScheduleSummary};
use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::models::{GanttEntry, ProcessRegistry, ProcessSpec, Timeline};
use crate::validation::validate_processes;

/// Input container for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Policy and its parameters.
    pub policy: Policy,
    /// Processes in caller order.
    pub processes: Vec<ProcessSpec>,
    /// Run settings.
    #[serde(default)]
    pub config: SimulationConfig,
}

impl SimulationRequest {
    /// Creates a request with the default configuration.
    pub fn new(policy: Policy, processes: Vec<ProcessSpec>) -> Self {
        Self {
            policy,
            processes,
            config: SimulationConfig::default(),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Parses a request from JSON.
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json).map_err(|e| SimulationError::Config(e.to_string()))
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Policy that produced the schedule.
    pub policy: PolicyKind,
    /// Execution segments, idle included.
    pub timeline: Timeline,
    /// Timing metrics keyed by process ID.
    pub metrics_by_process: MetricsTable,
    /// Whole-schedule indicators.
    pub summary: ScheduleSummary,
}

impl SimulationOutcome {
    /// Compact `{process_id, end_time}` chart.
    pub fn gantt_chart(&self) -> Vec<GanttEntry> {
        self.timeline.gantt_chart()
    }

    /// Metrics for one process.
    pub fn metrics_for(&self, id: &str) -> Option<&ProcessMetrics> {
        self.metrics_by_process.get(id)
    }

    /// Full outcome as JSON.
    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string(self).map_err(|e| SimulationError::Config(e.to_string()))
    }

    /// The `[chart, metrics]` pair consumed by the chart front end.
    pub fn to_wire_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string(&(self.gantt_chart(), &self.metrics_by_process))
            .map_err(|e| SimulationError::Config(e.to_string()))
    }
}

/// Runs policies over process lists.
///
/// # Example
///
/// ```
/// use cpu_sched::models::ProcessSpec;
/// use cpu_sched::scheduler::{Policy, Simulator};
///
/// let processes = vec![
///     ProcessSpec::new("A", 5, 0),
///     ProcessSpec::new("B", 3, 1),
/// ];
/// let outcome = Simulator::new().simulate(Policy::Fcfs, &processes).unwrap();
/// assert_eq!(outcome.timeline.makespan(), 8);
/// assert_eq!(outcome.metrics_for("B").unwrap().waiting, 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    /// Creates a simulator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator with the given configuration.
    pub fn with_config(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs `policy` over `processes`.
    ///
    /// # Errors
    /// [`SimulationError::Validation`] for bad input (before anything runs);
    /// [`SimulationError::Invariant`] if the engine breaks its own contract.
    pub fn simulate(
        &self,
        policy: Policy,
        processes: &[ProcessSpec],
    ) -> Result<SimulationOutcome, SimulationError> {
        let result = self.run(policy, processes);
        match &result {
            Ok(outcome) => debug!(
                %policy,
                processes = processes.len(),
                makespan = outcome.summary.makespan,
                "simulation finished"
            ),
            Err(SimulationError::Invariant(e)) => {
                error!(%policy, kind = ?e.kind, "{}", e.message);
            }
            Err(e) => debug!(%policy, "simulation rejected: {e}"),
        }
        result
    }

    /// Runs a request, using its own configuration.
    pub fn simulate_request(
        request: &SimulationRequest,
    ) -> Result<SimulationOutcome, SimulationError> {
        Self::with_config(request.config.clone()).simulate(request.policy, &request.processes)
    }

    fn run(
        &self,
        policy: Policy,
        processes: &[ProcessSpec],
    ) -> Result<SimulationOutcome, SimulationError> {
        let mut errors = Vec::new();
        if let Err(found) = validate_processes(processes) {
            errors.extend(found);
        }
        if let Err(found) = policy.validate(processes) {
            errors.extend(found);
        }
        if !errors.is_empty() {
            return Err(SimulationError::Validation(errors));
        }

        let mut registry = ProcessRegistry::register(processes)?;
        let timeline = policy.run(&mut registry, &self.config)?;
        let metrics_by_process = MetricsCalculator::calculate(&timeline, &registry)?;
        let summary = ScheduleSummary::calculate(&timeline, &registry, &metrics_by_process);

        Ok(SimulationOutcome {
            policy: policy.kind(),
            timeline,
            metrics_by_process,
            summary,
        })
    }
}

/// Runs `policy` with an explicit configuration.
pub fn simulate(
    policy: Policy,
    processes: &[ProcessSpec],
    config: &SimulationConfig,
) -> Result<SimulationOutcome, SimulationError> {
    Simulator::with_config(config.clone()).simulate(policy, processes)
}

/// First-come, first-served.
pub fn schedule_fcfs(processes: &[ProcessSpec]) -> Result<SimulationOutcome, SimulationError> {
    Simulator::new().simulate(Policy::Fcfs, processes)
}

/// Non-preemptive shortest job first.
pub fn schedule_sjf(processes: &[ProcessSpec]) -> Result<SimulationOutcome, SimulationError> {
    Simulator::new().simulate(Policy::Sjf, processes)
}

/// Non-preemptive priority; lower value runs first.
pub fn schedule_priority(processes: &[ProcessSpec]) -> Result<SimulationOutcome, SimulationError> {
    Simulator::new().simulate(Policy::Priority, processes)
}

/// Round-robin with the given quantum.
pub fn schedule_round_robin(
    quantum: i64,
    processes: &[ProcessSpec],
) -> Result<SimulationOutcome, SimulationError> {
    Simulator::new().simulate(Policy::RoundRobin { quantum }, processes)
}
