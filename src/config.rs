//! Simulation settings.
//!
//! Settings that change how a policy interprets its input rather than the
//! input itself. Serializable so a front end can persist or ship them as
//! JSON.

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// How numeric priorities are ranked by the priority policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityOrder {
    /// Smaller value runs first (priority 1 beats priority 2).
    #[default]
    LowerFirst,
    /// Larger value runs first.
    HigherFirst,
}

/// Settings for one simulation run.
///
/// # Example
/// ```
/// use cpu_sched::config::{PriorityOrder, SimulationConfig};
///
/// let config = SimulationConfig::from_json(r#"{"priority_order": "higher_first"}"#).unwrap();
/// assert_eq!(config.priority_order, PriorityOrder::HigherFirst);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Ranking used by the priority policy.
    pub priority_order: PriorityOrder,
}

impl SimulationConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the priority ranking.
    pub fn with_priority_order(mut self, order: PriorityOrder) -> Self {
        self.priority_order = order;
        self
    }

    /// Parses a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json).map_err(|e| SimulationError::Config(e.to_string()))
    }

    /// Serializes to a JSON document.
    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string(self).map_err(|e| SimulationError::Config(e.to_string()))
    }
}
