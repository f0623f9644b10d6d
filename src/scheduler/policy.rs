//! Policy selection.
//!
//! [`Policy`] is the closed set of scheduling strategies with their
//! parameters; [`PolicyKind`] is the bare tag a front end selects from a
//! menu, together with the extra input each policy needs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{FcfsScheduler, RoundRobinScheduler, SelectionScheduler};
use crate::config::SimulationConfig;
use crate::error::InvariantError;
use crate::models::{ProcessRegistry, ProcessSpec, Timeline};
use crate::validation::{validate_priorities, validate_quantum, ValidationResult};

/// Extra per-run input a policy needs beyond name, burst and arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyInput {
    /// Nothing else.
    None,
    /// A priority for every process.
    Priority,
    /// A round-robin time quantum.
    Quantum,
}

/// A scheduling policy tag without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// First-come, first-served.
    Fcfs,
    /// Non-preemptive shortest job first.
    Sjf,
    /// Non-preemptive static priority.
    Priority,
    /// Preemptive round-robin.
    #[serde(rename = "rr")]
    RoundRobin,
}

impl PolicyKind {
    /// All policies, in menu order.
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Fcfs,
        PolicyKind::Sjf,
        PolicyKind::Priority,
        PolicyKind::RoundRobin,
    ];

    /// Selector string (`"fcfs"`, `"sjf"`, `"priority"`, `"rr"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::Priority => "priority",
            Self::RoundRobin => "rr",
        }
    }

    /// Which extra input the policy needs from the caller.
    pub fn required_input(&self) -> PolicyInput {
        match self {
            Self::Fcfs | Self::Sjf => PolicyInput::None,
            Self::Priority => PolicyInput::Priority,
            Self::RoundRobin => PolicyInput::Quantum,
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized policy selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePolicyError(String);

impl fmt::Display for ParsePolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown scheduling policy '{}'", self.0)
    }
}

impl std::error::Error for ParsePolicyError {}

impl FromStr for PolicyKind {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "priority" => Ok(Self::Priority),
            "rr" | "round_robin" => Ok(Self::RoundRobin),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

/// A scheduling policy with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Policy {
    /// First-come, first-served.
    Fcfs,
    /// Non-preemptive shortest job first.
    Sjf,
    /// Non-preemptive static priority; ranking comes from the config.
    Priority,
    /// Round-robin with the given time slice.
    #[serde(rename = "rr")]
    RoundRobin {
        /// Maximum ticks per turn.
        quantum: i64,
    },
}

impl Policy {
    /// The parameterless tag.
    pub fn kind(&self) -> PolicyKind {
        match self {
            Self::Fcfs => PolicyKind::Fcfs,
            Self::Sjf => PolicyKind::Sjf,
            Self::Priority => PolicyKind::Priority,
            Self::RoundRobin { .. } => PolicyKind::RoundRobin,
        }
    }

    /// Builds a policy from its tag; `quantum` is used only by round-robin.
    pub fn from_kind(kind: PolicyKind, quantum: i64) -> Self {
        match kind {
            PolicyKind::Fcfs => Self::Fcfs,
            PolicyKind::Sjf => Self::Sjf,
            PolicyKind::Priority => Self::Priority,
            PolicyKind::RoundRobin => Self::RoundRobin { quantum },
        }
    }

    /// Policy-specific input checks, on top of the shared process checks.
    pub fn validate(&self, specs: &[ProcessSpec]) -> ValidationResult {
        match self {
            Self::Fcfs | Self::Sjf => Ok(()),
            Self::Priority => validate_priorities(specs),
            Self::RoundRobin { quantum } => validate_quantum(*quantum),
        }
    }

    /// Runs the policy over `registry` until every process completes.
    pub fn run(
        &self,
        registry: &mut ProcessRegistry,
        config: &SimulationConfig,
    ) -> Result<Timeline, InvariantError> {
        let timeline = match self {
            Self::Fcfs => FcfsScheduler::new().schedule(registry)?,
            Self::Sjf => SelectionScheduler::shortest_job_first().schedule(registry)?,
            Self::Priority => {
                SelectionScheduler::priority(config.priority_order).schedule(registry)?
            }
            Self::RoundRobin { quantum } => {
                RoundRobinScheduler::new(*quantum).schedule(registry)?
            }
        };
        registry.ensure_all_complete()?;
        Ok(timeline)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundRobin { quantum } => write!(f, "rr(q={quantum})"),
            other => f.write_str(other.kind().as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_parse_selectors() {
        assert_eq!("fcfs".parse::<PolicyKind>(), Ok(PolicyKind::Fcfs));
        assert_eq!("SJF".parse::<PolicyKind>(), Ok(PolicyKind::Sjf));
        assert_eq!(" priority ".parse::<PolicyKind>(), Ok(PolicyKind::Priority));
        assert_eq!("rr".parse::<PolicyKind>(), Ok(PolicyKind::RoundRobin));
        let err = "lottery".parse::<PolicyKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown scheduling policy 'lottery'");
    }

    #[test]
    fn test_selector_roundtrip() {
        for kind in PolicyKind::ALL {
            assert_eq!(kind.as_str().parse::<PolicyKind>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn test_required_input() {
        assert_eq!(PolicyKind::Fcfs.required_input(), PolicyInput::None);
        assert_eq!(PolicyKind::Sjf.required_input(), PolicyInput::None);
        assert_eq!(PolicyKind::Priority.required_input(), PolicyInput::Priority);
        assert_eq!(PolicyKind::RoundRobin.required_input(), PolicyInput::Quantum);
    }

    #[test]
    fn test_kind_and_from_kind() {
        assert_eq!(Policy::RoundRobin { quantum: 3 }.kind(), PolicyKind::RoundRobin);
        assert_eq!(
            Policy::from_kind(PolicyKind::RoundRobin, 4),
            Policy::RoundRobin { quantum: 4 }
        );
        assert_eq!(Policy::from_kind(PolicyKind::Sjf, 4), Policy::Sjf);
    }

    #[test]
    fn test_policy_validation() {
        let specs = vec![ProcessSpec::new("A", 1, 0)];
        assert!(Policy::Fcfs.validate(&specs).is_ok());
        assert_eq!(
            Policy::Priority.validate(&specs).unwrap_err()[0].kind,
            ValidationErrorKind::MissingPriority
        );
        assert_eq!(
            Policy::RoundRobin { quantum: 0 }.validate(&specs).unwrap_err()[0].kind,
            ValidationErrorKind::NonPositiveQuantum
        );
    }

    #[test]
    fn test_policy_serde() {
        let json = serde_json::to_string(&Policy::RoundRobin { quantum: 2 }).unwrap();
        assert_eq!(json, r#"{"kind":"rr","quantum":2}"#);
        let parsed: Policy = serde_json::from_str(r#"{"kind":"priority"}"#).unwrap();
        assert_eq!(parsed, Policy::Priority);
        assert_eq!(serde_json::to_string(&PolicyKind::Sjf).unwrap(), r#""sjf""#);
    }

    #[test]
    fn test_display() {
        assert_eq!(Policy::Fcfs.to_string(), "fcfs");
        assert_eq!(Policy::RoundRobin { quantum: 2 }.to_string(), "rr(q=2)");
    }
}
