//! Error types returned by simulation runs.
//!
//! Two failure families exist. [`ValidationError`]s describe bad caller
//! input and are raised before the first simulation step. [`InvariantError`]s
//! describe a broken internal contract (an engine defect) and abort the run.

use std::fmt;

use crate::validation::ValidationError;

/// An internal contract violation detected during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError {
    /// Error category.
    pub kind: InvariantErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of invariant violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantErrorKind {
    /// A segment does not start where the previous one ended.
    NonContiguousSegment,
    /// A segment with `start >= end`.
    EmptySegment,
    /// A process was run for a non-positive slice or past its remaining time.
    RunOverrun,
    /// A completion time was recorded twice, or before the burst was done.
    AlreadyCompleted,
    /// The run ended with a process that never completed.
    IncompleteProcess,
    /// Timeline and registry disagree about a process.
    MetricMismatch,
    /// The simulation clock would overflow.
    ClockOverflow,
}

impl InvariantError {
    pub(crate) fn new(kind: InvariantErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scheduler invariant violated ({:?}): {}", self.kind, self.message)
    }
}

impl std::error::Error for InvariantError {}

/// Error returned by the public scheduling operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// The input was rejected; contains every problem found.
    Validation(Vec<ValidationError>),
    /// The engine broke one of its own contracts.
    Invariant(InvariantError),
    /// A configuration document could not be parsed.
    Config(String),
}

impl SimulationError {
    /// Validation errors, if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            Self::Validation(errors) => Some(errors.as_slice()),
            _ => None,
        }
    }

    /// Whether the failure was caused by caller input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(errors) => {
                f.write_str("invalid input: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{e}")?;
                }
                Ok(())
            }
            Self::Invariant(e) => write!(f, "{e}"),
            Self::Config(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Invariant(e) => Some(e),
            Self::Validation(errors) => errors
                .first()
                .map(|e| e as &(dyn std::error::Error + 'static)),
            Self::Config(_) => None,
        }
    }
}

impl From<Vec<ValidationError>> for SimulationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

impl From<InvariantError> for SimulationError {
    fn from(error: InvariantError) -> Self {
        Self::Invariant(error)
    }
}
