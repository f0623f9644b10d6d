//! Input validation for scheduling runs.
//!
//! Checks process specs and policy parameters before any simulation step,
//! so a run either starts from consistent input or never starts. Detects:
//! - Duplicate process IDs
//! - Non-positive burst times
//! - Negative arrival times
//! - Missing priorities (priority policy only)
//! - Non-positive round-robin quantum
//! - Schedules whose end time would not fit in an `i64`
//!
//! Every check reports all problems it finds rather than stopping at the
//! first one.

use std::collections::HashSet;
use std::fmt;

use crate::models::ProcessSpec;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same ID.
    DuplicateId,
    /// A process has `burst_time <= 0`.
    NonPositiveBurst,
    /// A process has `arrival_time < 0`.
    NegativeArrival,
    /// The priority policy was requested for a process without a priority.
    MissingPriority,
    /// Round-robin quantum is zero or negative.
    NonPositiveQuantum,
    /// Latest arrival plus total burst time does not fit in an `i64`.
    TimeOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates the process list shared by every policy.
///
/// Checks:
/// 1. No duplicate IDs
/// 2. Every `burst_time > 0`
/// 3. Every `arrival_time >= 0`
/// 4. `max(arrival) + sum(burst)` fits in an `i64`, which bounds every
///    clock value a policy can reach
///
/// An empty list is valid and yields an empty schedule.
pub fn validate_processes(specs: &[ProcessSpec]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for spec in specs {
        if !ids.insert(spec.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", spec.id),
            ));
        }

        if spec.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!(
                    "Process '{}' has non-positive burst time {}",
                    spec.id, spec.burst_time
                ),
            ));
        }

        if spec.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!(
                    "Process '{}' has negative arrival time {}",
                    spec.id, spec.arrival_time
                ),
            ));
        }
    }

    if schedule_horizon(specs).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            "Latest arrival plus total burst time overflows the clock",
        ));
    }

    finish(errors)
}

/// Upper bound on the end of any schedule for `specs`.
///
/// The CPU only idles while nothing has arrived, so no policy can finish
/// later than the last arrival plus all the work.
fn schedule_horizon(specs: &[ProcessSpec]) -> Option<i64> {
    let latest_arrival = specs.iter().map(|s| s.arrival_time.max(0)).max().unwrap_or(0);
    specs
        .iter()
        .try_fold(latest_arrival, |acc, s| acc.checked_add(s.burst_time.max(0)))
}

/// Validates that every process carries a priority.
pub fn validate_priorities(specs: &[ProcessSpec]) -> ValidationResult {
    let errors = specs
        .iter()
        .filter(|spec| spec.priority.is_none())
        .map(|spec| {
            ValidationError::new(
                ValidationErrorKind::MissingPriority,
                format!("Process '{}' has no priority", spec.id),
            )
        })
        .collect();

    finish(errors)
}

/// Validates a round-robin time quantum.
pub fn validate_quantum(quantum: i64) -> ValidationResult {
    if quantum <= 0 {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::NonPositiveQuantum,
            format!("Quantum must be positive, got {quantum}"),
        )]);
    }
    Ok(())
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
