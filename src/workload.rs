//! Random workload generation.
//!
//! Produces reproducible process lists for demos and for checking
//! schedule properties over many inputs. The same parameters and seed
//! always yield the same processes.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::ProcessSpec;

/// Parameters for a random process list.
///
/// Ranges are inclusive. IDs are `P1`, `P2`, … in generation order.
///
/// # Example
/// ```
/// use cpu_sched::workload::WorkloadGenerator;
///
/// let processes = WorkloadGenerator::new(5)
///     .with_bursts(1, 4)
///     .with_arrivals(0, 10)
///     .with_seed(42)
///     .generate();
/// assert_eq!(processes.len(), 5);
/// assert!(processes.iter().all(|p| (1..=4).contains(&p.burst_time)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadGenerator {
    /// Number of processes.
    pub count: usize,
    /// Burst time range (clamped to at least 1).
    pub burst_range: (i64, i64),
    /// Arrival time range (clamped to at least 0).
    pub arrival_range: (i64, i64),
    /// Priority range; `None` leaves priorities unset.
    pub priority_range: Option<(i32, i32)>,
    /// RNG seed.
    pub seed: u64,
}

impl WorkloadGenerator {
    /// Creates a generator for `count` processes with small default ranges.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            burst_range: (1, 10),
            arrival_range: (0, 10),
            priority_range: None,
            seed: 0,
        }
    }

    /// Sets the burst time range.
    pub fn with_bursts(mut self, min: i64, max: i64) -> Self {
        self.burst_range = (min, max);
        self
    }

    /// Sets the arrival time range.
    pub fn with_arrivals(mut self, min: i64, max: i64) -> Self {
        self.arrival_range = (min, max);
        self
    }

    /// Gives every process a priority from the range.
    pub fn with_priorities(mut self, min: i32, max: i32) -> Self {
        self.priority_range = Some((min, max));
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generates the process list from the configured seed.
    pub fn generate(&self) -> Vec<ProcessSpec> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        self.generate_with(&mut rng)
    }

    /// Generates the process list from a caller-supplied RNG.
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> Vec<ProcessSpec> {
        let (burst_lo, burst_hi) = ordered(self.burst_range, 1);
        let (arrival_lo, arrival_hi) = ordered(self.arrival_range, 0);

        (1..=self.count)
            .map(|n| {
                let spec = ProcessSpec::new(
                    format!("P{n}"),
                    rng.random_range(burst_lo..=burst_hi),
                    rng.random_range(arrival_lo..=arrival_hi),
                );
                match self.priority_range {
                    Some((a, b)) => spec.with_priority(rng.random_range(a.min(b)..=a.max(b))),
                    None => spec,
                }
            })
            .collect()
    }
}

/// Sorts a range and raises both ends to at least `floor`.
fn ordered((a, b): (i64, i64), floor: i64) -> (i64, i64) {
    (a.min(b).max(floor), a.max(b).max(floor))
}
