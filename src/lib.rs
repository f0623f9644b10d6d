//! Single-CPU process scheduling simulator.
//!
//! Given a list of processes (id, burst time, arrival time and, for
//! priority scheduling, a priority), produces the execution timeline a
//! classic CPU scheduling policy would yield, together with per-process
//! waiting, completion and turnaround times.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProcessSpec`, `Process`, `ProcessRegistry`,
//!   `Segment`, `Timeline`, `TimelineBuilder`
//! - **`dispatching`**: Rule engine that ranks ready processes (arrival, burst, priority)
//! - **`scheduler`**: FCFS, SJF, priority and round-robin policies, metrics, and
//!   the `Simulator` entry point
//! - **`validation`**: Input integrity checks (duplicate IDs, bursts, arrivals,
//!   priorities, quantum)
//! - **`config`**: Run settings loaded from JSON
//! - **`error`**: Engine invariant violations and the top-level error type
//! - **`workload`**: Seeded random process lists
//!
//! # Example
//!
//! ```
//! use cpu_sched::{schedule_round_robin, ProcessSpec};
//!
//! let processes = vec![ProcessSpec::new("A", 5, 0), ProcessSpec::new("B", 2, 1)];
//! let outcome = schedule_round_robin(2, &processes).unwrap();
//!
//! let chart: Vec<_> = outcome
//!     .timeline
//!     .segments()
//!     .iter()
//!     .map(|s| (s.process_id.as_deref(), s.start_time, s.end_time))
//!     .collect();
//! assert_eq!(chart, vec![(Some("A"), 0, 2), (Some("B"), 2, 4), (Some("A"), 4, 7)]);
//! assert_eq!(outcome.metrics_for("B").unwrap().turnaround, 3);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use config::{PriorityOrder, SimulationConfig};
pub use error::SimulationError;
pub use models::ProcessSpec;
pub use scheduler::{
    schedule_fcfs, schedule_priority, schedule_round_robin, schedule_sjf, simulate, Policy,
    PolicyKind, SimulationOutcome,
};
