//! Simulation domain models.
//!
//! Provides the data types a scheduling run reads and produces: the
//! caller's process descriptions, the per-run mutable process state, and
//! the resulting execution timeline.
//!
//! # Lifecycle
//!
//! | Type | Role |
//! |------|------|
//! | `ProcessSpec` | Caller input: id, burst, arrival, optional priority |
//! | `Process` | Per-run state: remaining time, completion time |
//! | `ProcessRegistry` | Index-addressable owner of all `Process` values for one run |
//! | `TimelineBuilder` | Append-only, coalescing segment recorder |
//! | `Timeline` | Finalized, read-only list of `Segment`s |

mod process;
mod registry;
mod timeline;

pub use process::{Process, ProcessSpec};
pub use registry::ProcessRegistry;
pub use timeline::{GanttEntry, Segment, Timeline, TimelineBuilder};
