//! Execution timeline (Gantt chart) model.
//!
//! A timeline is the ordered list of intervals the CPU spent on each
//! process, with idle intervals recorded explicitly. Segments tile
//! `[0, makespan)` with no gaps and no overlaps.
//!
//! [`TimelineBuilder`] enforces contiguity while a policy runs;
//! [`TimelineBuilder::finalize`] consumes the builder, so a finished
//! [`Timeline`] can no longer be appended to.

use serde::{Deserialize, Serialize};

use crate::error::{InvariantError, InvariantErrorKind};

/// A contiguous interval attributed to one process or to CPU idle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Running process, or `None` while the CPU is idle.
    pub process_id: Option<String>,
    /// Start time (inclusive).
    pub start_time: i64,
    /// End time (exclusive).
    pub end_time: i64,
}

impl Segment {
    /// Creates a busy segment.
    pub fn busy(process_id: impl Into<String>, start_time: i64, end_time: i64) -> Self {
        Self {
            process_id: Some(process_id.into()),
            start_time,
            end_time,
        }
    }

    /// Creates an idle segment.
    pub fn idle(start_time: i64, end_time: i64) -> Self {
        Self {
            process_id: None,
            start_time,
            end_time,
        }
    }

    /// Length of the interval.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end_time - self.start_time
    }

    /// Whether this is CPU idle time.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.process_id.is_none()
    }

    /// Whether this segment belongs to process `id`.
    #[inline]
    pub fn is_for(&self, id: &str) -> bool {
        self.process_id.as_deref() == Some(id)
    }
}

/// Compact Gantt entry: the start is implied by the previous entry's end
/// (or 0 for the first entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttEntry {
    /// Running process, `null` for idle.
    pub process_id: Option<String>,
    /// End of the interval.
    pub end_time: i64,
}

/// Append-only builder that keeps segments contiguous.
///
/// # Example
/// ```
/// use cpu_sched::models::TimelineBuilder;
///
/// let mut builder = TimelineBuilder::new();
/// builder.append_idle(0, 2).unwrap();
/// builder.append_busy("A", 2, 4).unwrap();
/// builder.append_busy("A", 4, 5).unwrap(); // merged into A[2,5)
/// let timeline = builder.finalize();
/// assert_eq!(timeline.len(), 2);
/// assert_eq!(timeline.makespan(), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimelineBuilder {
    segments: Vec<Segment>,
}

impl TimelineBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// End of the last appended segment (0 when empty).
    pub fn current_end(&self) -> i64 {
        self.segments.last().map(|s| s.end_time).unwrap_or(0)
    }

    /// Appends `[start, end)` for `process_id`.
    ///
    /// Merges with the previous segment when it belongs to the same process.
    pub fn append_busy(
        &mut self,
        process_id: &str,
        start: i64,
        end: i64,
    ) -> Result<(), InvariantError> {
        self.append(Some(process_id), start, end)
    }

    /// Appends idle time `[start, end)`.
    pub fn append_idle(&mut self, start: i64, end: i64) -> Result<(), InvariantError> {
        self.append(None, start, end)
    }

    /// Seals the builder into an immutable timeline.
    pub fn finalize(self) -> Timeline {
        Timeline {
            segments: self.segments,
        }
    }

    fn append(
        &mut self,
        process_id: Option<&str>,
        start: i64,
        end: i64,
    ) -> Result<(), InvariantError> {
        let expected = self.current_end();
        if start != expected {
            return Err(InvariantError::new(
                InvariantErrorKind::NonContiguousSegment,
                format!("Segment starts at {start}, expected {expected}"),
            ));
        }
        if start >= end {
            return Err(InvariantError::new(
                InvariantErrorKind::EmptySegment,
                format!("Segment [{start}, {end}) has no length"),
            ));
        }

        if let Some(last) = self.segments.last_mut() {
            if last.process_id.as_deref() == process_id {
                last.end_time = end;
                return Ok(());
            }
        }

        self.segments.push(Segment {
            process_id: process_id.map(str::to_owned),
            start_time: start,
            end_time: end,
        });
        Ok(())
    }
}

/// A finished, immutable execution timeline.
///
/// Serializes as a plain segment array. Deserializing replays the array
/// through [`TimelineBuilder`], so malformed input is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Segment>", into = "Vec<Segment>")]
pub struct Timeline {
    segments: Vec<Segment>,
}

impl TryFrom<Vec<Segment>> for Timeline {
    type Error = InvariantError;

    fn try_from(segments: Vec<Segment>) -> Result<Self, Self::Error> {
        let mut builder = TimelineBuilder::new();
        for s in segments {
            builder.append(s.process_id.as_deref(), s.start_time, s.end_time)?;
        }
        Ok(builder.finalize())
    }
}

impl From<Timeline> for Vec<Segment> {
    fn from(timeline: Timeline) -> Self {
        timeline.segments
    }
}

impl Timeline {
    /// Segments in time order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether nothing was scheduled.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// End of the last segment.
    pub fn makespan(&self) -> i64 {
        self.segments.last().map(|s| s.end_time).unwrap_or(0)
    }

    /// Total busy time across all processes.
    pub fn busy_time(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| !s.is_idle())
            .map(Segment::duration)
            .sum()
    }

    /// Total idle time.
    pub fn idle_time(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| s.is_idle())
            .map(Segment::duration)
            .sum()
    }

    /// CPU time given to process `id`.
    pub fn busy_time_for(&self, id: &str) -> i64 {
        self.segments
            .iter()
            .filter(|s| s.is_for(id))
            .map(Segment::duration)
            .sum()
    }

    /// End of the last segment of process `id`.
    pub fn completion_of(&self, id: &str) -> Option<i64> {
        self.segments
            .iter()
            .rev()
            .find(|s| s.is_for(id))
            .map(|s| s.end_time)
    }

    /// Start of the first segment of process `id`.
    pub fn first_start_of(&self, id: &str) -> Option<i64> {
        self.segments
            .iter()
            .find(|s| s.is_for(id))
            .map(|s| s.start_time)
    }

    /// Number of times the CPU switched directly from one process to another.
    ///
    /// Transitions through idle time are not counted.
    pub fn context_switches(&self) -> usize {
        self.segments
            .windows(2)
            .filter(|w| !w[0].is_idle() && !w[1].is_idle())
            .count()
    }

    /// Compact `{process_id, end_time}` form of the chart.
    pub fn gantt_chart(&self) -> Vec<GanttEntry> {
        self.segments
            .iter()
            .map(|s| GanttEntry {
                process_id: s.process_id.clone(),
                end_time: s.end_time,
            })
            .collect()
    }
}
