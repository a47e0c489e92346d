//! Engine telemetry.
//!
//! Generation and analysis report progress through an [`EventSink`]
//! passed in by the caller instead of writing to a fixed stream.
//! [`TracingSink`] forwards events to `tracing`; [`RecordingSink`]
//! keeps them in memory.

use std::fmt;

use tracing::{debug, info, warn};

/// Engine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Empty grid construction.
    BuildGrid,
    /// Constraint application (pins, blocked cells, availability).
    ApplyConstraints,
    /// Cell filling.
    Fill,
    /// Conflict scan and aggregation.
    Analyze,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::BuildGrid => "build_grid",
            Phase::ApplyConstraints => "apply_constraints",
            Phase::Fill => "fill",
            Phase::Analyze => "analyze",
        };
        f.write_str(name)
    }
}

/// Why a cell was left empty during filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The density draw chose not to fill.
    Density,
    /// A blocked-cell constraint covers the cell.
    Blocked,
    /// No teacher is free for the cell.
    NoTeacher,
    /// No room is free for the cell.
    NoRoom,
}

/// A telemetry event.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A phase started.
    PhaseStarted(Phase),
    /// A phase finished; `cells` is the number of cells it touched.
    PhaseFinished { phase: Phase, cells: usize },
    /// A pinned assignment was written.
    CellPinned { time: String, day: String },
    /// A generated assignment was written.
    CellFilled {
        time: String,
        day: String,
        teacher: String,
        room: String,
    },
    /// A cell was left empty.
    CellSkipped {
        time: String,
        day: String,
        reason: SkipReason,
    },
    /// Analysis found a double-booking.
    ConflictFound { resource: String, time: String, day: String },
}

/// Receives engine events.
pub trait EventSink {
    /// Handles one event.
    fn record(&mut self, event: EngineEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::PhaseStarted(phase) => debug!(%phase, "phase started"),
            EngineEvent::PhaseFinished { phase, cells } => info!(%phase, cells, "phase finished"),
            EngineEvent::CellPinned { time, day } => debug!(%time, %day, "cell pinned"),
            EngineEvent::CellFilled {
                time,
                day,
                teacher,
                room,
            } => debug!(%time, %day, %teacher, %room, "cell filled"),
            EngineEvent::CellSkipped { time, day, reason } => {
                debug!(%time, %day, ?reason, "cell skipped")
            }
            EngineEvent::ConflictFound {
                resource,
                time,
                day,
            } => warn!(%resource, %time, %day, "double-booking detected"),
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    /// Events in arrival order.
    pub events: Vec<EngineEvent>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `CellFilled` events.
    pub fn filled(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, EngineEvent::CellFilled { .. }))
            .count()
    }

    /// Number of `CellSkipped` events with the given reason.
    pub fn skipped(&self, reason: SkipReason) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, EngineEvent::CellSkipped { reason: r, .. } if *r == reason))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn record(&mut self, event: EngineEvent) {
        self.events.push(event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: EngineEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_counts() {
        let mut sink = RecordingSink::new();
        sink.record(EngineEvent::PhaseStarted(Phase::Fill));
        sink.record(EngineEvent::CellFilled {
            time: "9-10".into(),
            day: "Mon".into(),
            teacher: "T1".into(),
            room: "R1".into(),
        });
        sink.record(EngineEvent::CellSkipped {
            time: "9-10".into(),
            day: "Tue".into(),
            reason: SkipReason::NoTeacher,
        });

        assert_eq!(sink.events.len(), 3);
        assert_eq!(sink.filled(), 1);
        assert_eq!(sink.skipped(SkipReason::NoTeacher), 1);
        assert_eq!(sink.skipped(SkipReason::Density), 0);
    }

    #[test]
    fn test_null_sink_drives_analysis() {
        use crate::models::{Assignment, ClassType, Timetable};
        use crate::Analyzer;

        let mut grid = Timetable::empty(&["9-10"], &["Mon", "Tue"]).unwrap();
        let a = Assignment::new(ClassType::Lecture, "S1", "R1", "T1");
        grid.set_cell("9-10", "Mon", Some(a.clone())).unwrap();
        grid.set_cell("9-10", "Tue", Some(a)).unwrap();

        let mut analyzer = Analyzer::default().with_sink(NullSink);
        assert_eq!(analyzer.analyze(&grid).conflicts.len(), 1);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::ApplyConstraints.to_string(), "apply_constraints");
    }

    #[test]
    fn test_tracing_sink_without_subscriber() {
        let mut sink = TracingSink;
        sink.record(EngineEvent::ConflictFound {
            resource: "T1".into(),
            time: "9-10".into(),
            day: "Tue".into(),
        });
    }
}
