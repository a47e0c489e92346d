//! Conflict report model.
//!
//! Output of analysis. Not stored on the timetable. Aggregate sections
//! are optional so callers can tell "not computed" from "computed, empty".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A detected double-booking.
///
/// `day` is the cell where the collision was found; `clashes_with` is the
/// day whose cell already held the same resource under the active policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conflict {
    /// A teacher occupies two mutually exclusive cells.
    TeacherConflict {
        teacher: String,
        day: String,
        time: String,
        clashes_with: String,
        message: String,
    },
    /// A room occupies two mutually exclusive cells.
    RoomConflict {
        room: String,
        day: String,
        time: String,
        clashes_with: String,
        message: String,
    },
}

impl Conflict {
    /// Creates a teacher conflict with the standard message.
    pub fn teacher(
        teacher: impl Into<String>,
        day: impl Into<String>,
        time: impl Into<String>,
        clashes_with: impl Into<String>,
    ) -> Self {
        let teacher = teacher.into();
        let day = day.into();
        let time = time.into();
        Self::TeacherConflict {
            message: format!("{teacher} is double-booked at {time} on {day}"),
            teacher,
            day,
            time,
            clashes_with: clashes_with.into(),
        }
    }

    /// Creates a room conflict with the standard message.
    pub fn room(
        room: impl Into<String>,
        day: impl Into<String>,
        time: impl Into<String>,
        clashes_with: impl Into<String>,
    ) -> Self {
        let room = room.into();
        let day = day.into();
        let time = time.into();
        Self::RoomConflict {
            message: format!("{room} is double-booked at {time} on {day}"),
            room,
            day,
            time,
            clashes_with: clashes_with.into(),
        }
    }

    /// Wire name of the conflict kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Conflict::TeacherConflict { .. } => "teacher_conflict",
            Conflict::RoomConflict { .. } => "room_conflict",
        }
    }

    /// Offending teacher or room.
    pub fn resource(&self) -> &str {
        match self {
            Conflict::TeacherConflict { teacher, .. } => teacher,
            Conflict::RoomConflict { room, .. } => room,
        }
    }

    /// Day on which the collision was detected.
    pub fn day(&self) -> &str {
        match self {
            Conflict::TeacherConflict { day, .. } | Conflict::RoomConflict { day, .. } => day,
        }
    }

    /// Time label of the collision.
    pub fn time(&self) -> &str {
        match self {
            Conflict::TeacherConflict { time, .. } | Conflict::RoomConflict { time, .. } => time,
        }
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        match self {
            Conflict::TeacherConflict { message, .. } | Conflict::RoomConflict { message, .. } => {
                message
            }
        }
    }
}

/// Result of analyzing one or more timetables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConflictReport {
    /// Conflicts in scan order.
    pub conflicts: Vec<Conflict>,
    /// Assignments per teacher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_workload: Option<BTreeMap<String, usize>>,
    /// Occupied cells / total cells, per room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_utilization: Option<BTreeMap<String, f64>>,
}

impl ConflictReport {
    /// Whether no conflict was found.
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Teacher conflicts only.
    pub fn teacher_conflicts(&self) -> impl Iterator<Item = &Conflict> {
        self.conflicts
            .iter()
            .filter(|c| matches!(c, Conflict::TeacherConflict { .. }))
    }

    /// Room conflicts only.
    pub fn room_conflicts(&self) -> impl Iterator<Item = &Conflict> {
        self.conflicts
            .iter()
            .filter(|c| matches!(c, Conflict::RoomConflict { .. }))
    }

    /// Conflicts involving a given teacher or room.
    pub fn conflicts_for(&self, resource: &str) -> Vec<&Conflict> {
        self.conflicts
            .iter()
            .filter(|c| c.resource() == resource)
            .collect()
    }

    /// Teacher with the most assignments (ties broken by name order).
    pub fn busiest_teacher(&self) -> Option<(&str, usize)> {
        self.teacher_workload.as_ref().and_then(|w| {
            w.iter()
                .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
                .map(|(t, n)| (t.as_str(), *n))
        })
    }
}
