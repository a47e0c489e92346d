//! Hard constraints applied during generation.
//!
//! Each constraint restricts where classes may be placed. Day and time
//! fields left as `None` match every day or every time.
//!
//! # Wire Shape
//! Tagged by `kind`:
//! ```json
//! { "kind": "teacher_unavailable", "teacher": "Dr. Smith", "day": "Friday" }
//! { "kind": "blocked_cell", "time": "12:00-1:00" }
//! { "kind": "max_teacher_load", "teacher": "Prof. Davis", "max_assignments": 10 }
//! ```

use serde::{Deserialize, Serialize};

use super::Assignment;

/// A hard scheduling constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    /// Teacher cannot be scheduled at the matching cells.
    TeacherUnavailable {
        teacher: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        day: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time: Option<String>,
    },

    /// Room cannot be used at the matching cells.
    RoomUnavailable {
        room: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        day: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time: Option<String>,
    },

    /// No class may be placed at the matching cells (e.g., a lunch break).
    BlockedCell {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        day: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time: Option<String>,
    },

    /// Fixed placement written into the grid before filling.
    Pinned {
        day: String,
        time: String,
        assignment: Assignment,
    },

    /// Upper bound on the number of classes a teacher receives.
    MaxTeacherLoad {
        teacher: String,
        max_assignments: usize,
    },
}

impl Constraint {
    /// Teacher unavailable everywhere matching `day`/`time`.
    pub fn teacher_unavailable(
        teacher: impl Into<String>,
        day: Option<&str>,
        time: Option<&str>,
    ) -> Self {
        Self::TeacherUnavailable {
            teacher: teacher.into(),
            day: day.map(str::to_string),
            time: time.map(str::to_string),
        }
    }

    /// Room unavailable everywhere matching `day`/`time`.
    pub fn room_unavailable(room: impl Into<String>, day: Option<&str>, time: Option<&str>) -> Self {
        Self::RoomUnavailable {
            room: room.into(),
            day: day.map(str::to_string),
            time: time.map(str::to_string),
        }
    }

    /// Blocks every cell matching `day`/`time`.
    pub fn blocked(day: Option<&str>, time: Option<&str>) -> Self {
        Self::BlockedCell {
            day: day.map(str::to_string),
            time: time.map(str::to_string),
        }
    }

    /// Pins an assignment to a cell.
    pub fn pinned(day: impl Into<String>, time: impl Into<String>, assignment: Assignment) -> Self {
        Self::Pinned {
            day: day.into(),
            time: time.into(),
            assignment,
        }
    }

    /// Caps a teacher's number of classes.
    pub fn max_teacher_load(teacher: impl Into<String>, max_assignments: usize) -> Self {
        Self::MaxTeacherLoad {
            teacher: teacher.into(),
            max_assignments,
        }
    }

    /// Whether a `day`/`time` filter pair covers the given cell.
    pub(crate) fn covers(
        day: &Option<String>,
        time: &Option<String>,
        cell_time: &str,
        cell_day: &str,
    ) -> bool {
        day.as_deref().map_or(true, |d| d == cell_day)
            && time.as_deref().map_or(true, |t| t == cell_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClassType;

    #[test]
    fn test_covers_wildcards() {
        let any = None;
        let fri = Some("Friday".to_string());
        let noon = Some("12:00-1:00".to_string());

        assert!(Constraint::covers(&any, &any, "8:00-9:00", "Monday"));
        assert!(Constraint::covers(&fri, &any, "8:00-9:00", "Friday"));
        assert!(!Constraint::covers(&fri, &any, "8:00-9:00", "Monday"));
        assert!(Constraint::covers(&any, &noon, "12:00-1:00", "Sunday"));
        assert!(!Constraint::covers(&fri, &noon, "12:00-1:00", "Monday"));
    }

    #[test]
    fn test_tagged_json() {
        let c = Constraint::teacher_unavailable("Dr. Smith", Some("Friday"), None);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["kind"], "teacher_unavailable");
        assert_eq!(json["teacher"], "Dr. Smith");
        assert_eq!(json["day"], "Friday");
        assert!(json.get("time").is_none());

        let parsed: Constraint =
            serde_json::from_str(r#"{"kind": "blocked_cell", "time": "12:00-1:00"}"#).unwrap();
        assert_eq!(parsed, Constraint::blocked(None, Some("12:00-1:00")));
    }

    #[test]
    fn test_pinned_json() {
        let text = r#"{
            "kind": "pinned", "day": "Monday", "time": "8:00-9:00",
            "assignment": {"type": "lab", "content": "Physics Lab (Lab 3)",
                           "teacher": "Dr. Johnson", "subject": "PHY101", "room": "Lab 3"}
        }"#;
        let parsed: Constraint = serde_json::from_str(text).unwrap();
        match parsed {
            Constraint::Pinned { assignment, .. } => {
                assert_eq!(assignment.class_type, ClassType::Lab);
                assert_eq!(assignment.content, "Physics Lab (Lab 3)");
            }
            other => panic!("unexpected constraint {other:?}"),
        }
    }
}
