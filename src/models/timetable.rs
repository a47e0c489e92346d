//! Timetable grid model.
//!
//! A timetable is an ordered sequence of time slots. Each slot owns an
//! ordered day → cell mapping, and each cell is either empty or holds
//! exactly one [`Assignment`].
//!
//! # Wire Shape
//! ```json
//! [
//!   { "time": "8:00-9:00",
//!     "days": { "Monday": { "type": "lecture", "content": "CS101 (Room A12)",
//!                           "teacher": "Dr. Smith", "subject": "CS101", "room": "Room A12" },
//!               "Tuesday": null } }
//! ]
//! ```
//! Day order survives a serialize/deserialize round trip.

use std::collections::HashSet;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, TimetableError};
use crate::validation::validate_labels;

/// Kind of class held in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassType {
    /// Lecture to the whole group.
    Lecture,
    /// Practical session in a lab.
    Lab,
    /// Small-group tutorial.
    Tutorial,
}

impl ClassType {
    /// All class types in vocabulary order.
    pub const ALL: [ClassType; 3] = [ClassType::Lecture, ClassType::Lab, ClassType::Tutorial];

    /// Wire name (`"lecture"`, `"lab"`, `"tutorial"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassType::Lecture => "lecture",
            ClassType::Lab => "lab",
            ClassType::Tutorial => "tutorial",
        }
    }
}

impl fmt::Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One class placement inside a single (time, day) cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Class type tag.
    #[serde(rename = "type")]
    pub class_type: ClassType,
    /// Display label, e.g. `"CS101 (Room A12)"`.
    pub content: String,
    /// Teacher giving the class.
    pub teacher: String,
    /// Subject taught.
    pub subject: String,
    /// Room used.
    pub room: String,
}

impl Assignment {
    /// Creates an assignment with the default `"{subject} ({room})"` label.
    pub fn new(
        class_type: ClassType,
        subject: impl Into<String>,
        room: impl Into<String>,
        teacher: impl Into<String>,
    ) -> Self {
        let subject = subject.into();
        let room = room.into();
        Self {
            class_type,
            content: format!("{subject} ({room})"),
            teacher: teacher.into(),
            subject,
            room,
        }
    }

    /// Overrides the display label.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

/// One day entry of a time slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    /// Day name.
    pub day: String,
    /// Placed class, if any.
    pub assignment: Option<Assignment>,
}

/// A time slot: a label and its ordered day cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Interval label, e.g. `"9:00-10:00"`.
    pub time: String,
    /// Day cells in calendar order.
    #[serde(serialize_with = "serialize_days", deserialize_with = "deserialize_days")]
    pub days: Vec<DayCell>,
}

impl TimeSlot {
    /// Creates a slot with every listed day empty.
    pub fn empty(time: impl Into<String>, day_names: &[String]) -> Self {
        Self {
            time: time.into(),
            days: day_names
                .iter()
                .map(|d| DayCell {
                    day: d.clone(),
                    assignment: None,
                })
                .collect(),
        }
    }

    /// Assignment on a given day (`None` if empty or the day is unknown).
    pub fn get(&self, day: &str) -> Option<&Assignment> {
        self.days
            .iter()
            .find(|c| c.day == day)
            .and_then(|c| c.assignment.as_ref())
    }

    fn cell_mut(&mut self, day: &str) -> Option<&mut DayCell> {
        self.days.iter_mut().find(|c| c.day == day)
    }
}

/// A borrowed view of one cell, produced by [`Timetable::cells`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef<'a> {
    /// Slot label.
    pub time: &'a str,
    /// Day name.
    pub day: &'a str,
    /// Cell content.
    pub assignment: Option<&'a Assignment>,
}

/// The full timetable grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timetable {
    /// Time slots in schedule order.
    pub slots: Vec<TimeSlot>,
}

impl Timetable {
    /// Builds an empty grid: one slot per time label, one empty cell per day.
    ///
    /// Empty `time_labels` or `day_names` yield a zero-slot timetable.
    /// Duplicate or blank labels are rejected before construction.
    ///
    /// ```
    /// use u_timetable::models::Timetable;
    ///
    /// let grid = Timetable::empty(&["9-10", "10-11"], &["Mon", "Tue", "Wed"]).unwrap();
    /// assert_eq!(grid.total_cells(), 6);
    /// assert_eq!(grid.filled_cells(), 0);
    /// ```
    pub fn empty<T, D>(time_labels: &[T], day_names: &[D]) -> Result<Self>
    where
        T: AsRef<str>,
        D: AsRef<str>,
    {
        let times: Vec<String> = time_labels.iter().map(|t| t.as_ref().to_string()).collect();
        let days: Vec<String> = day_names.iter().map(|d| d.as_ref().to_string()).collect();
        validate_labels(&times, &days)?;

        if times.is_empty() || days.is_empty() {
            return Ok(Self::default());
        }

        Ok(Self {
            slots: times.iter().map(|t| TimeSlot::empty(t, &days)).collect(),
        })
    }

    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Slot labels in order.
    pub fn time_labels(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.time.as_str()).collect()
    }

    /// Day names in order, taken from the first slot.
    pub fn day_names(&self) -> Vec<&str> {
        self.slots
            .first()
            .map(|s| s.days.iter().map(|c| c.day.as_str()).collect())
            .unwrap_or_default()
    }

    /// Finds a slot by label.
    pub fn slot(&self, time: &str) -> Option<&TimeSlot> {
        self.slots.iter().find(|s| s.time == time)
    }

    /// Assignment at (time, day), if the cell exists and is filled.
    pub fn cell(&self, time: &str, day: &str) -> Option<&Assignment> {
        self.slot(time).and_then(|s| s.get(day))
    }

    /// Writes (or clears, with `None`) the cell at (time, day).
    pub fn set_cell(&mut self, time: &str, day: &str, assignment: Option<Assignment>) -> Result<()> {
        let cell = self
            .slots
            .iter_mut()
            .find(|s| s.time == time)
            .and_then(|s| s.cell_mut(day))
            .ok_or_else(|| TimetableError::UnknownCell {
                time: time.to_string(),
                day: day.to_string(),
            })?;
        cell.assignment = assignment;
        Ok(())
    }

    /// All cells in scan order: slot order, then day order.
    pub fn cells(&self) -> impl Iterator<Item = CellRef<'_>> {
        self.slots.iter().flat_map(|slot| {
            slot.days.iter().map(move |c| CellRef {
                time: slot.time.as_str(),
                day: c.day.as_str(),
                assignment: c.assignment.as_ref(),
            })
        })
    }

    /// Number of addressable cells.
    pub fn total_cells(&self) -> usize {
        self.slots.iter().map(|s| s.days.len()).sum()
    }

    /// Number of cells holding an assignment.
    pub fn filled_cells(&self) -> usize {
        self.cells().filter(|c| c.assignment.is_some()).count()
    }

    /// Teacher view: same shape, with every cell not taught by `teacher` cleared.
    pub fn for_teacher(&self, teacher: &str) -> Timetable {
        let mut view = self.clone();
        for slot in &mut view.slots {
            for cell in &mut slot.days {
                if cell.assignment.as_ref().is_some_and(|a| a.teacher != teacher) {
                    cell.assignment = None;
                }
            }
        }
        view
    }

    /// Distinct teachers appearing in the grid, in scan order.
    pub fn teachers(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.cells()
            .filter_map(|c| c.assignment)
            .map(|a| a.teacher.as_str())
            .filter(|t| seen.insert(*t))
            .collect()
    }
}

fn serialize_days<S>(days: &[DayCell], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(days.len()))?;
    for cell in days {
        map.serialize_entry(&cell.day, &cell.assignment)?;
    }
    map.end()
}

fn deserialize_days<'de, D>(deserializer: D) -> std::result::Result<Vec<DayCell>, D::Error>
where
    D: Deserializer<'de>,
{
    struct DaysVisitor;

    impl<'de> Visitor<'de> for DaysVisitor {
        type Value = Vec<DayCell>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of day name to assignment or null")
        }

        fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut days = Vec::with_capacity(access.size_hint().unwrap_or(7));
            while let Some((day, assignment)) = access.next_entry::<String, Option<Assignment>>()? {
                days.push(DayCell { day, assignment });
            }
            Ok(days)
        }
    }

    deserializer.deserialize_map(DaysVisitor)
}
