//! Input validation for timetabling requests.
//!
//! Checks structural integrity of grid labels and the resource catalog
//! before any grid is built. Detects:
//! - Duplicate or blank time labels and day names
//! - Duplicate catalog entries
//! - Constraints referencing unknown teachers, rooms, subjects, days, or times
//! - Cells pinned twice, or pinned while blocked or unavailable
//! - Pins that double-book a teacher or room under a [`ConflictPolicy`]
//!
//! All issues are collected; validation never stops at the first error.

use std::collections::HashSet;
use std::fmt;

use crate::config::ConflictPolicy;
use crate::ledger::BookingLedger;
use crate::models::{Constraint, ResourceCatalog};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A time label or day name appears twice.
    DuplicateLabel,
    /// A time label or day name is empty or whitespace.
    BlankLabel,
    /// A catalog set lists the same entry twice.
    DuplicateEntry,
    /// A constraint names a teacher, room, or subject missing from the catalog.
    UnknownResource,
    /// A constraint names a day or time missing from the grid.
    UnknownCell,
    /// Two pins target the same cell or double-book a resource, or a pin
    /// targets a blocked or unavailable cell.
    ConflictingPin,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
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

/// Validates grid labels.
///
/// Checks:
/// 1. No blank time labels or day names
/// 2. No duplicate time labels
/// 3. No duplicate day names
pub fn validate_labels(time_labels: &[String], day_names: &[String]) -> ValidationResult {
    let mut errors = Vec::new();
    check_labels("time label", time_labels, &mut errors);
    check_labels("day name", day_names, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_labels(what: &str, labels: &[String], errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for (i, label) in labels.iter().enumerate() {
        if label.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankLabel,
                format!("Blank {what} at position {i}"),
            ));
        } else if !seen.insert(label.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateLabel,
                format!("Duplicate {what}: {label}"),
            ));
        }
    }
}

/// Validates a catalog against the effective resource sets and grid labels.
///
/// `teachers`, `subjects`, and `rooms` are the sets generation will draw
/// from (catalog entries or fallback vocabulary).
///
/// Checks:
/// 1. No duplicate entries within each catalog set
/// 2. Constraint resources exist in the effective sets
/// 3. Constraint days and times exist in the grid
/// 4. Pinned class types are allowed by a restricted catalog
/// 5. At most one pin per cell; no pin on a blocked cell or for an
///    unavailable teacher or room
pub fn validate_catalog(
    catalog: &ResourceCatalog,
    teachers: &[String],
    subjects: &[String],
    rooms: &[String],
    time_labels: &[String],
    day_names: &[String],
) -> ValidationResult {
    let mut errors = Vec::new();

    check_entries("teacher", &catalog.teachers, &mut errors);
    check_entries("subject", &catalog.subjects, &mut errors);
    check_entries("room", &catalog.rooms, &mut errors);

    let teacher_set: HashSet<&str> = teachers.iter().map(String::as_str).collect();
    let subject_set: HashSet<&str> = subjects.iter().map(String::as_str).collect();
    let room_set: HashSet<&str> = rooms.iter().map(String::as_str).collect();
    let time_set: HashSet<&str> = time_labels.iter().map(String::as_str).collect();
    let day_set: HashSet<&str> = day_names.iter().map(String::as_str).collect();

    let resource = ValidationErrorKind::UnknownResource;
    let cell = ValidationErrorKind::UnknownCell;

    for constraint in &catalog.constraints {
        match constraint {
            Constraint::TeacherUnavailable { teacher, day, time } => {
                unknown(&mut errors, "teacher", teacher, &teacher_set, resource);
                if let Some(d) = day {
                    unknown(&mut errors, "day", d, &day_set, cell);
                }
                if let Some(t) = time {
                    unknown(&mut errors, "time", t, &time_set, cell);
                }
            }
            Constraint::RoomUnavailable { room, day, time } => {
                unknown(&mut errors, "room", room, &room_set, resource);
                if let Some(d) = day {
                    unknown(&mut errors, "day", d, &day_set, cell);
                }
                if let Some(t) = time {
                    unknown(&mut errors, "time", t, &time_set, cell);
                }
            }
            Constraint::BlockedCell { day, time } => {
                if let Some(d) = day {
                    unknown(&mut errors, "day", d, &day_set, cell);
                }
                if let Some(t) = time {
                    unknown(&mut errors, "time", t, &time_set, cell);
                }
            }
            Constraint::Pinned {
                day,
                time,
                assignment,
            } => {
                unknown(&mut errors, "day", day, &day_set, cell);
                unknown(&mut errors, "time", time, &time_set, cell);
                unknown(&mut errors, "teacher", &assignment.teacher, &teacher_set, resource);
                unknown(&mut errors, "subject", &assignment.subject, &subject_set, resource);
                unknown(&mut errors, "room", &assignment.room, &room_set, resource);
                if !catalog.class_types.is_empty()
                    && !catalog.class_types.contains(&assignment.class_type)
                {
                    errors.push(ValidationError::new(
                        resource,
                        format!(
                            "Constraint references class type '{}' outside the catalog",
                            assignment.class_type
                        ),
                    ));
                }
            }
            Constraint::MaxTeacherLoad { teacher, .. } => {
                unknown(&mut errors, "teacher", teacher, &teacher_set, resource);
            }
        }
    }

    check_pins(&catalog.constraints, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn unknown(
    errors: &mut Vec<ValidationError>,
    what: &str,
    name: &str,
    known: &HashSet<&str>,
    kind: ValidationErrorKind,
) {
    if !known.contains(name) {
        errors.push(ValidationError::new(
            kind,
            format!("Constraint references unknown {what} '{name}'"),
        ));
    }
}

fn check_entries(what: &str, entries: &[String], errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateEntry,
                format!("Duplicate {what}: {entry}"),
            ));
        }
    }
}

/// Validates that pinned assignments never double-book a teacher or room
/// under `policy`. Pins are booked in constraint order; each clash names
/// the pin that found its resource already taken.
pub fn validate_pin_bookings(constraints: &[Constraint], policy: ConflictPolicy) -> ValidationResult {
    let mut ledger = BookingLedger::new(policy);
    let mut errors = Vec::new();

    for constraint in constraints {
        let Constraint::Pinned {
            day,
            time,
            assignment,
        } = constraint
        else {
            continue;
        };
        if let Some(first) = ledger.book_teacher(time, day, &assignment.teacher) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ConflictingPin,
                format!(
                    "Pin at {time} on {day} double-books teacher {} (already pinned on {first})",
                    assignment.teacher
                ),
            ));
        }
        if let Some(first) = ledger.book_room(time, day, &assignment.room) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ConflictingPin,
                format!(
                    "Pin at {time} on {day} double-books room {} (already pinned on {first})",
                    assignment.room
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_pins(constraints: &[Constraint], errors: &mut Vec<ValidationError>) {
    let mut pinned = HashSet::new();
    for constraint in constraints {
        let Constraint::Pinned {
            day,
            time,
            assignment,
        } = constraint
        else {
            continue;
        };
        if !pinned.insert((time.as_str(), day.as_str())) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ConflictingPin,
                format!("Cell {time} on {day} is pinned more than once"),
            ));
        }
        let blocked = constraints.iter().any(|c| match c {
            Constraint::BlockedCell { day: bd, time: bt } => Constraint::covers(bd, bt, time, day),
            _ => false,
        });
        if blocked {
            errors.push(ValidationError::new(
                ValidationErrorKind::ConflictingPin,
                format!("Cell {time} on {day} is pinned but blocked"),
            ));
        }

        for c in constraints {
            match c {
                Constraint::TeacherUnavailable {
                    teacher,
                    day: d,
                    time: t,
                } if *teacher == assignment.teacher && Constraint::covers(d, t, time, day) => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::ConflictingPin,
                        format!("Cell {time} on {day} is pinned to unavailable teacher {teacher}"),
                    ));
                }
                Constraint::RoomUnavailable {
                    room,
                    day: d,
                    time: t,
                } if *room == assignment.room && Constraint::covers(d, t, time, day) => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::ConflictingPin,
                        format!("Cell {time} on {day} is pinned to unavailable room {room}"),
                    ));
                }
                _ => {}
            }
        }
    }
}
