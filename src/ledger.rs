//! Teacher and room bookings keyed by conflict policy.
//!
//! Shared by generation (to keep resources free) and analysis (to detect
//! double-bookings). A booking remembers the day that first claimed the
//! resource under its key.

use std::collections::HashMap;

use crate::config::ConflictPolicy;

type SlotKey = (String, Option<String>);

/// Resource bookings under one [`ConflictPolicy`].
#[derive(Debug, Clone, Default)]
pub(crate) struct BookingLedger {
    policy: ConflictPolicy,
    teachers: HashMap<SlotKey, HashMap<String, String>>,
    rooms: HashMap<SlotKey, HashMap<String, String>>,
}

impl BookingLedger {
    pub(crate) fn new(policy: ConflictPolicy) -> Self {
        Self {
            policy,
            teachers: HashMap::new(),
            rooms: HashMap::new(),
        }
    }

    fn key(&self, time: &str, day: &str) -> SlotKey {
        match self.policy {
            ConflictPolicy::TimeOfDay => (time.to_string(), None),
            ConflictPolicy::SameCell => (time.to_string(), Some(day.to_string())),
        }
    }

    /// Day already holding `teacher` under the key of (time, day).
    pub(crate) fn teacher_clash(&self, time: &str, day: &str, teacher: &str) -> Option<&str> {
        self.teachers
            .get(&self.key(time, day))
            .and_then(|m| m.get(teacher))
            .map(String::as_str)
    }

    /// Day already holding `room` under the key of (time, day).
    pub(crate) fn room_clash(&self, time: &str, day: &str, room: &str) -> Option<&str> {
        self.rooms
            .get(&self.key(time, day))
            .and_then(|m| m.get(room))
            .map(String::as_str)
    }

    /// Books a teacher. Returns the clashing day if already booked;
    /// the first booking is kept.
    pub(crate) fn book_teacher(&mut self, time: &str, day: &str, teacher: &str) -> Option<String> {
        let key = self.key(time, day);
        book(&mut self.teachers, key, teacher, day)
    }

    /// Books a room. Returns the clashing day if already booked.
    pub(crate) fn book_room(&mut self, time: &str, day: &str, room: &str) -> Option<String> {
        let key = self.key(time, day);
        book(&mut self.rooms, key, room, day)
    }
}

fn book(
    table: &mut HashMap<SlotKey, HashMap<String, String>>,
    key: SlotKey,
    resource: &str,
    day: &str,
) -> Option<String> {
    let booked = table.entry(key).or_default();
    match booked.get(resource) {
        Some(first) => Some(first.clone()),
        None => {
            booked.insert(resource.to_string(), day.to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_of_day_spans_days() {
        let mut ledger = BookingLedger::new(ConflictPolicy::TimeOfDay);
        assert_eq!(ledger.book_teacher("9-10", "Mon", "T1"), None);
        assert_eq!(ledger.teacher_clash("9-10", "Tue", "T1"), Some("Mon"));
        assert_eq!(ledger.book_teacher("9-10", "Tue", "T1"), Some("Mon".to_string()));
        assert_eq!(ledger.teacher_clash("10-11", "Mon", "T1"), None);
    }

    #[test]
    fn test_same_cell_is_per_day() {
        let mut ledger = BookingLedger::new(ConflictPolicy::SameCell);
        assert_eq!(ledger.book_room("9-10", "Mon", "R1"), None);
        assert_eq!(ledger.room_clash("9-10", "Tue", "R1"), None);
        assert_eq!(ledger.book_room("9-10", "Mon", "R1"), Some("Mon".to_string()));
    }

    #[test]
    fn test_teachers_and_rooms_are_separate() {
        let mut ledger = BookingLedger::new(ConflictPolicy::TimeOfDay);
        ledger.book_teacher("9-10", "Mon", "X");
        assert_eq!(ledger.room_clash("9-10", "Mon", "X"), None);
    }
}
