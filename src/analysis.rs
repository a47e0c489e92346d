//! Conflict analysis and workload aggregation.
//!
//! Scans filled timetables for double-booked teachers (and, optionally,
//! rooms) and tallies per-teacher workload and per-room utilization.
//!
//! # Algorithm
//!
//! Cells are visited in scan order (slot order, then day order). Each
//! filled cell books its teacher under the key given by the
//! [`ConflictPolicy`]; a booking that finds the teacher already present
//! under that key yields one conflict naming the current cell and the
//! day that first held the teacher.
//!
//! | Policy | Key | Same teacher at 9-10 Mon and 9-10 Tue |
//! |--------|-----|---------------------------------------|
//! | `TimeOfDay` | time | conflict, reported on Tue |
//! | `SameCell` | (time, day) | no conflict |
//!
//! Analysis never mutates its input and is idempotent.

use std::collections::BTreeMap;

use tracing::debug_span;

use crate::config::ConflictPolicy;
use crate::events::{EngineEvent, EventSink, Phase, TracingSink};
use crate::ledger::BookingLedger;
use crate::models::{Conflict, ConflictReport, Timetable};

/// Conflict analyzer.
///
/// # Example
///
/// ```
/// use u_timetable::{Analyzer, ConflictPolicy};
/// use u_timetable::models::{Assignment, ClassType, Timetable};
///
/// let mut grid = Timetable::empty(&["9-10"], &["Mon", "Tue"]).unwrap();
/// let a = Assignment::new(ClassType::Lecture, "S1", "R1", "T1");
/// grid.set_cell("9-10", "Mon", Some(a.clone())).unwrap();
/// grid.set_cell("9-10", "Tue", Some(a)).unwrap();
///
/// let report = Analyzer::new(ConflictPolicy::TimeOfDay).analyze(&grid);
/// assert_eq!(report.conflicts.len(), 1);
/// assert_eq!(report.conflicts[0].day(), "Tue");
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer<S = TracingSink> {
    policy: ConflictPolicy,
    room_conflicts: bool,
    workload: bool,
    utilization: bool,
    sink: S,
}

impl Analyzer<TracingSink> {
    /// Creates an analyzer: teacher conflicts, workload, and utilization on;
    /// room conflicts off.
    pub fn new(policy: ConflictPolicy) -> Self {
        Self {
            policy,
            room_conflicts: false,
            workload: true,
            utilization: true,
            sink: TracingSink,
        }
    }
}

impl Default for Analyzer<TracingSink> {
    fn default() -> Self {
        Self::new(ConflictPolicy::default())
    }
}

impl<S: EventSink> Analyzer<S> {
    /// Replaces the event sink.
    pub fn with_sink<T: EventSink>(self, sink: T) -> Analyzer<T> {
        Analyzer {
            policy: self.policy,
            room_conflicts: self.room_conflicts,
            workload: self.workload,
            utilization: self.utilization,
            sink,
        }
    }

    /// Also report rooms double-booked under the policy.
    pub fn with_room_conflicts(mut self, enabled: bool) -> Self {
        self.room_conflicts = enabled;
        self
    }

    /// Compute per-teacher workload.
    pub fn with_workload(mut self, enabled: bool) -> Self {
        self.workload = enabled;
        self
    }

    /// Compute per-room utilization.
    pub fn with_utilization(mut self, enabled: bool) -> Self {
        self.utilization = enabled;
        self
    }

    /// Active policy.
    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// Event sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Analyzes one timetable.
    pub fn analyze(&mut self, timetable: &Timetable) -> ConflictReport {
        self.analyze_all(&[timetable])
    }

    /// Analyzes several timetables that share teachers and rooms
    /// (e.g., one per class group). Scanned in input order.
    pub fn analyze_all(&mut self, timetables: &[&Timetable]) -> ConflictReport {
        let span = debug_span!("analyze", policy = ?self.policy, grids = timetables.len());
        let _guard = span.enter();
        self.sink.record(EngineEvent::PhaseStarted(Phase::Analyze));

        let mut ledger = BookingLedger::new(self.policy);
        let mut conflicts = Vec::new();
        let mut workload: BTreeMap<String, usize> = BTreeMap::new();
        let mut occupied: BTreeMap<String, usize> = BTreeMap::new();
        let mut total_cells = 0;

        for timetable in timetables {
            total_cells += timetable.total_cells();
            for cell in timetable.cells() {
                let Some(a) = cell.assignment else {
                    continue;
                };

                if let Some(first) = ledger.book_teacher(cell.time, cell.day, &a.teacher) {
                    self.sink.record(EngineEvent::ConflictFound {
                        resource: a.teacher.clone(),
                        time: cell.time.to_string(),
                        day: cell.day.to_string(),
                    });
                    conflicts.push(Conflict::teacher(&a.teacher, cell.day, cell.time, first));
                }
                if self.room_conflicts {
                    if let Some(first) = ledger.book_room(cell.time, cell.day, &a.room) {
                        self.sink.record(EngineEvent::ConflictFound {
                            resource: a.room.clone(),
                            time: cell.time.to_string(),
                            day: cell.day.to_string(),
                        });
                        conflicts.push(Conflict::room(&a.room, cell.day, cell.time, first));
                    }
                }

                *workload.entry(a.teacher.clone()).or_insert(0) += 1;
                *occupied.entry(a.room.clone()).or_insert(0) += 1;
            }
        }

        let room_utilization = self.utilization.then(|| {
            if total_cells == 0 {
                return BTreeMap::new();
            }
            occupied
                .into_iter()
                .map(|(room, n)| (room, n as f64 / total_cells as f64))
                .collect()
        });

        self.sink.record(EngineEvent::PhaseFinished {
            phase: Phase::Analyze,
            cells: total_cells,
        });

        ConflictReport {
            conflicts,
            teacher_workload: self.workload.then_some(workload),
            room_utilization,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingSink;
    use crate::models::{Assignment, ClassType};

    fn class(teacher: &str, room: &str) -> Assignment {
        Assignment::new(ClassType::Lecture, "S1", room, teacher)
    }

    fn two_day_grid(first: Assignment, second: Assignment) -> Timetable {
        let mut grid = Timetable::empty(&["9-10"], &["Mon", "Tue"]).unwrap();
        grid.set_cell("9-10", "Mon", Some(first)).unwrap();
        grid.set_cell("9-10", "Tue", Some(second)).unwrap();
        grid
    }

    #[test]
    fn test_teacher_conflict_on_second_day() {
        let grid = two_day_grid(class("T1", "R1"), class("T1", "R1"));
        let report = Analyzer::new(ConflictPolicy::TimeOfDay).analyze(&grid);

        assert_eq!(report.conflicts.len(), 1);
        assert_eq!(report.conflicts[0], Conflict::teacher("T1", "Tue", "9-10", "Mon"));
        let json = serde_json::to_value(&report.conflicts[0]).unwrap();
        assert_eq!(json["kind"], "teacher_conflict");
        assert_eq!(json["teacher"], "T1");
        assert_eq!(json["time"], "9-10");
        assert_eq!(json["day"], "Tue");
    }

    #[test]
    fn test_same_cell_policy_single_grid_is_clean() {
        let grid = two_day_grid(class("T1", "R1"), class("T1", "R1"));
        let report = Analyzer::new(ConflictPolicy::SameCell)
            .with_room_conflicts(true)
            .analyze(&grid);
        assert!(report.is_clean());
    }

    #[test]
    fn test_room_conflicts_opt_in() {
        let grid = two_day_grid(class("T1", "R1"), class("T2", "R1"));
        let default = Analyzer::new(ConflictPolicy::TimeOfDay).analyze(&grid);
        assert!(default.is_clean());

        let with_rooms = Analyzer::new(ConflictPolicy::TimeOfDay)
            .with_room_conflicts(true)
            .analyze(&grid);
        assert_eq!(with_rooms.conflicts, vec![Conflict::room("R1", "Tue", "9-10", "Mon")]);
    }

    #[test]
    fn test_three_days_two_conflicts() {
        let mut grid = Timetable::empty(&["9-10"], &["Mon", "Tue", "Wed"]).unwrap();
        for day in ["Mon", "Tue", "Wed"] {
            grid.set_cell("9-10", day, Some(class("T1", "R1"))).unwrap();
        }
        let report = Analyzer::default().analyze(&grid);
        let days: Vec<&str> = report.conflicts.iter().map(|c| c.day()).collect();
        assert_eq!(days, vec!["Tue", "Wed"]);
        assert!(report
            .conflicts
            .iter()
            .all(|c| matches!(c, Conflict::TeacherConflict { clashes_with, .. } if clashes_with == "Mon")));
    }

    #[test]
    fn test_analyze_all_same_cell_across_groups() {
        let mut group_a = Timetable::empty(&["9-10"], &["Mon", "Tue"]).unwrap();
        let mut group_b = group_a.clone();
        group_a.set_cell("9-10", "Mon", Some(class("T1", "R1"))).unwrap();
        group_b.set_cell("9-10", "Mon", Some(class("T1", "R2"))).unwrap();
        group_b.set_cell("9-10", "Tue", Some(class("T1", "R2"))).unwrap();

        let report = Analyzer::new(ConflictPolicy::SameCell).analyze_all(&[&group_a, &group_b]);
        assert_eq!(report.conflicts, vec![Conflict::teacher("T1", "Mon", "9-10", "Mon")]);
        assert_eq!(report.teacher_workload.unwrap()["T1"], 3);
    }

    #[test]
    fn test_workload_and_utilization() {
        let mut grid = Timetable::empty(&["9-10", "10-11"], &["Mon", "Tue"]).unwrap();
        grid.set_cell("9-10", "Mon", Some(class("T1", "R1"))).unwrap();
        grid.set_cell("10-11", "Mon", Some(class("T1", "R1"))).unwrap();
        grid.set_cell("10-11", "Tue", Some(class("T2", "R2"))).unwrap();

        let report = Analyzer::default().analyze(&grid);
        let workload = report.teacher_workload.as_ref().unwrap();
        assert_eq!(workload["T1"], 2);
        assert_eq!(workload["T2"], 1);

        let util = report.room_utilization.as_ref().unwrap();
        assert!((util["R1"] - 0.5).abs() < 1e-10);
        assert!((util["R2"] - 0.25).abs() < 1e-10);
        assert_eq!(report.busiest_teacher(), Some(("T1", 2)));
    }

    #[test]
    fn test_sections_can_be_disabled() {
        let grid = two_day_grid(class("T1", "R1"), class("T2", "R2"));
        let report = Analyzer::default()
            .with_workload(false)
            .with_utilization(false)
            .analyze(&grid);
        assert!(report.teacher_workload.is_none());
        assert!(report.room_utilization.is_none());
    }

    #[test]
    fn test_empty_timetable() {
        let grid = Timetable::empty::<&str, &str>(&[], &["Mon"]).unwrap();
        let report = Analyzer::default().analyze(&grid);
        assert!(report.is_clean());
        assert!(report.teacher_workload.unwrap().is_empty());
        assert!(report.room_utilization.unwrap().is_empty());
    }

    #[test]
    fn test_idempotent_and_pure() {
        let grid = two_day_grid(class("T1", "R1"), class("T1", "R1"));
        let before = grid.clone();
        let mut analyzer = Analyzer::default();
        let first = analyzer.analyze(&grid);
        let second = analyzer.analyze(&grid);
        assert_eq!(first, second);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_conflict_events() {
        let grid = two_day_grid(class("T1", "R1"), class("T1", "R1"));
        let mut analyzer = Analyzer::default().with_sink(RecordingSink::new());
        analyzer.analyze(&grid);
        let found = analyzer
            .sink()
            .events
            .iter()
            .filter(|e| matches!(e, EngineEvent::ConflictFound { .. }))
            .count();
        assert_eq!(found, 1);
    }
}
