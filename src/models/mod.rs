//! Timetabling domain models.
//!
//! Provides the data types shared by generation and analysis: the
//! resource catalog handed in by the caller, the timetable grid, the
//! constraint contract, and the conflict report.
//!
//! # Domain Mappings
//!
//! | u-timetable | School | University | Training Center |
//! |-------------|--------|------------|-----------------|
//! | Teacher | Teacher | Lecturer | Instructor |
//! | Subject | Subject | Course | Module |
//! | Room | Classroom | Lecture Hall / Lab | Training Room |
//! | TimeSlot | Period | Time Block | Session |

mod catalog;
mod constraint;
mod report;
mod timetable;

pub use catalog::{ResourceCatalog, FALLBACK_ROOMS, FALLBACK_SUBJECTS, FALLBACK_TEACHERS};
pub use constraint::Constraint;
pub use report::{Conflict, ConflictReport};
pub use timetable::{Assignment, CellRef, ClassType, DayCell, TimeSlot, Timetable};
