//! Weekly timetable generation and conflict analysis.
//!
//! Assigns teachers, subjects, and rooms to a fixed time × day grid, then
//! inspects the result for double-booked resources and reports workload
//! and room utilization. The engine is synchronous, performs no I/O, and
//! leaves persistence and transport to the caller.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `ResourceCatalog`, `Constraint`, `Timetable`,
//!   `TimeSlot`, `Assignment`, `ConflictReport`
//! - **`generator`**: Grid construction, constraint application, cell filling
//! - **`analysis`**: Conflict detection, workload and utilization tallies
//! - **`validation`**: Label and catalog integrity checks
//! - **`config`**: `GeneratorConfig` with TOML loading
//! - **`events`**: Telemetry sinks for generation and analysis
//! - **`envelope`**: JSON request shapes for the HTTP collaborator
//!
//! # Quick Start
//!
//! ```
//! use u_timetable::{analyze, generate, ResourceCatalog};
//!
//! let catalog = ResourceCatalog::new()
//!     .with_teachers(["Dr. Smith", "Prof. Johnson", "Dr. Williams"])
//!     .with_subjects(["CS101", "MATH101"])
//!     .with_rooms(["Room A12", "Room B5", "Lab 1"]);
//!
//! let timetable = generate(&catalog).unwrap();
//! let report = analyze(&timetable);
//! assert!(report.is_clean());
//! ```

pub mod analysis;
pub mod config;
pub mod envelope;
pub mod error;
pub mod events;
pub mod generator;
mod ledger;
pub mod models;
pub mod validation;

pub use analysis::Analyzer;
pub use config::{ConflictPolicy, GenerationStrategy, GeneratorConfig};
pub use error::{Result, TimetableError};
pub use generator::Generator;
pub use models::{Assignment, ConflictReport, ResourceCatalog, Timetable};

/// Generates a timetable with the default configuration.
pub fn generate(catalog: &ResourceCatalog) -> Result<Timetable> {
    Generator::default().generate(catalog)
}

/// Analyzes a timetable with the default policy.
pub fn analyze(timetable: &Timetable) -> ConflictReport {
    Analyzer::default().analyze(timetable)
}
