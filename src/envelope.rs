//! JSON request envelopes exchanged with the HTTP collaborator.
//!
//! The engine performs no I/O. Callers wrap its output in these shapes:
//! `{ "timetable": [...], "constraints": {...} }` for generation and
//! `{ "timetable": [...] }` for analysis.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::Timetable;

/// Payload for a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Grid to generate into (usually empty).
    pub timetable: Timetable,
    /// Free-form constraint object forwarded untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Value>,
}

/// Payload for an analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Grid to analyze.
    pub timetable: Timetable,
}

impl GenerateRequest {
    /// Wraps a timetable without constraints.
    pub fn new(timetable: Timetable) -> Self {
        Self {
            timetable,
            constraints: None,
        }
    }

    /// Attaches a constraint object.
    pub fn with_constraints(mut self, constraints: Value) -> Self {
        self.constraints = Some(constraints);
        self
    }
}

impl AnalyzeRequest {
    /// Wraps a timetable.
    pub fn new(timetable: Timetable) -> Self {
        Self { timetable }
    }
}
