//! Engine error type.
//!
//! Two classes of failure exist: configuration errors (the request cannot
//! be satisfied with the resources at hand) and structural errors (labels
//! or references are malformed). Both are raised before any timetable or
//! report is produced.

use std::path::PathBuf;

use crate::validation::ValidationError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Errors raised by grid construction, generation, and configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum TimetableError {
    /// Catalog or generator settings cannot produce a timetable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Labels, catalog entries, or constraints failed validation.
    #[error("Structural error: {}", join_messages(.0))]
    Structural(Vec<ValidationError>),

    /// A (time, day) coordinate that the grid does not contain.
    #[error("Unknown cell: time '{time}', day '{day}'")]
    UnknownCell { time: String, day: String },

    /// Generation ran past its configured deadline.
    #[error("Generation exceeded deadline of {deadline_ms}ms")]
    DeadlineExceeded { deadline_ms: u64 },

    /// Configuration file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration text is not valid TOML for [`GeneratorConfig`](crate::GeneratorConfig).
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl TimetableError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Whether this error stems from malformed input structure.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural(_) | Self::UnknownCell { .. })
    }
}

impl From<Vec<ValidationError>> for TimetableError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Structural(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
