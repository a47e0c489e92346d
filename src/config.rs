//! Generator configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration that reproduces the standard six-period, seven-day week.
//!
//! ```toml
//! fill_threshold = 0.3
//! strategy = "conflict_free"
//! policy = "time_of_day"
//! use_fallback = true
//! seed = 42
//! deadline_ms = 500
//! time_labels = ["8:00-9:00", "9:00-10:00"]
//! day_names = ["Monday", "Tuesday"]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// Default time slot labels.
pub const DEFAULT_TIME_LABELS: [&str; 6] = [
    "8:00-9:00",
    "9:00-10:00",
    "10:00-11:00",
    "11:00-12:00",
    "12:00-1:00",
    "1:00-2:00",
];

/// Default day names, in calendar order.
pub const DEFAULT_DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// How the fill step chooses resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStrategy {
    /// Independent uniform draws per cell. Honors constraints but may
    /// double-book a teacher or room; conflicts surface only in analysis.
    Independent,
    /// Excludes teachers and rooms already booked under the active
    /// [`ConflictPolicy`]; cells with no free teacher or room stay empty.
    #[default]
    ConflictFree,
}

/// Which cells are mutually exclusive for one teacher or room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// A resource may appear at most once per time label across the whole
    /// week: the same teacher at 9-10 on Monday and Tuesday is a conflict.
    #[default]
    TimeOfDay,
    /// A resource may appear at most once per (time, day) cell. Only
    /// yields conflicts when several timetables are analyzed together.
    SameCell,
}

/// Configuration for [`Generator`](crate::Generator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Slot labels, in order.
    pub time_labels: Vec<String>,
    /// Day names, in order.
    pub day_names: Vec<String>,
    /// A cell is filled when a uniform draw exceeds this value.
    /// 0.3 gives roughly 70% occupancy.
    pub fill_threshold: f64,
    /// Resource selection strategy.
    pub strategy: GenerationStrategy,
    /// Exclusivity policy used by the conflict-free strategy.
    pub policy: ConflictPolicy,
    /// Substitute the built-in vocabulary for empty catalog sets.
    pub use_fallback: bool,
    /// RNG seed. `None` = OS entropy.
    pub seed: Option<u64>,
    /// Abort generation after this many milliseconds.
    pub deadline_ms: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            time_labels: DEFAULT_TIME_LABELS.iter().map(|s| s.to_string()).collect(),
            day_names: DEFAULT_DAY_NAMES.iter().map(|s| s.to_string()).collect(),
            fill_threshold: 0.3,
            strategy: GenerationStrategy::default(),
            policy: ConflictPolicy::default(),
            use_fallback: true,
            seed: None,
            deadline_ms: None,
        }
    }
}

impl GeneratorConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GeneratorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TimetableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.fill_threshold) {
            return Err(TimetableError::configuration(format!(
                "fill_threshold must be within [0, 1], got {}",
                self.fill_threshold
            )));
        }
        Ok(())
    }

    /// Sets the slot labels.
    pub fn with_time_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.time_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the day names.
    pub fn with_day_names<I, S>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.day_names = days.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the fill threshold.
    pub fn with_fill_threshold(mut self, threshold: f64) -> Self {
        self.fill_threshold = threshold;
        self
    }

    /// Sets the generation strategy.
    pub fn with_strategy(mut self, strategy: GenerationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the conflict policy.
    pub fn with_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enables or disables the fallback vocabulary.
    pub fn with_fallback(mut self, use_fallback: bool) -> Self {
        self.use_fallback = use_fallback;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the generation deadline.
    pub fn with_deadline_ms(mut self, deadline_ms: u64) -> Self {
        self.deadline_ms = Some(deadline_ms);
        self
    }
}
