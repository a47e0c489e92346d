//! Timetable generation.
//!
//! Builds an empty grid, applies hard constraints, then fills the
//! remaining cells from the resource catalog.
//!
//! # Strategies
//!
//! - `Independent`: one uniform draw per decision per cell. Fast, but may
//!   book a teacher or room twice under the conflict policy.
//! - `ConflictFree` (default): a booking ledger carried across the whole
//!   grid removes already-booked teachers and rooms from each cell's
//!   candidate sets.
//!
//! # Randomness
//!
//! Every decision comes from a [`ChoiceSource`]. [`RandomSource`] wraps a
//! `rand` RNG; [`FirstChoice`] and [`NeverFill`] are fixed sources for
//! reproducible runs.

mod engine;
mod source;

pub use engine::{Generator, ResolvedCatalog};
pub use source::{ChoiceSource, FirstChoice, NeverFill, RandomSource};
