//! Resource catalog.
//!
//! The finite input sets for one scheduling request: teachers, subjects,
//! rooms, class types, and constraints. Immutable for the duration of a
//! request and safe to share across threads.

use serde::{Deserialize, Serialize};

use super::{ClassType, Constraint};

/// Fallback subjects used when the catalog omits them.
pub const FALLBACK_SUBJECTS: [&str; 5] = ["CS101", "MATH101", "PHY101", "ENG101", "CHEM101"];
/// Fallback rooms used when the catalog omits them.
pub const FALLBACK_ROOMS: [&str; 5] = ["Room A12", "Room B5", "Room C10", "Room D2", "Lab 1"];
/// Fallback teachers used when the catalog omits them.
pub const FALLBACK_TEACHERS: [&str; 5] = [
    "Dr. Smith",
    "Prof. Johnson",
    "Dr. Williams",
    "Prof. Davis",
    "Dr. Anderson",
];

/// Caller-supplied resources for a scheduling request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceCatalog {
    /// Teacher names.
    #[serde(default)]
    pub teachers: Vec<String>,
    /// Subject names or codes.
    #[serde(default)]
    pub subjects: Vec<String>,
    /// Room names.
    #[serde(default)]
    pub rooms: Vec<String>,
    /// Allowed class types. Empty = all of [`ClassType::ALL`].
    #[serde(default)]
    pub class_types: Vec<ClassType>,
    /// Hard constraints.
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

impl ResourceCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the teachers.
    pub fn with_teachers<I, S>(mut self, teachers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.teachers = teachers.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the subjects.
    pub fn with_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subjects = subjects.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the rooms.
    pub fn with_rooms<I, S>(mut self, rooms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rooms = rooms.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts the class types.
    pub fn with_class_types(mut self, class_types: Vec<ClassType>) -> Self {
        self.class_types = class_types;
        self
    }

    /// Adds a constraint.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Whether no resource set is populated.
    pub fn is_empty(&self) -> bool {
        self.teachers.is_empty() && self.subjects.is_empty() && self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_builder() {
        let c = ResourceCatalog::new()
            .with_teachers(["T1", "T2"])
            .with_subjects(vec!["S1".to_string()])
            .with_rooms(["R1"])
            .with_class_types(vec![ClassType::Lab])
            .with_constraint(Constraint::blocked(Some("Sunday"), None));

        assert_eq!(c.teachers, vec!["T1", "T2"]);
        assert_eq!(c.subjects, vec!["S1"]);
        assert_eq!(c.rooms, vec!["R1"]);
        assert_eq!(c.class_types, vec![ClassType::Lab]);
        assert_eq!(c.constraints.len(), 1);
        assert!(!c.is_empty());
    }

    #[test]
    fn test_missing_sets_default_empty() {
        let c: ResourceCatalog = serde_json::from_str(r#"{"teachers": ["Dr. Smith"]}"#).unwrap();
        assert_eq!(c.teachers, vec!["Dr. Smith"]);
        assert!(c.rooms.is_empty());
        assert!(c.subjects.is_empty());
        assert!(c.constraints.is_empty());
        assert!(!c.is_empty());

        let only_constraints = ResourceCatalog::new().with_constraint(Constraint::blocked(None, None));
        assert!(only_constraints.is_empty());
    }
}
