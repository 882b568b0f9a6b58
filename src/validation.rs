//! Input validation for timetabling problems.
//!
//! Checks the structural integrity of a problem before search, so that a
//! malformed model is reported as a configuration error rather than as an
//! infeasible search. Detects:
//! - An empty week
//! - Missing rooms, teachers or groups
//! - Entity ids that do not match their list position
//! - Empty curricula and qualification sets
//! - References to unknown subjects
//! - Curriculum subjects no teacher can teach
//! - Missing lecture rooms or labs
//! - Groups whose coverage needs more lessons than the week has slots

use std::collections::BTreeSet;
use std::fmt;

use crate::models::{RoomKind, SubjectId, TimetableProblem};

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
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The week has no lesson slots.
    EmptyWeek,
    /// The problem has no rooms.
    NoRooms,
    /// The problem has no teachers.
    NoTeachers,
    /// The problem has no groups.
    NoGroups,
    /// An entity's id differs from its position in its list.
    IdMismatch,
    /// A group has an empty curriculum.
    EmptyCurriculum,
    /// A teacher has no qualifications.
    EmptyQualifications,
    /// A subject id is not in the subject list.
    UnknownSubject,
    /// A curriculum subject no teacher is qualified for.
    UncoveredSubject,
    /// No room of a required kind exists.
    MissingRoomKind,
    /// A group needs more lessons than there are slots.
    InsufficientSlots,
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

impl std::error::Error for ValidationError {}

/// Validates a timetabling problem.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(problem: &TimetableProblem) -> ValidationResult {
    let mut errors = Vec::new();

    if problem.slot_count() == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyWeek,
            "week has no slots",
        ));
    }
    if problem.rooms.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoRooms,
            "problem has no rooms",
        ));
    }
    if problem.teachers.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoTeachers,
            "problem has no teachers",
        ));
    }
    if problem.groups.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoGroups,
            "problem has no groups",
        ));
    }

    check_ids(problem, &mut errors);

    let known = |s: &SubjectId| s.index() < problem.subjects.len();

    for teacher in &problem.teachers {
        if teacher.qualifications.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyQualifications,
                format!("Teacher '{}' has no qualifications", teacher.name),
            ));
        }
        for subject in teacher.qualifications.iter().filter(|s| !known(*s)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownSubject,
                format!("Teacher '{}' references unknown subject {subject}", teacher.name),
            ));
        }
    }

    let teachable: BTreeSet<SubjectId> = problem
        .teachers
        .iter()
        .flat_map(|t| t.qualifications.iter().copied())
        .collect();

    for group in &problem.groups {
        if group.curriculum.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyCurriculum,
                format!("Group '{}' has an empty curriculum", group.name),
            ));
        }
        for &subject in &group.curriculum {
            if !known(&subject) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownSubject,
                    format!("Group '{}' references unknown subject {subject}", group.name),
                ));
            } else if !teachable.contains(&subject) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UncoveredSubject,
                    format!(
                        "No teacher can teach subject {subject} to group '{}'",
                        group.name
                    ),
                ));
            }
        }

        // Each subject needs one lesson per room kind.
        let needed = group.curriculum.len() * RoomKind::COUNT;
        if problem.slot_count() > 0 && needed > problem.slot_count() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InsufficientSlots,
                format!(
                    "Group '{}' needs {needed} lessons but the week has {} slots",
                    group.name,
                    problem.slot_count()
                ),
            ));
        }
    }

    let needs_rooms = problem.groups.iter().any(|g| !g.curriculum.is_empty());
    if needs_rooms && !problem.rooms.is_empty() {
        for kind in RoomKind::ALL {
            if !problem.rooms.iter().any(|r| r.kind == kind) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MissingRoomKind,
                    format!("No {kind} room available"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Entities must sit at the position their id names.
fn check_ids(problem: &TimetableProblem, errors: &mut Vec<ValidationError>) {
    let mut mismatch = |what: &str, position: usize, id: usize| {
        errors.push(ValidationError::new(
            ValidationErrorKind::IdMismatch,
            format!("{what} at position {position} has id {id}"),
        ));
    };

    for (i, r) in problem.rooms.iter().enumerate() {
        if r.id.index() != i {
            mismatch("Room", i, r.id.index());
        }
    }
    for (i, t) in problem.teachers.iter().enumerate() {
        if t.id.index() != i {
            mismatch("Teacher", i, t.id.index());
        }
    }
    for (i, g) in problem.groups.iter().enumerate() {
        if g.id.index() != i {
            mismatch("Group", i, g.id.index());
        }
    }
    for (i, s) in problem.subjects.iter().enumerate() {
        if s.id.index() != i {
            mismatch("Subject", i, s.id.index());
        }
    }
}
