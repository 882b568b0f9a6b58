//! Built-in value orderings.
//!
//! All orderings enumerate the same static domain of a cell: every
//! (teacher, room, subject) where the subject is in both the teacher's
//! qualifications and the group's curriculum. They differ only in order,
//! except forward checking, which also drops teachers and rooms already
//! busy in the cell's slot.
//!
//! # Layout
//!
//! Candidates come in teacher blocks. Inside a block rooms are shuffled,
//! and for each room the teacher's available subjects are shuffled again,
//! so a block holds `rooms × |available subjects|` lessons.

use rand::seq::SliceRandom;
use rand::RngCore;

use super::{Candidates, ValueOrdering};
use crate::models::{Group, Lesson, RoomId, SubjectId, Teacher, TimetableProblem};
use crate::search::{AssignmentState, Cell};

/// Uniformly shuffled teachers, rooms and subjects.
#[derive(Debug, Clone, Copy, Default)]
pub struct Randomized;

impl ValueOrdering for Randomized {
    fn name(&self) -> &'static str {
        "RANDOM"
    }

    fn candidates(
        &self,
        cell: Cell,
        _state: &AssignmentState,
        problem: &TimetableProblem,
        rng: &mut dyn RngCore,
    ) -> Candidates {
        let Some(group) = problem.group(cell.group) else {
            return Candidates::empty();
        };

        let mut teachers: Vec<&Teacher> = problem.teachers.iter().collect();
        teachers.shuffle(rng);

        let rooms: Vec<RoomId> = problem.rooms.iter().map(|r| r.id).collect();
        let mut lessons = Vec::new();
        for teacher in teachers {
            push_teacher_block(&mut lessons, teacher, group, &rooms, rng);
        }
        Candidates::from_vec(lessons)
    }

    fn description(&self) -> &'static str {
        "Random teacher, room and subject order"
    }
}

/// Least-constraining value ordering.
///
/// Teachers are ranked ascending by how many subjects they could teach to
/// the *other* groups, so the teachers other groups depend on least are
/// tried first. Ties keep teacher index order. Rooms and subjects are
/// shuffled as in [`Randomized`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastConstraining;

impl LeastConstraining {
    /// Sum over other groups of `|qualifications ∩ curriculum|`.
    pub fn score(teacher: &Teacher, group: &Group, problem: &TimetableProblem) -> usize {
        problem
            .groups
            .iter()
            .filter(|other| other.id != group.id)
            .map(|other| other.teachable_by(teacher).len())
            .sum()
    }
}

impl ValueOrdering for LeastConstraining {
    fn name(&self) -> &'static str {
        "LCV"
    }

    fn candidates(
        &self,
        cell: Cell,
        _state: &AssignmentState,
        problem: &TimetableProblem,
        rng: &mut dyn RngCore,
    ) -> Candidates {
        let Some(group) = problem.group(cell.group) else {
            return Candidates::empty();
        };

        let mut teachers: Vec<&Teacher> = problem.teachers.iter().collect();
        teachers.sort_by_key(|t| Self::score(t, group, problem));

        let rooms: Vec<RoomId> = problem.rooms.iter().map(|r| r.id).collect();
        let mut lessons = Vec::new();
        for teacher in teachers {
            push_teacher_block(&mut lessons, teacher, group, &rooms, rng);
        }
        Candidates::from_vec(lessons)
    }

    fn description(&self) -> &'static str {
        "Least Constraining Value"
    }
}

/// Randomized ordering with forward checking.
///
/// Teachers and rooms already used by another group in the cell's slot are
/// dropped before generation. What remains is exactly the set of randomized
/// candidates that pass the exclusivity checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardChecking;

impl ValueOrdering for ForwardChecking {
    fn name(&self) -> &'static str {
        "FC"
    }

    fn candidates(
        &self,
        cell: Cell,
        state: &AssignmentState,
        problem: &TimetableProblem,
        rng: &mut dyn RngCore,
    ) -> Candidates {
        let Some(group) = problem.group(cell.group) else {
            return Candidates::empty();
        };

        let busy: Vec<Lesson> = state
            .slot(cell.slot)
            .iter()
            .enumerate()
            .filter(|&(g, _)| g != cell.group.index())
            .filter_map(|(_, lesson)| *lesson)
            .collect();

        let mut teachers: Vec<&Teacher> = problem
            .teachers
            .iter()
            .filter(|t| busy.iter().all(|l| l.teacher != t.id))
            .collect();
        teachers.shuffle(rng);

        let rooms: Vec<RoomId> = problem
            .rooms
            .iter()
            .map(|r| r.id)
            .filter(|&r| busy.iter().all(|l| l.room != r))
            .collect();

        let mut lessons = Vec::new();
        for teacher in teachers {
            push_teacher_block(&mut lessons, teacher, group, &rooms, rng);
        }
        Candidates::from_vec(lessons)
    }

    fn description(&self) -> &'static str {
        "Randomized with Forward Checking"
    }
}

/// Appends one teacher's block; teachers with nothing to teach the group
/// contribute nothing.
fn push_teacher_block(
    out: &mut Vec<Lesson>,
    teacher: &Teacher,
    group: &Group,
    rooms: &[RoomId],
    rng: &mut dyn RngCore,
) {
    let available: Vec<SubjectId> = group.teachable_by(teacher);
    if available.is_empty() {
        return;
    }

    let mut rooms = rooms.to_vec();
    rooms.shuffle(rng);
    out.reserve(rooms.len() * available.len());

    for room in rooms {
        let mut subjects = available.clone();
        subjects.shuffle(rng);
        out.extend(subjects.into_iter().map(|subject| Lesson {
            teacher: teacher.id,
            room,
            subject,
        }));
    }
}
