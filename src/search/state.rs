//! Mutable assignment state of a search run.
//!
//! The grid is `cells[slot][group]`: one optional [`Lesson`] per cell.
//! Its shape makes "one lesson per group per slot" structural, so no
//! runtime check is needed for it. Mutators are unchecked; the
//! [`ConstraintChecker`](super::ConstraintChecker) decides validity.

use crate::models::{GroupId, Lesson, SlotId, Timetable, TimetableProblem};

/// A (slot, group) coordinate in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Lesson slot.
    pub slot: SlotId,
    /// Student group.
    pub group: GroupId,
}

impl Cell {
    /// Creates a cell coordinate.
    pub fn new(slot: impl Into<SlotId>, group: impl Into<GroupId>) -> Self {
        Self {
            slot: slot.into(),
            group: group.into(),
        }
    }
}

/// The mutable `[slot][group]` grid plus the constraint-check counter.
///
/// # Panics
/// Mutators and cell accessors index the grid directly and panic on
/// out-of-range slots or groups.
#[derive(Debug, Clone)]
pub struct AssignmentState {
    cells: Vec<Vec<Option<Lesson>>>,
    group_count: usize,
    assigned: usize,
    checks: std::cell::Cell<u64>,
}

impl AssignmentState {
    /// Creates an empty grid.
    pub fn new(slot_count: usize, group_count: usize) -> Self {
        Self {
            cells: vec![vec![None; group_count]; slot_count],
            group_count,
            assigned: 0,
            checks: std::cell::Cell::new(0),
        }
    }

    /// Creates an empty grid sized for `problem`.
    pub fn for_problem(problem: &TimetableProblem) -> Self {
        Self::new(problem.slot_count(), problem.group_count())
    }

    /// Sets a cell, replacing whatever it held.
    pub fn assign(&mut self, slot: SlotId, group: GroupId, lesson: Lesson) {
        let cell = &mut self.cells[slot.index()][group.index()];
        if cell.is_none() {
            self.assigned += 1;
        }
        *cell = Some(lesson);
    }

    /// Clears a cell and returns what it held.
    pub fn unassign(&mut self, slot: SlotId, group: GroupId) -> Option<Lesson> {
        let previous = self.cells[slot.index()][group.index()].take();
        if previous.is_some() {
            self.assigned -= 1;
        }
        previous
    }

    /// Whether every cell holds a lesson.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.assigned == self.cell_count()
    }

    /// Lesson held by a cell.
    #[inline]
    pub fn get(&self, slot: SlotId, group: GroupId) -> Option<Lesson> {
        self.cells[slot.index()][group.index()]
    }

    /// Whether a cell holds a lesson.
    #[inline]
    pub fn is_assigned(&self, slot: SlotId, group: GroupId) -> bool {
        self.get(slot, group).is_some()
    }

    /// Cells of one slot, indexed by group.
    #[inline]
    pub fn slot(&self, slot: SlotId) -> &[Option<Lesson>] {
        &self.cells[slot.index()]
    }

    /// Iterates slot rows in slot order.
    pub fn rows(&self) -> impl Iterator<Item = (SlotId, &[Option<Lesson>])> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(s, row)| (SlotId(s), row.as_slice()))
    }

    /// Number of unassigned groups at a slot.
    pub fn unassigned_in_slot(&self, slot: SlotId) -> usize {
        self.slot(slot).iter().filter(|c| c.is_none()).count()
    }

    /// Number of slots.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of groups.
    #[inline]
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.slot_count() * self.group_count
    }

    /// Number of assigned cells.
    #[inline]
    pub fn assigned_count(&self) -> usize {
        self.assigned
    }

    /// Number of constraint checks performed against this state.
    #[inline]
    pub fn checks(&self) -> u64 {
        self.checks.get()
    }

    /// Increments the check counter and returns the new value.
    pub(crate) fn record_check(&self) -> u64 {
        let next = self.checks.get() + 1;
        self.checks.set(next);
        next
    }

    /// Converts a complete grid into a [`Timetable`].
    ///
    /// Returns `None` if any cell is still unassigned.
    pub fn into_timetable(self) -> Option<Timetable> {
        let lessons = self
            .cells
            .into_iter()
            .map(|row| row.into_iter().collect::<Option<Vec<Lesson>>>())
            .collect::<Option<Vec<_>>>()?;
        Some(Timetable::from_grid(lessons))
    }
}

impl From<&Timetable> for AssignmentState {
    fn from(timetable: &Timetable) -> Self {
        let mut state = Self::new(timetable.slot_count(), timetable.group_count());
        for placed in timetable.iter() {
            state.assign(placed.slot, placed.group, placed.lesson);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(t: usize, r: usize, s: usize) -> Lesson {
        Lesson::new(t, r, s)
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = AssignmentState::new(3, 2);
        assert_eq!(state.cell_count(), 6);
        assert_eq!(state.assigned_count(), 0);
        assert!(!state.is_complete());
        assert_eq!(state.checks(), 0);
        assert!(state.rows().all(|(_, row)| row.iter().all(Option::is_none)));
    }

    #[test]
    fn test_assign_and_complete() {
        let mut state = AssignmentState::new(1, 2);
        state.assign(SlotId(0), GroupId(0), lesson(0, 0, 0));
        assert!(!state.is_complete());
        state.assign(SlotId(0), GroupId(1), lesson(1, 1, 0));
        assert!(state.is_complete());
        assert_eq!(state.get(SlotId(0), GroupId(1)), Some(lesson(1, 1, 0)));
    }

    #[test]
    fn test_reassign_does_not_double_count() {
        let mut state = AssignmentState::new(1, 1);
        state.assign(SlotId(0), GroupId(0), lesson(0, 0, 0));
        state.assign(SlotId(0), GroupId(0), lesson(1, 1, 1));
        assert_eq!(state.assigned_count(), 1);
        assert_eq!(state.get(SlotId(0), GroupId(0)), Some(lesson(1, 1, 1)));
    }

    #[test]
    fn test_unassign_clears_whole_cell() {
        let mut state = AssignmentState::new(2, 1);
        state.assign(SlotId(1), GroupId(0), lesson(2, 3, 4));
        let previous = state.unassign(SlotId(1), GroupId(0));
        assert_eq!(previous, Some(lesson(2, 3, 4)));
        assert_eq!(state.get(SlotId(1), GroupId(0)), None);
        assert!(!state.is_assigned(SlotId(1), GroupId(0)));
        assert_eq!(state.assigned_count(), 0);

        // Clearing an empty cell is a no-op.
        assert_eq!(state.unassign(SlotId(1), GroupId(0)), None);
        assert_eq!(state.assigned_count(), 0);
    }

    #[test]
    fn test_unassigned_in_slot() {
        let mut state = AssignmentState::new(2, 3);
        state.assign(SlotId(0), GroupId(1), lesson(0, 0, 0));
        assert_eq!(state.unassigned_in_slot(SlotId(0)), 2);
        assert_eq!(state.unassigned_in_slot(SlotId(1)), 3);
    }

    #[test]
    fn test_record_check_is_monotonic() {
        let state = AssignmentState::new(1, 1);
        assert_eq!(state.record_check(), 1);
        assert_eq!(state.record_check(), 2);
        assert_eq!(state.checks(), 2);
    }

    #[test]
    fn test_into_timetable_requires_complete_grid() {
        let mut state = AssignmentState::new(1, 2);
        state.assign(SlotId(0), GroupId(0), lesson(0, 0, 0));
        assert!(state.clone().into_timetable().is_none());

        state.assign(SlotId(0), GroupId(1), lesson(1, 1, 1));
        let timetable = state.into_timetable().unwrap();
        assert_eq!(timetable.lesson_count(), 2);
        assert_eq!(timetable.lesson(SlotId(0), GroupId(1)), Some(&lesson(1, 1, 1)));
    }

    #[test]
    fn test_from_timetable() {
        let timetable = Timetable::from_grid(vec![vec![lesson(0, 1, 2)], vec![lesson(1, 0, 2)]]);
        let state = AssignmentState::from(&timetable);
        assert!(state.is_complete());
        assert_eq!(state.get(SlotId(1), GroupId(0)), Some(lesson(1, 0, 2)));
    }

    #[test]
    fn test_zero_sized_grid_is_complete() {
        let state = AssignmentState::new(0, 3);
        assert!(state.is_complete());
        assert!(state.into_timetable().is_some());
    }
}
