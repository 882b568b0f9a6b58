//! Hard-constraint checking.
//!
//! # Checks (in order)
//!
//! 1. *Coverage lookahead* (optional): a group must still have enough
//!    unassigned cells to teach every missing (subject, room kind) pair.
//! 2. *Coverage* (complete grids only): every curriculum subject of every
//!    group is taught in exactly the room kinds {lecture, lab}.
//! 3. *Teacher exclusivity*: no teacher appears twice in one slot.
//! 4. *Room exclusivity*: no room appears twice in one slot.
//!
//! Teacher qualification and group curriculum are guaranteed by the value
//! orderings and are not re-checked here. Any other candidate source must
//! uphold them too. [`ConstraintChecker::audit`] does check them.

use std::collections::BTreeMap;

use super::AssignmentState;
use crate::models::{
    GroupId, Lesson, RoomKind, SlotId, SubjectId, Timetable, TimetableProblem, Violation,
    ViolationType,
};

/// Room kinds observed per curriculum subject.
type KindCoverage = BTreeMap<SubjectId, [bool; RoomKind::COUNT]>;

/// Hard-constraint checker.
///
/// Every call to [`check`](Self::check) increments the state's check
/// counter by exactly one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintChecker {
    coverage_lookahead: bool,
}

impl ConstraintChecker {
    /// Creates a checker with the plain rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the coverage lookahead.
    ///
    /// The lookahead rejects partial grids that can no longer reach full
    /// coverage. It never rejects a valid complete grid.
    pub fn with_coverage_lookahead(mut self, enabled: bool) -> Self {
        self.coverage_lookahead = enabled;
        self
    }

    /// Whether the coverage lookahead is enabled.
    pub fn coverage_lookahead(&self) -> bool {
        self.coverage_lookahead
    }

    /// Returns `false` if the state violates a hard constraint.
    pub fn check(&self, state: &AssignmentState, problem: &TimetableProblem) -> bool {
        state.record_check();

        if self.coverage_lookahead && !coverage_reachable(state, problem) {
            return false;
        }

        if state.is_complete() && !coverage_complete(state, problem) {
            return false;
        }

        for (_, row) in state.rows() {
            if has_duplicate(row, |l| l.teacher) || has_duplicate(row, |l| l.room) {
                return false;
            }
        }

        true
    }

    /// Lists every hard-constraint violation in a (possibly partial) state.
    ///
    /// Unlike [`check`](Self::check) this also verifies qualifications and
    /// curricula, and does not touch the check counter.
    pub fn violations(&self, state: &AssignmentState, problem: &TimetableProblem) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (slot, row) in state.rows() {
            for (g, cell) in row.iter().enumerate() {
                let group = GroupId(g);
                match cell {
                    None => violations.push(
                        Violation::new(
                            ViolationType::Unassigned,
                            format!("{group} has no lesson at {slot}"),
                        )
                        .at_slot(slot)
                        .for_group(group),
                    ),
                    Some(lesson) => {
                        violations.extend(compatibility_violations(slot, group, lesson, problem));
                    }
                }
            }

            for (i, a) in row.iter().enumerate() {
                let Some(a) = a else { continue };
                for b in row[i + 1..].iter().flatten() {
                    if a.teacher == b.teacher {
                        violations.push(
                            Violation::new(
                                ViolationType::TeacherClash,
                                format!("{} teaches two groups at {slot}", a.teacher),
                            )
                            .at_slot(slot),
                        );
                    }
                    if a.room == b.room {
                        violations.push(
                            Violation::new(
                                ViolationType::RoomClash,
                                format!("{} hosts two groups at {slot}", a.room),
                            )
                            .at_slot(slot),
                        );
                    }
                }
            }
        }

        for (g, coverage) in kind_coverage(state, problem).into_iter().enumerate() {
            for (subject, kinds) in coverage {
                let missing: Vec<String> = RoomKind::ALL
                    .iter()
                    .filter(|k| !kinds[k.index()])
                    .map(ToString::to_string)
                    .collect();
                if !missing.is_empty() {
                    violations.push(
                        Violation::new(
                            ViolationType::IncompleteCoverage,
                            format!("{subject} for {} lacks {}", GroupId(g), missing.join(", ")),
                        )
                        .for_group(GroupId(g)),
                    );
                }
            }
        }

        violations
    }

    /// Lists every hard-constraint violation in a finished timetable.
    pub fn audit(&self, timetable: &Timetable, problem: &TimetableProblem) -> Vec<Violation> {
        self.violations(&AssignmentState::from(timetable), problem)
    }
}

/// Checks a state with the plain rule set.
pub fn check(state: &AssignmentState, problem: &TimetableProblem) -> bool {
    ConstraintChecker::new().check(state, problem)
}

/// Whether two assigned cells in `row` share the same key.
///
/// O(groups²) scan; the group count is small and fixed.
fn has_duplicate<K, F>(row: &[Option<Lesson>], key: F) -> bool
where
    K: PartialEq,
    F: Fn(&Lesson) -> K,
{
    row.iter().enumerate().any(|(i, a)| match a {
        Some(a) => {
            let k = key(a);
            row[i + 1..].iter().flatten().any(|b| key(b) == k)
        }
        None => false,
    })
}

/// Room kinds used per curriculum subject, for every group.
///
/// Sized by the problem's groups, so groups missing from the grid show up
/// uncovered. Subjects outside a group's curriculum and unknown rooms are
/// ignored.
fn kind_coverage(state: &AssignmentState, problem: &TimetableProblem) -> Vec<KindCoverage> {
    let mut coverage: Vec<KindCoverage> = (0..problem.group_count())
        .map(|g| {
            problem
                .group(GroupId(g))
                .map(|group| {
                    group
                        .curriculum
                        .iter()
                        .map(|&s| (s, [false; RoomKind::COUNT]))
                        .collect::<KindCoverage>()
                })
                .unwrap_or_default()
        })
        .collect();

    for (_, row) in state.rows() {
        for (g, cell) in row.iter().enumerate() {
            let Some(lesson) = cell else { continue };
            let Some(kind) = problem.room_kind(lesson.room) else {
                continue;
            };
            if let Some(kinds) = coverage.get_mut(g).and_then(|c| c.get_mut(&lesson.subject)) {
                kinds[kind.index()] = true;
            }
        }
    }

    coverage
}

fn coverage_complete(state: &AssignmentState, problem: &TimetableProblem) -> bool {
    kind_coverage(state, problem)
        .iter()
        .all(|subjects| subjects.values().all(|kinds| kinds.iter().all(|&k| k)))
}

fn coverage_reachable(state: &AssignmentState, problem: &TimetableProblem) -> bool {
    let mut open = vec![0usize; problem.group_count()];
    for (_, row) in state.rows() {
        for (g, cell) in row.iter().enumerate() {
            if let (None, Some(count)) = (cell, open.get_mut(g)) {
                *count += 1;
            }
        }
    }

    kind_coverage(state, problem)
        .iter()
        .zip(open)
        .all(|(subjects, open)| {
            let missing: usize = subjects
                .values()
                .map(|kinds| kinds.iter().filter(|&&k| !k).count())
                .sum();
            missing <= open
        })
}

fn compatibility_violations(
    slot: SlotId,
    group: GroupId,
    lesson: &Lesson,
    problem: &TimetableProblem,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    let qualified = problem
        .teacher(lesson.teacher)
        .is_some_and(|t| t.can_teach(lesson.subject));
    if !qualified {
        violations.push(
            Violation::new(
                ViolationType::Unqualified,
                format!("{} is not qualified for {}", lesson.teacher, lesson.subject),
            )
            .at_slot(slot)
            .for_group(group),
        );
    }

    let studied = problem
        .group(group)
        .is_some_and(|g| g.studies(lesson.subject));
    if !studied {
        violations.push(
            Violation::new(
                ViolationType::OffCurriculum,
                format!("{} is not in the curriculum of {group}", lesson.subject),
            )
            .at_slot(slot)
            .for_group(group),
        );
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Group, Room, Teacher, WeekGrid};

    /// 1 teacher (all subjects), 2 groups, 2 slots, rooms: lecture, lab, lecture.
    fn small_problem() -> TimetableProblem {
        TimetableProblem::new(WeekGrid::new(1, 2))
            .with_subject_count(2)
            .with_room(Room::lecture(0usize))
            .with_room(Room::lab(1usize))
            .with_room(Room::lecture(2usize))
            .with_teacher(Teacher::new(0usize).with_qualifications([0usize, 1]))
            .with_teacher(Teacher::new(1usize).with_qualifications([0usize, 1]))
            .with_group(Group::new(0usize).with_subject(0usize))
            .with_group(Group::new(1usize).with_subject(1usize))
    }

    fn lesson(t: usize, r: usize, s: usize) -> Lesson {
        Lesson::new(t, r, s)
    }

    fn valid_state() -> AssignmentState {
        let mut state = AssignmentState::new(2, 2);
        state.assign(SlotId(0), GroupId(0), lesson(0, 0, 0));
        state.assign(SlotId(0), GroupId(1), lesson(1, 1, 1));
        state.assign(SlotId(1), GroupId(0), lesson(1, 1, 0));
        state.assign(SlotId(1), GroupId(1), lesson(0, 2, 1));
        state
    }

    #[test]
    fn test_valid_complete_state_accepted() {
        let problem = small_problem();
        let state = valid_state();
        assert!(check(&state, &problem));
        assert!(ConstraintChecker::new().violations(&state, &problem).is_empty());
    }

    #[test]
    fn test_teacher_clash_rejected() {
        let problem = small_problem();
        let mut state = AssignmentState::new(2, 2);
        state.assign(SlotId(0), GroupId(0), lesson(0, 0, 0));
        state.assign(SlotId(0), GroupId(1), lesson(0, 1, 1));
        assert!(!check(&state, &problem));

        let violations = ConstraintChecker::new().violations(&state, &problem);
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::TeacherClash && v.slot == Some(SlotId(0))));
    }

    #[test]
    fn test_room_clash_rejected() {
        let problem = small_problem();
        let mut state = AssignmentState::new(2, 2);
        state.assign(SlotId(1), GroupId(0), lesson(0, 2, 0));
        state.assign(SlotId(1), GroupId(1), lesson(1, 2, 1));
        assert!(!check(&state, &problem));
    }

    #[test]
    fn test_partial_state_skips_coverage() {
        let problem = small_problem();
        let mut state = AssignmentState::new(2, 2);
        // Lecture only so far, but the grid is not complete.
        state.assign(SlotId(0), GroupId(0), lesson(0, 0, 0));
        assert!(check(&state, &problem));
    }

    #[test]
    fn test_single_kind_coverage_rejected() {
        let problem = small_problem();
        let mut state = valid_state();
        // Group 0 now gets subject 0 in lecture rooms only.
        state.assign(SlotId(1), GroupId(0), lesson(1, 2, 0));
        state.assign(SlotId(1), GroupId(1), lesson(0, 1, 1));
        assert!(!check(&state, &problem));

        let violations = ConstraintChecker::new().violations(&state, &problem);
        assert!(violations.iter().any(|v| {
            v.violation_type == ViolationType::IncompleteCoverage && v.group == Some(GroupId(0))
        }));
    }

    #[test]
    fn test_untaught_subject_rejected() {
        let problem = TimetableProblem::new(WeekGrid::new(1, 2))
            .with_subject_count(2)
            .with_room(Room::lecture(0usize))
            .with_room(Room::lab(1usize))
            .with_teacher(Teacher::new(0usize).with_qualifications([0usize, 1]))
            .with_group(Group::new(0usize).with_subjects([0usize, 1]));
        let mut state = AssignmentState::new(2, 1);
        state.assign(SlotId(0), GroupId(0), lesson(0, 0, 0));
        state.assign(SlotId(1), GroupId(0), lesson(0, 1, 0));
        // Subject 1 never taught.
        assert!(!check(&state, &problem));
    }

    #[test]
    fn test_counter_increments_once_per_check() {
        let problem = small_problem();
        let state = valid_state();
        let checker = ConstraintChecker::new().with_coverage_lookahead(true);
        for expected in 1..=5 {
            checker.check(&state, &problem);
            assert_eq!(state.checks(), expected);
        }

        let mut clash = AssignmentState::new(2, 2);
        clash.assign(SlotId(0), GroupId(0), lesson(0, 0, 0));
        clash.assign(SlotId(0), GroupId(1), lesson(0, 0, 1));
        assert!(!checker.check(&clash, &problem));
        assert_eq!(clash.checks(), 1);
    }

    #[test]
    fn test_violations_do_not_count_checks() {
        let problem = small_problem();
        let state = valid_state();
        let _ = ConstraintChecker::new().violations(&state, &problem);
        assert_eq!(state.checks(), 0);
    }

    #[test]
    fn test_lookahead_rejects_unreachable_coverage() {
        let problem = small_problem();
        let mut state = AssignmentState::new(2, 2);
        // Group 0 spends its first slot on a lecture; one slot left, one kind missing.
        state.assign(SlotId(0), GroupId(0), lesson(0, 0, 0));
        let lookahead = ConstraintChecker::new().with_coverage_lookahead(true);
        assert!(lookahead.check(&state, &problem));

        // Group 1 spends both slots in lecture rooms: lab can no longer be covered.
        let mut state = AssignmentState::new(2, 2);
        state.assign(SlotId(0), GroupId(1), lesson(1, 0, 1));
        state.assign(SlotId(1), GroupId(1), lesson(1, 2, 1));
        assert!(!lookahead.check(&state, &problem));
        // Without lookahead the partial grid still passes.
        assert!(check(&state, &problem));
    }

    #[test]
    fn test_lookahead_accepts_valid_complete_state() {
        let problem = small_problem();
        let state = valid_state();
        assert!(ConstraintChecker::new()
            .with_coverage_lookahead(true)
            .check(&state, &problem));
    }

    #[test]
    fn test_audit_flags_unqualified_and_off_curriculum() {
        let problem = TimetableProblem::new(WeekGrid::new(1, 1))
            .with_subject_count(2)
            .with_room(Room::lecture(0usize))
            .with_teacher(Teacher::new(0usize).with_qualification(0usize))
            .with_group(Group::new(0usize).with_subject(0usize));
        let timetable = Timetable::from_grid(vec![vec![lesson(0, 0, 1)]]);

        let violations = ConstraintChecker::new().audit(&timetable, &problem);
        let types: Vec<&ViolationType> = violations.iter().map(|v| &v.violation_type).collect();
        assert!(types.contains(&&ViolationType::Unqualified));
        assert!(types.contains(&&ViolationType::OffCurriculum));
        assert!(types.contains(&&ViolationType::IncompleteCoverage));
    }

    #[test]
    fn test_unknown_room_never_covers() {
        let problem = TimetableProblem::new(WeekGrid::new(1, 2))
            .with_subject_count(1)
            .with_room(Room::lecture(0usize))
            .with_room(Room::lab(1usize))
            .with_teacher(Teacher::new(0usize).with_qualification(0usize))
            .with_group(Group::new(0usize).with_subject(0usize));
        let mut state = AssignmentState::new(2, 1);
        state.assign(SlotId(0), GroupId(0), lesson(0, 0, 0));
        state.assign(SlotId(1), GroupId(0), lesson(0, 7, 0));
        assert!(!check(&state, &problem));
    }

    #[test]
    fn test_room_kinds_follow_ids_not_positions() {
        // Room 2 is a lecture room stored at position 1.
        let problem = TimetableProblem::new(WeekGrid::new(1, 2))
            .with_subject_count(1)
            .with_room(Room::lecture(0usize))
            .with_room(Room::lecture(2usize))
            .with_room(Room::lab(1usize))
            .with_teacher(Teacher::new(0usize).with_qualification(0usize))
            .with_group(Group::new(0usize).with_subject(0usize));

        let lectures_only = Timetable::from_grid(vec![vec![lesson(0, 0, 0)], vec![lesson(0, 2, 0)]]);
        let violations = ConstraintChecker::new().audit(&lectures_only, &problem);
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::IncompleteCoverage));
        assert!(!check(&AssignmentState::from(&lectures_only), &problem));

        let covered = Timetable::from_grid(vec![vec![lesson(0, 2, 0)], vec![lesson(0, 1, 0)]]);
        assert!(ConstraintChecker::new().audit(&covered, &problem).is_empty());
    }

    #[test]
    fn test_audit_empty_timetable_reports_coverage() {
        let problem = small_problem();
        let violations = ConstraintChecker::new().audit(&Timetable::from_grid(Vec::new()), &problem);
        let uncovered: Vec<Option<GroupId>> = violations
            .iter()
            .filter(|v| v.violation_type == ViolationType::IncompleteCoverage)
            .map(|v| v.group)
            .collect();
        assert_eq!(uncovered, vec![Some(GroupId(0)), Some(GroupId(1))]);
    }

    #[test]
    fn test_violations_report_unassigned_cells() {
        let problem = small_problem();
        let state = AssignmentState::new(2, 2);
        let unassigned = ConstraintChecker::new()
            .violations(&state, &problem)
            .into_iter()
            .filter(|v| v.violation_type == ViolationType::Unassigned)
            .count();
        assert_eq!(unassigned, 4);
    }
}
