//! Timetabling problem (the static domain model).
//!
//! A problem bundles the week geometry with the rooms, teachers, groups
//! and subjects. It is built once and only read during search.

use serde::{Deserialize, Serialize};

use super::{Group, GroupId, Room, RoomId, RoomKind, Subject, SubjectId, Teacher, TeacherId, WeekGrid};

/// Static facts of a timetabling problem.
///
/// Entities are stored densely: the entity at position `i` of each list
/// is expected to carry id `i` (see [`crate::validation::validate_problem`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimetableProblem {
    /// Weekly slot grid.
    pub week: WeekGrid,
    /// Rooms, indexed by `RoomId`.
    pub rooms: Vec<Room>,
    /// Teachers, indexed by `TeacherId`.
    pub teachers: Vec<Teacher>,
    /// Student groups, indexed by `GroupId`.
    pub groups: Vec<Group>,
    /// Subjects, indexed by `SubjectId`.
    pub subjects: Vec<Subject>,
}

impl TimetableProblem {
    /// Creates an empty problem on the given week.
    pub fn new(week: WeekGrid) -> Self {
        Self {
            week,
            ..Self::default()
        }
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.push(teacher);
        self
    }

    /// Adds a group.
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// Adds a subject.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    /// Adds `count` unnamed subjects with consecutive ids.
    pub fn with_subject_count(mut self, count: usize) -> Self {
        let start = self.subjects.len();
        self.subjects
            .extend((start..start + count).map(Subject::new));
        self
    }

    /// Number of lesson slots.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.week.total_slots()
    }

    /// Number of groups.
    #[inline]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Returns a room by id.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        find_by_id(&self.rooms, id.index(), id, |r| r.id)
    }

    /// Returns a teacher by id.
    pub fn teacher(&self, id: TeacherId) -> Option<&Teacher> {
        find_by_id(&self.teachers, id.index(), id, |t| t.id)
    }

    /// Returns the group behind a grid column.
    ///
    /// Grid columns follow list order, so this is positional.
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.index())
    }

    /// Returns a subject by id.
    pub fn subject(&self, id: SubjectId) -> Option<&Subject> {
        find_by_id(&self.subjects, id.index(), id, |s| s.id)
    }

    /// Kind of a room, or `None` for an unknown room.
    #[inline]
    pub fn room_kind(&self, id: RoomId) -> Option<RoomKind> {
        self.room(id).map(|r| r.kind)
    }

    /// The reference instance: 5 days × 4 periods, 4 teachers, 3 groups,
    /// 5 rooms and 6 subjects.
    ///
    /// Teacher `t` is qualified for `{(s² + t²) mod 6 | s < 4}`, group `g`
    /// studies `{(s² + g) mod 6 | s < 3}`, and rooms at even indices are labs.
    pub fn reference() -> Self {
        const SUBJECTS: usize = 6;
        const SUBJECTS_PER_TEACHER: usize = 4;
        const SUBJECTS_PER_GROUP: usize = 3;

        let teacher_names = ["Alex", "John", "David", "Matt"];
        let group_names = ["TK", "TTP", "MI"];
        let subject_names = [
            "Algebra",
            "Math Anal.",
            "Geometry",
            "Programming",
            "Discrete Math",
            "Algorithms",
        ];

        let mut problem = Self::new(WeekGrid::new(5, 4));

        for r in 0..5usize {
            let kind = if r % 2 == 0 { RoomKind::Lab } else { RoomKind::Lecture };
            problem = problem.with_room(Room::new(r, kind).with_name(format!("R{}", r + 1)));
        }

        for (s, name) in subject_names.iter().enumerate() {
            problem = problem.with_subject(Subject::new(s).with_name(*name));
        }

        for (t, name) in teacher_names.iter().enumerate() {
            let qualifications =
                (0..SUBJECTS_PER_TEACHER).map(|s| (s * s + t * t) % SUBJECTS);
            problem = problem.with_teacher(
                Teacher::new(t)
                    .with_name(*name)
                    .with_qualifications(qualifications),
            );
        }

        for (g, name) in group_names.iter().enumerate() {
            let curriculum = (0..SUBJECTS_PER_GROUP).map(|s| (s * s + g) % SUBJECTS);
            problem = problem.with_group(Group::new(g).with_name(*name).with_subjects(curriculum));
        }

        problem
    }
}

/// Looks an entity up by id, trying its list position first.
fn find_by_id<T, I, F>(items: &[T], index: usize, id: I, id_of: F) -> Option<&T>
where
    I: PartialEq,
    F: Fn(&T) -> I,
{
    items
        .get(index)
        .filter(|item| id_of(item) == id)
        .or_else(|| items.iter().find(|item| id_of(item) == id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn ids(values: &[usize]) -> BTreeSet<SubjectId> {
        values.iter().copied().map(SubjectId).collect()
    }

    #[test]
    fn test_reference_dimensions() {
        let p = TimetableProblem::reference();
        assert_eq!(p.slot_count(), 20);
        assert_eq!(p.teachers.len(), 4);
        assert_eq!(p.group_count(), 3);
        assert_eq!(p.rooms.len(), 5);
        assert_eq!(p.subjects.len(), 6);
    }

    #[test]
    fn test_reference_room_kinds() {
        let p = TimetableProblem::reference();
        let kinds: Vec<RoomKind> = p.rooms.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RoomKind::Lab,
                RoomKind::Lecture,
                RoomKind::Lab,
                RoomKind::Lecture,
                RoomKind::Lab
            ]
        );
        assert_eq!(p.rooms[0].name, "R1");
    }

    #[test]
    fn test_reference_qualifications_and_curricula() {
        let p = TimetableProblem::reference();
        assert_eq!(p.teachers[0].qualifications, ids(&[0, 1, 3, 4]));
        assert_eq!(p.teachers[1].qualifications, ids(&[1, 2, 4, 5]));
        assert_eq!(p.teachers[2].qualifications, ids(&[1, 2, 4, 5]));
        assert_eq!(p.teachers[3].qualifications, ids(&[0, 1, 3, 4]));

        assert_eq!(p.groups[0].curriculum, ids(&[0, 1, 4]));
        assert_eq!(p.groups[1].curriculum, ids(&[1, 2, 5]));
        assert_eq!(p.groups[2].curriculum, ids(&[0, 2, 3]));
    }

    #[test]
    fn test_lookups() {
        let p = TimetableProblem::reference();
        assert_eq!(p.teacher(TeacherId(1)).map(|t| t.name.as_str()), Some("John"));
        assert!(p.teacher(TeacherId(9)).is_none());
        assert_eq!(p.room_kind(RoomId(1)), Some(RoomKind::Lecture));
        assert_eq!(p.room_kind(RoomId(4)), Some(RoomKind::Lab));
        assert_eq!(p.room_kind(RoomId(9)), None);
    }

    #[test]
    fn test_room_lookup_by_id_not_position() {
        let p = TimetableProblem::new(WeekGrid::new(1, 2))
            .with_room(Room::lecture(0usize))
            .with_room(Room::lecture(2usize))
            .with_room(Room::lab(1usize));

        assert_eq!(p.room(RoomId(2)).map(|r| r.id), Some(RoomId(2)));
        assert_eq!(p.room_kind(RoomId(1)), Some(RoomKind::Lab));
        assert_eq!(p.room_kind(RoomId(2)), Some(RoomKind::Lecture));
        assert_eq!(p.room_kind(RoomId(3)), None);
    }

    #[test]
    fn test_subject_count_builder() {
        let p = TimetableProblem::new(WeekGrid::new(1, 1))
            .with_subject_count(2)
            .with_subject_count(1);
        let ids: Vec<usize> = p.subjects.iter().map(|s| s.id.index()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
