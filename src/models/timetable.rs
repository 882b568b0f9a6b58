//! Timetable (solution) model.
//!
//! A timetable is a complete assignment of one lesson to every
//! (slot, group) cell. It is read-only: it is produced by the search and
//! consumed by reporting layers. Hard-constraint breaches found by an
//! audit are described as [`Violation`]s.

use serde::{Deserialize, Serialize};

use super::{GroupId, RoomId, SlotId, SubjectId, TeacherId};

/// The (teacher, room, subject) triple held by one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lesson {
    /// Teaching teacher.
    pub teacher: TeacherId,
    /// Hosting room.
    pub room: RoomId,
    /// Taught subject.
    pub subject: SubjectId,
}

impl Lesson {
    /// Creates a lesson.
    pub fn new(
        teacher: impl Into<TeacherId>,
        room: impl Into<RoomId>,
        subject: impl Into<SubjectId>,
    ) -> Self {
        Self {
            teacher: teacher.into(),
            room: room.into(),
            subject: subject.into(),
        }
    }
}

/// A fully assigned weekly timetable.
///
/// `lessons[slot][group]` is the lesson taught to `group` at `slot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    lessons: Vec<Vec<Lesson>>,
}

/// A lesson placed in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedLesson {
    /// Slot of the lesson.
    pub slot: SlotId,
    /// Group being taught.
    pub group: GroupId,
    /// The lesson itself.
    pub lesson: Lesson,
}

/// A hard-constraint violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Slot concerned, when the violation is local to one slot.
    pub slot: Option<SlotId>,
    /// Group concerned, when the violation is local to one group.
    pub group: Option<GroupId>,
    /// Human-readable description.
    pub message: String,
}

/// Classification of hard-constraint violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A teacher teaches two groups in the same slot.
    TeacherClash,
    /// A room hosts two groups in the same slot.
    RoomClash,
    /// A curriculum subject is not taught in both a lecture room and a lab.
    IncompleteCoverage,
    /// A teacher teaches a subject they are not qualified for.
    Unqualified,
    /// A group is taught a subject outside its curriculum.
    OffCurriculum,
    /// A cell has no lesson.
    Unassigned,
}

impl Violation {
    /// Creates a violation.
    pub fn new(violation_type: ViolationType, message: impl Into<String>) -> Self {
        Self {
            violation_type,
            slot: None,
            group: None,
            message: message.into(),
        }
    }

    /// Attaches the slot concerned.
    pub fn at_slot(mut self, slot: SlotId) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Attaches the group concerned.
    pub fn for_group(mut self, group: GroupId) -> Self {
        self.group = Some(group);
        self
    }
}

impl Timetable {
    /// Wraps a `[slot][group]` lesson grid.
    pub fn from_grid(lessons: Vec<Vec<Lesson>>) -> Self {
        Self { lessons }
    }

    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        self.lessons.len()
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.lessons.first().map_or(0, Vec::len)
    }

    /// Lesson for a cell.
    pub fn lesson(&self, slot: SlotId, group: GroupId) -> Option<&Lesson> {
        self.lessons.get(slot.index())?.get(group.index())
    }

    /// All lessons taught at a slot, indexed by group.
    pub fn slot(&self, slot: SlotId) -> &[Lesson] {
        self.lessons
            .get(slot.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterates every placed lesson, slot-major.
    pub fn iter(&self) -> impl Iterator<Item = PlacedLesson> + '_ {
        self.lessons.iter().enumerate().flat_map(|(s, row)| {
            row.iter().enumerate().map(move |(g, lesson)| PlacedLesson {
                slot: SlotId(s),
                group: GroupId(g),
                lesson: *lesson,
            })
        })
    }

    /// Lessons of one group, in slot order.
    pub fn lessons_for_group(&self, group: GroupId) -> Vec<PlacedLesson> {
        self.iter().filter(|p| p.group == group).collect()
    }

    /// Lessons taught by one teacher, in slot order.
    pub fn lessons_for_teacher(&self, teacher: TeacherId) -> Vec<PlacedLesson> {
        self.iter().filter(|p| p.lesson.teacher == teacher).collect()
    }

    /// Lessons hosted by one room, in slot order.
    pub fn lessons_for_room(&self, room: RoomId) -> Vec<PlacedLesson> {
        self.iter().filter(|p| p.lesson.room == room).collect()
    }

    /// Total number of lessons.
    pub fn lesson_count(&self) -> usize {
        self.lessons.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timetable() -> Timetable {
        Timetable::from_grid(vec![
            vec![Lesson::new(0usize, 0usize, 1usize), Lesson::new(1usize, 1usize, 2usize)],
            vec![Lesson::new(1usize, 0usize, 2usize), Lesson::new(0usize, 2usize, 1usize)],
        ])
    }

    #[test]
    fn test_dimensions() {
        let t = sample_timetable();
        assert_eq!(t.slot_count(), 2);
        assert_eq!(t.group_count(), 2);
        assert_eq!(t.lesson_count(), 4);
    }

    #[test]
    fn test_lesson_lookup() {
        let t = sample_timetable();
        let l = t.lesson(SlotId(1), GroupId(0)).unwrap();
        assert_eq!(l.teacher, TeacherId(1));
        assert_eq!(l.room, RoomId(0));
        assert!(t.lesson(SlotId(2), GroupId(0)).is_none());
        assert!(t.lesson(SlotId(0), GroupId(5)).is_none());
        assert!(t.slot(SlotId(9)).is_empty());
    }

    #[test]
    fn test_lessons_for_teacher() {
        let t = sample_timetable();
        let t0 = t.lessons_for_teacher(TeacherId(0));
        assert_eq!(t0.len(), 2);
        assert_eq!(t0[0].slot, SlotId(0));
        assert_eq!(t0[1].group, GroupId(1));
    }

    #[test]
    fn test_lessons_for_room_and_group() {
        let t = sample_timetable();
        assert_eq!(t.lessons_for_room(RoomId(0)).len(), 2);
        assert_eq!(t.lessons_for_room(RoomId(3)).len(), 0);
        assert_eq!(t.lessons_for_group(GroupId(1)).len(), 2);
    }

    #[test]
    fn test_empty_timetable() {
        let t = Timetable::from_grid(Vec::new());
        assert_eq!(t.group_count(), 0);
        assert_eq!(t.lesson_count(), 0);
        assert_eq!(t.iter().count(), 0);
    }

    #[test]
    fn test_violation_builder() {
        let v = Violation::new(ViolationType::RoomClash, "R1 twice")
            .at_slot(SlotId(3))
            .for_group(GroupId(1));
        assert_eq!(v.violation_type, ViolationType::RoomClash);
        assert_eq!(v.slot, Some(SlotId(3)));
        assert_eq!(v.group, Some(GroupId(1)));
    }

    #[test]
    fn test_serde_roundtrip() {
        let t = sample_timetable();
        let json = serde_json::to_string(&t).unwrap();
        let back: Timetable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
