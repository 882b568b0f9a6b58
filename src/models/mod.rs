//! Timetabling domain models.
//!
//! Static facts of a problem (rooms, teachers, groups, subjects, the
//! weekly grid) and the read-only solution types.
//!
//! # Domain Mappings
//!
//! | u-timetable | University | School | Training Center |
//! |-------------|------------|--------|-----------------|
//! | Group | Study Group | Class | Cohort |
//! | Teacher | Lecturer | Teacher | Instructor |
//! | Room (lecture/lab) | Hall/Lab | Classroom/Workshop | Room/Bench |
//! | Slot | Lesson Period | Period | Session |

mod group;
mod ids;
mod problem;
mod room;
mod teacher;
mod timetable;
mod week;

pub use group::{Group, Subject};
pub use ids::{GroupId, RoomId, SlotId, SubjectId, TeacherId};
pub use problem::TimetableProblem;
pub use room::{Room, RoomKind};
pub use teacher::Teacher;
pub use timetable::{Lesson, PlacedLesson, Timetable, Violation, ViolationType};
pub use week::WeekGrid;
