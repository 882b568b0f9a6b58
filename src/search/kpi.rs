//! Timetable quality metrics (KPIs).
//!
//! Descriptive figures for a solved timetable. They do not affect the
//! search, which only enforces hard constraints.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Lessons per teacher | Count of lessons taught |
//! | Room utilization | Lessons held / slots in the week |
//! | Avg utilization | Mean room utilization |
//! | Lab share | Fraction of lessons held in labs |
//! | Teacher spread | Max minus min lessons per teacher |

use std::collections::BTreeMap;

use crate::models::{RoomId, RoomKind, TeacherId, Timetable, TimetableProblem};

/// Timetable performance indicators.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Total lessons placed.
    pub lesson_count: usize,
    /// Lessons taught by each teacher (teachers with none included).
    pub lessons_by_teacher: BTreeMap<TeacherId, usize>,
    /// Per-room utilization (0.0..1.0).
    pub utilization_by_room: BTreeMap<RoomId, f64>,
    /// Average room utilization (0.0..1.0).
    pub avg_utilization: f64,
    /// Fraction of lessons held in labs (0.0..1.0).
    pub lab_share: f64,
    /// Difference between the busiest and the idlest teacher.
    pub teacher_spread: usize,
}

impl TimetableKpi {
    /// Computes KPIs from a timetable and its problem.
    pub fn calculate(timetable: &Timetable, problem: &TimetableProblem) -> Self {
        let mut lessons_by_teacher: BTreeMap<TeacherId, usize> =
            problem.teachers.iter().map(|t| (t.id, 0)).collect();
        let mut held_by_room: BTreeMap<RoomId, usize> =
            problem.rooms.iter().map(|r| (r.id, 0)).collect();
        let mut lab_lessons = 0usize;

        for placed in timetable.iter() {
            *lessons_by_teacher.entry(placed.lesson.teacher).or_default() += 1;
            *held_by_room.entry(placed.lesson.room).or_default() += 1;
            if problem.room_kind(placed.lesson.room) == Some(RoomKind::Lab) {
                lab_lessons += 1;
            }
        }

        let lesson_count = timetable.lesson_count();
        let slots = timetable.slot_count();

        let utilization_by_room: BTreeMap<RoomId, f64> = held_by_room
            .into_iter()
            .map(|(room, held)| {
                let u = if slots == 0 {
                    0.0
                } else {
                    held as f64 / slots as f64
                };
                (room, u)
            })
            .collect();

        let avg_utilization = if utilization_by_room.is_empty() {
            0.0
        } else {
            utilization_by_room.values().sum::<f64>() / utilization_by_room.len() as f64
        };

        let lab_share = if lesson_count == 0 {
            0.0
        } else {
            lab_lessons as f64 / lesson_count as f64
        };

        let max = lessons_by_teacher.values().copied().max().unwrap_or(0);
        let min = lessons_by_teacher.values().copied().min().unwrap_or(0);

        Self {
            lesson_count,
            lessons_by_teacher,
            utilization_by_room,
            avg_utilization,
            lab_share,
            teacher_spread: max - min,
        }
    }

    /// Whether the timetable meets the given balance thresholds.
    pub fn meets_thresholds(&self, max_teacher_spread: usize, min_utilization: f64) -> bool {
        self.teacher_spread <= max_teacher_spread && self.avg_utilization >= min_utilization
    }
}
