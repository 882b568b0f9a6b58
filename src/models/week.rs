//! Weekly lesson grid geometry.
//!
//! The week is `days × periods_per_day` lesson slots. Slots are numbered
//! day-major: `slot = day * periods_per_day + period`.

use serde::{Deserialize, Serialize};

use super::SlotId;

/// Fixed weekly grid of lesson slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekGrid {
    /// Teaching days per week.
    pub days: usize,
    /// Lesson periods per day.
    pub periods_per_day: usize,
}

impl WeekGrid {
    /// Creates a grid.
    pub const fn new(days: usize, periods_per_day: usize) -> Self {
        Self {
            days,
            periods_per_day,
        }
    }

    /// Total number of lesson slots.
    #[inline]
    pub const fn total_slots(&self) -> usize {
        self.days * self.periods_per_day
    }

    /// Slot for a (day, period) pair.
    #[inline]
    pub const fn slot(&self, day: usize, period: usize) -> SlotId {
        SlotId(day * self.periods_per_day + period)
    }

    /// Splits a slot into (day, period).
    ///
    /// Returns `None` if the slot is outside the grid.
    pub fn day_period(&self, slot: SlotId) -> Option<(usize, usize)> {
        if self.periods_per_day == 0 || slot.0 >= self.total_slots() {
            return None;
        }
        Some((slot.0 / self.periods_per_day, slot.0 % self.periods_per_day))
    }

    /// Iterates slots day by day, period by period.
    pub fn slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        (0..self.days)
            .flat_map(move |d| (0..self.periods_per_day).map(move |p| self.slot(d, p)))
    }

    /// Slots that belong to `day`.
    pub fn slots_of_day(&self, day: usize) -> impl Iterator<Item = SlotId> + '_ {
        (0..self.periods_per_day).map(move |p| self.slot(day, p))
    }
}

impl Default for WeekGrid {
    /// Five days of four periods.
    fn default() -> Self {
        Self::new(5, 4)
    }
}
