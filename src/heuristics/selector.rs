//! Built-in variable selectors.
//!
//! - **MRV**: fixed day-major scan; the first open cell wins.
//! - **DEGREE**: the slot with the most open groups wins.

use super::VariableSelector;
use crate::models::{GroupId, SlotId, TimetableProblem};
use crate::search::{AssignmentState, Cell};

/// Fixed-order selector.
///
/// Scans days, then periods, then groups, and returns the first unassigned
/// cell. Carries the minimum-remaining-values name, but counts no domain
/// sizes.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstUnassigned;

impl VariableSelector for FirstUnassigned {
    fn name(&self) -> &'static str {
        "MRV"
    }

    fn select(&self, state: &AssignmentState, problem: &TimetableProblem) -> Option<Cell> {
        problem
            .week
            .slots()
            .filter(|slot| slot.index() < state.slot_count())
            .find_map(|slot| first_open_group(state, slot).map(|group| Cell { slot, group }))
    }

    fn description(&self) -> &'static str {
        "First unassigned cell in day, period, group order"
    }
}

/// Degree heuristic.
///
/// Picks the slot with the most unassigned groups (earliest slot on ties),
/// then the first unassigned group in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MostUnassignedSlot;

impl VariableSelector for MostUnassignedSlot {
    fn name(&self) -> &'static str {
        "DEGREE"
    }

    fn select(&self, state: &AssignmentState, _problem: &TimetableProblem) -> Option<Cell> {
        let mut best: Option<(usize, SlotId)> = None;
        for (slot, _) in state.rows() {
            let open = state.unassigned_in_slot(slot);
            if open > 0 && best.map_or(true, |(most, _)| open > most) {
                best = Some((open, slot));
            }
        }

        let (_, slot) = best?;
        first_open_group(state, slot).map(|group| Cell { slot, group })
    }

    fn description(&self) -> &'static str {
        "Slot with the most unassigned groups"
    }
}

fn first_open_group(state: &AssignmentState, slot: SlotId) -> Option<GroupId> {
    state
        .slot(slot)
        .iter()
        .position(Option::is_none)
        .map(GroupId)
}
