//! Search ordering heuristics.
//!
//! The backtracking driver asks a [`VariableSelector`] which cell to fill
//! next and a [`ValueOrdering`] which lessons to try there. Both are
//! swappable: the hard constraints do not depend on the choice, only the
//! amount of search does.
//!
//! # Usage
//!
//! ```
//! use u_timetable::heuristics::{OrderingKind, SelectorKind};
//!
//! let selector = SelectorKind::MostUnassignedSlot.build();
//! let ordering = OrderingKind::ForwardChecking.build();
//! assert_eq!(selector.name(), "DEGREE");
//! assert_eq!(ordering.name(), "FC");
//! ```
//!
//! # References
//!
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Haralick & Elliott (1980), "Increasing Tree Search Efficiency for
//!   Constraint Satisfaction Problems"

pub mod ordering;
pub mod selector;

use std::fmt::Debug;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::models::{Lesson, TimetableProblem};
use crate::search::{AssignmentState, Cell};

/// Chooses the next unassigned cell.
pub trait VariableSelector: Send + Sync + Debug {
    /// Selector name (e.g., "MRV", "DEGREE").
    fn name(&self) -> &'static str;

    /// Returns the next cell to fill, or `None` when the grid is complete.
    fn select(&self, state: &AssignmentState, problem: &TimetableProblem) -> Option<Cell>;

    /// Selector description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Produces the candidate lessons for a cell.
///
/// Every candidate must pair a teacher with a subject they are qualified
/// for, and the subject must belong to the cell's group curriculum.
pub trait ValueOrdering: Send + Sync + Debug {
    /// Ordering name (e.g., "RANDOM", "LCV").
    fn name(&self) -> &'static str;

    /// Builds the candidate sequence for `cell`.
    fn candidates(
        &self,
        cell: Cell,
        state: &AssignmentState,
        problem: &TimetableProblem,
        rng: &mut dyn RngCore,
    ) -> Candidates;

    /// Ordering description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// A finite, consume-once sequence of candidate lessons.
///
/// Built once per cell visit and drained by the driver.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    inner: std::vec::IntoIter<Lesson>,
}

impl Candidates {
    /// Wraps an already ordered list.
    pub fn from_vec(lessons: Vec<Lesson>) -> Self {
        Self {
            inner: lessons.into_iter(),
        }
    }

    /// An empty sequence.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Candidates not yet consumed.
    pub fn remaining(&self) -> &[Lesson] {
        self.inner.as_slice()
    }
}

impl Iterator for Candidates {
    type Item = Lesson;

    fn next(&mut self) -> Option<Lesson> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Candidates {}

/// Configurable selector choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorKind {
    /// Fixed day/period/group scan ([`selector::FirstUnassigned`]).
    #[default]
    FirstUnassigned,
    /// Degree heuristic ([`selector::MostUnassignedSlot`]).
    MostUnassignedSlot,
}

impl SelectorKind {
    /// Instantiates the selector.
    pub fn build(self) -> Box<dyn VariableSelector> {
        match self {
            SelectorKind::FirstUnassigned => Box::new(selector::FirstUnassigned),
            SelectorKind::MostUnassignedSlot => Box::new(selector::MostUnassignedSlot),
        }
    }
}

/// Configurable value ordering choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingKind {
    /// Shuffled teachers, rooms and subjects ([`ordering::Randomized`]).
    #[default]
    Randomized,
    /// Least-constraining teachers first ([`ordering::LeastConstraining`]).
    LeastConstraining,
    /// Randomized, minus teachers and rooms busy in the slot
    /// ([`ordering::ForwardChecking`]).
    ForwardChecking,
}

impl OrderingKind {
    /// Instantiates the ordering.
    pub fn build(self) -> Box<dyn ValueOrdering> {
        match self {
            OrderingKind::Randomized => Box::new(ordering::Randomized),
            OrderingKind::LeastConstraining => Box::new(ordering::LeastConstraining),
            OrderingKind::ForwardChecking => Box::new(ordering::ForwardChecking),
        }
    }
}
