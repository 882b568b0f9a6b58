//! Backtracking search and its supporting state.
//!
//! # Algorithm
//!
//! [`BacktrackingSolver`] fills the `[slot][group]` grid one cell at a time.
//! The cell comes from a [`VariableSelector`](crate::heuristics::VariableSelector),
//! the candidate lessons from a [`ValueOrdering`](crate::heuristics::ValueOrdering),
//! and every tentative assignment is vetted by the [`ConstraintChecker`].
//! Dead ends are undone in reverse order.
//!
//! # KPI
//!
//! [`TimetableKpi`] summarizes teacher load and room usage of a solved
//! timetable.
//!
//! # References
//!
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Schaerf (1999), "A Survey of Automated Timetabling"

mod backtracking;
mod checker;
mod kpi;
mod state;

pub use backtracking::{BacktrackingSolver, SearchLimit, SearchOutcome, SearchReport, SearchStats};
pub use checker::{check, ConstraintChecker};
pub use kpi::TimetableKpi;
pub use state::{AssignmentState, Cell};
