//! Weekly class timetabling as a constraint satisfaction problem.
//!
//! Assigns a (teacher, room, subject) lesson to every (slot, group) cell of
//! a week so that no teacher or room is double-booked and every group gets
//! a lecture and a lab for each subject of its curriculum.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Room`, `Teacher`, `Group`, `Subject`,
//!   `WeekGrid`, `TimetableProblem`, `Lesson`, `Timetable`
//! - **`search`**: Assignment state, constraint checker, backtracking driver, KPIs
//! - **`heuristics`**: Variable selectors (MRV, DEGREE) and value orderings
//!   (RANDOM, LCV, FC)
//! - **`config`**: TOML-loadable search configuration
//! - **`validation`**: Input integrity checks (id layout, coverage, room kinds)
//! - **`error`**: Errors raised before a search starts
//!
//! # Example
//!
//! ```
//! use u_timetable::models::TimetableProblem;
//! use u_timetable::search::{BacktrackingSolver, SearchOutcome};
//!
//! let problem = TimetableProblem::reference();
//! let report = BacktrackingSolver::new()
//!     .with_seed(7)
//!     .with_coverage_lookahead(true)
//!     .with_max_checks(50_000)
//!     .solve(&problem);
//!
//! match report.outcome {
//!     SearchOutcome::Solved(timetable) => assert_eq!(timetable.slot_count(), 20),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```
//!
//! # References
//!
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Schaerf (1999), "A Survey of Automated Timetabling"

pub mod config;
pub mod error;
pub mod heuristics;
pub mod models;
pub mod search;
pub mod validation;

pub use error::SolveError;
