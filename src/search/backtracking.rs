//! Chronological backtracking driver.
//!
//! # Algorithm
//!
//! 1. Ask the selector for the next open cell; none left means success.
//! 2. Build the cell's candidate lessons with the value ordering.
//! 3. For each candidate: assign, check, and recurse if the check passes.
//! 4. On failure, unassign and try the next candidate.
//! 5. When candidates run out, report failure one level up.
//!
//! Teacher and room clashes are rejected as soon as they appear, long
//! before the grid is complete. Coverage is only checked on complete grids
//! unless the coverage lookahead is enabled.
//!
//! Search limits are tested on entry to each level only, so the check
//! budget can be overshot by the rejected candidates of one cell. Hitting
//! a limit unwinds the whole stack, clearing every tentative assignment.
//!
//! # Reference
//! Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", Ch. 6.3

use std::fmt;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

use super::{AssignmentState, ConstraintChecker};
use crate::config::SearchConfig;
use crate::error::SolveError;
use crate::heuristics::{ValueOrdering, VariableSelector};
use crate::models::{Timetable, TimetableProblem};
use crate::validation::validate_problem;

/// Why a search stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchLimit {
    /// The constraint-check budget ran out.
    Checks,
    /// The wall-clock limit elapsed.
    Time,
}

impl fmt::Display for SearchLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchLimit::Checks => f.write_str("check limit"),
            SearchLimit::Time => f.write_str("time limit"),
        }
    }
}

/// Result of a search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A timetable satisfying every hard constraint.
    Solved(Timetable),
    /// The search space was exhausted without a solution.
    Infeasible,
    /// A configured limit stopped the search first.
    LimitReached(SearchLimit),
}

impl SearchOutcome {
    /// Whether a timetable was found.
    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved(_))
    }

    /// Whether the search proved there is no solution.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, SearchOutcome::Infeasible)
    }

    /// The timetable, if one was found.
    pub fn timetable(&self) -> Option<&Timetable> {
        match self {
            SearchOutcome::Solved(t) => Some(t),
            _ => None,
        }
    }

    /// Takes the timetable, if one was found.
    pub fn into_timetable(self) -> Option<Timetable> {
        match self {
            SearchOutcome::Solved(t) => Some(t),
            _ => None,
        }
    }
}

/// Search counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Constraint checks performed.
    pub checks: u64,
    /// Search levels entered.
    pub nodes: u64,
    /// Cells whose candidates were exhausted.
    pub backtracks: u64,
    /// Deepest level reached (= most cells assigned at once).
    pub max_depth: usize,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// Outcome plus counters.
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// What the search produced.
    pub outcome: SearchOutcome,
    /// How much work it took.
    pub stats: SearchStats,
}

/// Backtracking timetable solver.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Group, Room, Teacher, TimetableProblem, WeekGrid};
/// use u_timetable::search::BacktrackingSolver;
///
/// let problem = TimetableProblem::new(WeekGrid::new(1, 2))
///     .with_subject_count(1)
///     .with_room(Room::lecture(0usize))
///     .with_room(Room::lab(1usize))
///     .with_teacher(Teacher::new(0usize).with_qualification(0usize))
///     .with_group(Group::new(0usize).with_subject(0usize));
///
/// let report = BacktrackingSolver::new().with_seed(1).solve(&problem);
/// assert!(report.outcome.is_solved());
/// ```
#[derive(Debug)]
pub struct BacktrackingSolver {
    selector: Box<dyn VariableSelector>,
    ordering: Box<dyn ValueOrdering>,
    config: SearchConfig,
}

impl BacktrackingSolver {
    /// Creates a solver with the default configuration.
    pub fn new() -> Self {
        Self::from_config(SearchConfig::default())
    }

    /// Creates a solver from a configuration.
    pub fn from_config(config: SearchConfig) -> Self {
        Self {
            selector: config.selector.build(),
            ordering: config.ordering.build(),
            config,
        }
    }

    /// Replaces the variable selector.
    pub fn with_selector<S: VariableSelector + 'static>(mut self, selector: S) -> Self {
        self.selector = Box::new(selector);
        self
    }

    /// Replaces the value ordering.
    pub fn with_ordering<O: ValueOrdering + 'static>(mut self, ordering: O) -> Self {
        self.ordering = Box::new(ordering);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Enables or disables the coverage lookahead.
    pub fn with_coverage_lookahead(mut self, enabled: bool) -> Self {
        self.config.coverage_lookahead = enabled;
        self
    }

    /// Sets the constraint-check budget.
    pub fn with_max_checks(mut self, max_checks: u64) -> Self {
        self.config.max_checks = Some(max_checks);
        self
    }

    /// Sets the wall-clock limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.config = self.config.with_time_limit(limit);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Validates the problem, then searches.
    ///
    /// # Errors
    /// [`SolveError::InvalidProblem`] if validation finds any issue.
    pub fn try_solve(&self, problem: &TimetableProblem) -> Result<SearchReport, SolveError> {
        validate_problem(problem).map_err(SolveError::InvalidProblem)?;
        Ok(self.solve(problem))
    }

    /// Searches for a timetable.
    ///
    /// Malformed problems are not detected and show up as
    /// [`SearchOutcome::Infeasible`].
    pub fn solve(&self, problem: &TimetableProblem) -> SearchReport {
        let mut state = AssignmentState::for_problem(problem);
        let (step, stats) = self.run(problem, &mut state);

        let outcome = match step {
            // The selector only stops on a complete grid.
            Step::Solved => state
                .into_timetable()
                .map_or(SearchOutcome::Infeasible, SearchOutcome::Solved),
            Step::Exhausted => SearchOutcome::Infeasible,
            Step::Aborted(limit) => SearchOutcome::LimitReached(limit),
        };

        info!(
            selector = self.selector.name(),
            ordering = self.ordering.name(),
            solved = outcome.is_solved(),
            checks = stats.checks,
            backtracks = stats.backtracks,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "Search finished"
        );

        SearchReport { outcome, stats }
    }

    /// Runs the search on a caller-owned state.
    ///
    /// On any result other than `Solved` the state is back to how it was
    /// passed in.
    pub(crate) fn run(
        &self,
        problem: &TimetableProblem,
        state: &mut AssignmentState,
    ) -> (Step, SearchStats) {
        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        info!(
            slots = state.slot_count(),
            groups = state.group_count(),
            selector = self.selector.name(),
            ordering = self.ordering.name(),
            seed = ?self.config.seed,
            "Search started"
        );

        let checks_before = state.checks();
        let mut search = Search {
            problem,
            selector: self.selector.as_ref(),
            ordering: self.ordering.as_ref(),
            checker: ConstraintChecker::new()
                .with_coverage_lookahead(self.config.coverage_lookahead),
            rng,
            max_checks: self.config.max_checks.map(|m| checks_before.saturating_add(m)),
            deadline: self.config.time_limit().map(|d| Instant::now() + d),
            started: Instant::now(),
            stats: SearchStats::default(),
        };

        let step = search.descend(state, 0);
        search.stats.checks = state.checks() - checks_before;
        search.stats.elapsed = search.started.elapsed();
        (step, search.stats)
    }
}

impl Default for BacktrackingSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one search level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Solved,
    Exhausted,
    Aborted(SearchLimit),
}

struct Search<'a> {
    problem: &'a TimetableProblem,
    selector: &'a dyn VariableSelector,
    ordering: &'a dyn ValueOrdering,
    checker: ConstraintChecker,
    rng: StdRng,
    max_checks: Option<u64>,
    deadline: Option<Instant>,
    started: Instant,
    stats: SearchStats,
}

impl Search<'_> {
    fn descend(&mut self, state: &mut AssignmentState, depth: usize) -> Step {
        if let Some(limit) = self.limit_hit(state) {
            debug!(%limit, depth, checks = state.checks(), "Search limit reached");
            return Step::Aborted(limit);
        }

        self.stats.nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let Some(cell) = self.selector.select(state, self.problem) else {
            // Nothing was assigned at the root, so nothing was checked yet.
            if depth == 0 && !self.checker.check(state, self.problem) {
                return Step::Exhausted;
            }
            return Step::Solved;
        };

        let candidates = self
            .ordering
            .candidates(cell, state, self.problem, &mut self.rng);

        for lesson in candidates {
            state.assign(cell.slot, cell.group, lesson);

            if self.checker.check(state, self.problem) {
                match self.descend(state, depth + 1) {
                    Step::Solved => return Step::Solved,
                    Step::Aborted(limit) => {
                        state.unassign(cell.slot, cell.group);
                        return Step::Aborted(limit);
                    }
                    Step::Exhausted => {}
                }
            }

            state.unassign(cell.slot, cell.group);
        }

        self.stats.backtracks += 1;
        trace!(slot = %cell.slot, group = %cell.group, depth, "Candidates exhausted");
        Step::Exhausted
    }

    fn limit_hit(&self, state: &AssignmentState) -> Option<SearchLimit> {
        if self.max_checks.is_some_and(|max| state.checks() >= max) {
            return Some(SearchLimit::Checks);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Some(SearchLimit::Time);
        }
        None
    }
}
