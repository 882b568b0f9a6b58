//! Error types.
//!
//! Infeasibility is not an error: it is reported as
//! [`SearchOutcome::Infeasible`](crate::search::SearchOutcome::Infeasible).
//! Errors cover malformed input only.

use thiserror::Error;

use crate::config::ConfigError;
use crate::validation::ValidationError;

/// Errors raised before a search starts.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("invalid problem: {}", summarize(.0))]
    InvalidProblem(Vec<ValidationError>),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
