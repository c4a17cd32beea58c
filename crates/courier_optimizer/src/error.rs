use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::{checker::IntegrityError, solver::optimizer::OptimizerError, validation::ValidationError};

/// Any failure of the solve pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Solver(#[from] OptimizerError),

    #[error("solving took {elapsed_seconds:.3}s, more than the time limit of {time_limit_seconds}s")]
    TimeLimitExceeded {
        time_limit_seconds: f64,
        elapsed_seconds: f64,
    },

    #[error(transparent)]
    Integrity(#[from] IntegrityError),
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The request has to be corrected by the caller.
    Validation,
    /// The request is valid but could not be solved.
    Solver,
    Timeout,
    /// Defect in the modeling or the extraction.
    Integrity,
}

impl SolveError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SolveError::Validation(_) => ErrorCategory::Validation,
            SolveError::Solver(OptimizerError::NoSolution { .. }) => ErrorCategory::Solver,
            SolveError::Solver(OptimizerError::TimeLimitReached { .. })
            | SolveError::TimeLimitExceeded { .. } => ErrorCategory::Timeout,
            SolveError::Integrity(_) => ErrorCategory::Integrity,
        }
    }

    /// Structured details, tagged with the machine readable `code` of the failure.
    pub fn details(&self) -> serde_json::Value {
        let details = match self {
            SolveError::Validation(error) => serde_json::to_value(error),
            SolveError::Solver(error) => serde_json::to_value(error),
            SolveError::Integrity(error) => serde_json::to_value(error),
            SolveError::TimeLimitExceeded {
                time_limit_seconds,
                elapsed_seconds,
            } => Ok(json!({
                "code": "time_limit_exceeded",
                "time_limit_seconds": time_limit_seconds,
                "elapsed_seconds": elapsed_seconds,
            })),
        };

        details.unwrap_or(serde_json::Value::Null)
    }

    pub fn code(&self) -> String {
        self.details()
            .get("code")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown")
            .to_owned()
    }
}
