//! Re-verifies extracted routes against the request, independently of what the optimizer
//! claims about its own solution.

mod assignment;
mod capacity;
mod error;

pub use self::error::IntegrityError;

use tracing::{debug, instrument};

use crate::{extraction::Route, problem::routing_problem::RoutingProblem};

pub struct CheckerContext<'a> {
    pub problem: &'a RoutingProblem,
    pub routes: &'a [Route],
}

impl<'a> CheckerContext<'a> {
    pub fn new(problem: &'a RoutingProblem, routes: &'a [Route]) -> Self {
        Self { problem, routes }
    }

    pub fn check(&self) -> Result<(), IntegrityError> {
        assignment::check_assignment(self)?;
        capacity::check_capacity(self)?;

        Ok(())
    }
}

#[instrument(skip_all, level = "debug")]
pub fn check_solution(problem: &RoutingProblem, routes: &[Route]) -> Result<(), IntegrityError> {
    CheckerContext::new(problem, routes)
        .check()
        .inspect_err(|error| {
            debug!(%error, "Solution check failed");
        })
}
