use std::str::FromStr;

use jiff::Timestamp;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    checker::check_solution,
    error::SolveError,
    extraction::{SolveStatistics, Solution, extract_routes},
    json::types::{FromProblem, RoutingRequest, RoutingResponse},
    model::routing_model::ModelBuilder,
    problem::routing_problem::RoutingProblem,
};

use super::{
    local_search::LocalSearchOptimizer,
    optimizer::Optimizer,
    search_params::SearchParams,
};

/// What to do with a solution that took longer than the configured time limit.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeLimitPolicy {
    Reject,
    #[default]
    WarnAndReturn,
}

impl FromStr for TimeLimitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(TimeLimitPolicy::Reject),
            "warn" | "warn_and_return" => Ok(TimeLimitPolicy::WarnAndReturn),
            other => Err(format!(
                "unknown time limit policy '{other}', expected 'reject' or 'warn'"
            )),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    pub search: SearchParams,
    pub time_limit_policy: TimeLimitPolicy,
}

/// Runs a request through validation, modeling, optimization, extraction and the
/// solution checks. Every call builds its own model, so a service can be shared between
/// threads.
pub struct RoutingService<O = LocalSearchOptimizer> {
    config: SolverConfig,
    optimizer: O,
}

impl RoutingService<LocalSearchOptimizer> {
    pub fn new(config: SolverConfig) -> Self {
        RoutingService {
            config,
            optimizer: LocalSearchOptimizer,
        }
    }
}

impl<O: Optimizer> RoutingService<O> {
    pub fn with_optimizer(config: SolverConfig, optimizer: O) -> Self {
        RoutingService { config, optimizer }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    #[instrument(skip_all, level = "debug")]
    pub fn solve(&self, request: &RoutingRequest) -> Result<RoutingResponse, SolveError> {
        let problem = request.build_problem()?;
        let solution = self.solve_problem(&problem, request.random_seed)?;

        Ok(RoutingResponse::from_problem(&solution, &problem))
    }

    /// Solves an already validated problem. `random_seed` overrides the configured seed.
    #[instrument(skip_all, level = "debug")]
    pub fn solve_problem(
        &self,
        problem: &RoutingProblem,
        random_seed: Option<u64>,
    ) -> Result<Solution, SolveError> {
        let params = self.config.search.clone().with_random_seed(random_seed);

        let start = Timestamp::now();
        let model = ModelBuilder::new(problem).build();
        let assignment = self.optimizer.optimize(&model, &params)?;
        let solve_duration = Timestamp::now().duration_since(start);

        if solve_duration > params.time_limit {
            let time_limit_seconds = params.time_limit.as_secs_f64();
            let elapsed_seconds = solve_duration.as_secs_f64();

            match self.config.time_limit_policy {
                TimeLimitPolicy::Reject => {
                    return Err(SolveError::TimeLimitExceeded {
                        time_limit_seconds,
                        elapsed_seconds,
                    });
                }
                TimeLimitPolicy::WarnAndReturn => {
                    warn!(
                        time_limit_seconds,
                        elapsed_seconds, "Solve exceeded the time limit, returning the solution"
                    );
                }
            }
        }

        let routes = extract_routes(problem, &model, &assignment)?;
        check_solution(problem, &routes)?;

        let solution = Solution::new(
            routes,
            SolveStatistics {
                solve_duration,
                algorithm: params.algorithm(),
                objective_value: assignment.objective(),
                random_seed: params.random_seed,
                solutions_found: assignment.solutions_found(),
                stop_reason: assignment.stop_reason(),
            },
        );

        info!(
            solve_time = %solve_duration,
            total_delivery_duration = solution.total_delivery_duration(),
            objective = solution.objective_value(),
            vehicles_used = solution.non_empty_routes_iter().count(),
            "Solved routing problem"
        );

        Ok(solution)
    }
}
