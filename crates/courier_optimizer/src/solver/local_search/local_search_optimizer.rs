use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};
use tracing::{debug, instrument};

use crate::{
    model::routing_model::RoutingModel,
    problem::vehicle::VehicleIdx,
    solver::{
        optimizer::{Assignment, Optimizer, OptimizerError, StopReason},
        search_params::{LocalSearchMetaheuristic, SearchParams, Termination},
    },
};

use super::{
    SearchClock,
    construction::construct_solution,
    guided_local_search::{ArcPenalties, AugmentedCost, penalty_weight},
    moves::{LocalSearchMove, RouteChange},
    working_solution::WorkingSolution,
};

const IMPROVEMENT_EPSILON: f64 = 1e-6;

/// Cheapest insertion followed by a guided local search or a greedy descent.
///
/// For a given seed the search is deterministic as long as the time limit is not reached.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalSearchOptimizer;

impl Optimizer for LocalSearchOptimizer {
    #[instrument(skip_all, level = "debug")]
    fn optimize(
        &self,
        model: &RoutingModel,
        params: &SearchParams,
    ) -> Result<Assignment, OptimizerError> {
        LocalSearch::new(model, params).run()
    }
}

struct SearchState {
    solutions_found: usize,
    iterations_without_improvement: usize,
}

struct LocalSearch<'a> {
    model: &'a RoutingModel,
    params: &'a SearchParams,
    clock: SearchClock,
    penalties: ArcPenalties,
    penalty_weight: f64,
    rng: SmallRng,
}

impl<'a> LocalSearch<'a> {
    fn new(model: &'a RoutingModel, params: &'a SearchParams) -> Self {
        LocalSearch {
            model,
            params,
            clock: SearchClock::start(params.time_limit),
            penalties: ArcPenalties::default(),
            penalty_weight: 0.0,
            rng: SmallRng::seed_from_u64(params.random_seed),
        }
    }

    fn run(mut self) -> Result<Assignment, OptimizerError> {
        let mut current = construct_solution(self.model, &self.clock)?;
        let mut best = current.clone();
        let mut best_objective = best.objective(self.model);

        debug!(objective = best_objective, "First solution");

        let mut state = SearchState {
            solutions_found: 1,
            iterations_without_improvement: 0,
        };

        let stop_reason = loop {
            if let Some(reason) = self.should_terminate(&state) {
                break reason;
            }

            if let Some(changes) = self.find_improving_move(&current) {
                for (vehicle_id, visits) in changes {
                    current.replace_route(vehicle_id, visits);
                }
                state.solutions_found += 1;

                let objective = current.objective(self.model);
                if objective < best_objective {
                    best = current.clone();
                    best_objective = objective;
                    state.iterations_without_improvement = 0;
                }

                continue;
            }

            if best_objective == 0
                || self.params.local_search_metaheuristic == LocalSearchMetaheuristic::GreedyDescent
            {
                break StopReason::LocalOptimum;
            }

            if self.penalties.is_empty() {
                self.penalty_weight =
                    penalty_weight(self.params.guided_local_search_lambda, self.model, &current);
            }

            if !self.penalties.penalize(self.model, &current) {
                break StopReason::LocalOptimum;
            }
            state.iterations_without_improvement += 1;
        };

        debug!(
            objective = best_objective,
            solutions = state.solutions_found,
            ?stop_reason,
            elapsed = %self.clock.elapsed(),
            "Local search finished"
        );

        Ok(best
            .into_assignment(self.model)
            .with_search_outcome(state.solutions_found, stop_reason))
    }

    fn check_termination(&self, state: &SearchState, termination: &Termination) -> bool {
        match *termination {
            Termination::Duration(_) => self.clock.is_expired(),
            Termination::Solutions(max_solutions) => state.solutions_found >= max_solutions,
            Termination::IterationsWithoutImprovement(max_iterations) => {
                state.iterations_without_improvement >= max_iterations
            }
        }
    }

    fn should_terminate(&self, state: &SearchState) -> Option<StopReason> {
        self.params
            .terminations()
            .iter()
            .find(|termination| self.check_termination(state, termination))
            .map(|termination| {
                debug!("Termination condition met: {:?}", termination);
                match termination {
                    Termination::Duration(_) => StopReason::TimeLimit,
                    Termination::Solutions(_) => StopReason::SolutionLimit,
                    Termination::IterationsWithoutImprovement(_) => {
                        StopReason::IterationsWithoutImprovement
                    }
                }
            })
    }

    /// Scans the route pairs in a random order and returns the best feasible move of the
    /// first pair that lowers the augmented cost.
    fn find_improving_move(&mut self, solution: &WorkingSolution) -> Option<Vec<RouteChange>> {
        let model = self.model;
        let cost = AugmentedCost::new(model, &self.penalties, self.penalty_weight);

        let route_costs = model
            .vehicles_iter()
            .map(|vehicle_id| cost.route_cost(vehicle_id, solution.route(vehicle_id)))
            .collect::<Vec<_>>();

        let mut pairs = model
            .vehicles_iter()
            .flat_map(|r1| model.vehicles_iter().map(move |r2| (r1, r2)))
            .collect::<Vec<(VehicleIdx, VehicleIdx)>>();
        pairs.shuffle(&mut self.rng);

        for pair in pairs {
            let mut best: Option<(f64, Vec<RouteChange>)> = None;

            LocalSearchMove::generate_moves(solution, pair, |op| {
                let changes = op.route_changes(solution);
                let delta = changes
                    .iter()
                    .map(|(vehicle_id, visits)| {
                        cost.route_cost(*vehicle_id, visits) - route_costs[vehicle_id.get()]
                    })
                    .sum::<f64>();

                if delta >= -IMPROVEMENT_EPSILON
                    || best.as_ref().is_some_and(|(best_delta, _)| delta >= *best_delta)
                {
                    return;
                }

                if changes
                    .iter()
                    .all(|(vehicle_id, visits)| model.is_route_feasible(*vehicle_id, visits))
                {
                    best = Some((delta, changes));
                }
            });

            if let Some((_, changes)) = best {
                return Some(changes);
            }
        }

        None
    }
}
