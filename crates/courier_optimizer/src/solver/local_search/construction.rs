use tracing::{debug, instrument};

use crate::{
    model::{
        dimension::DimensionKind,
        routing_model::{NodeIdx, RoutingModel},
    },
    problem::vehicle::VehicleIdx,
    solver::optimizer::OptimizerError,
};

use super::{SearchClock, working_solution::WorkingSolution};

struct Insertion {
    node_position: usize,
    vehicle_id: VehicleIdx,
    position: usize,
    cost: i64,
}

/// Cumul of every dimension at the end of each route, kept up to date while inserting.
struct RouteCumuls {
    load: Vec<i64>,
    time: Vec<i64>,
}

/// Parallel cheapest insertion: at every step, inserts the pending visit whose best feasible
/// insertion over all routes and positions is the cheapest.
#[instrument(skip_all, level = "debug")]
pub fn construct_solution(
    model: &RoutingModel,
    clock: &SearchClock,
) -> Result<WorkingSolution, OptimizerError> {
    let mut solution = WorkingSolution::empty(model);

    let mut cumuls = RouteCumuls {
        load: model
            .vehicles_iter()
            .map(|vehicle_id| model.route_cumul(DimensionKind::Capacity, vehicle_id, &[]))
            .collect(),
        time: vec![0; model.num_vehicles()],
    };

    let mut pending = model.visits().to_vec();

    while !pending.is_empty() {
        if clock.is_expired() {
            return Err(OptimizerError::TimeLimitReached {
                time_limit_seconds: clock.time_limit().as_secs_f64(),
            });
        }

        let Some(insertion) = find_cheapest_insertion(model, &solution, &cumuls, &pending) else {
            debug!(unassigned = pending.len(), "No feasible insertion left");
            return Err(OptimizerError::NoSolution {
                unassigned: pending.len(),
            });
        };

        let node = pending.remove(insertion.node_position);
        let (previous, next) = neighbours(model, &solution, insertion.vehicle_id, insertion.position);
        let vehicle_index = insertion.vehicle_id.get();

        cumuls.load[vehicle_index] += model.lookup().demand(node);
        cumuls.time[vehicle_index] += insertion_transit(model, previous, node, next);

        solution.insert(insertion.vehicle_id, insertion.position, node);
    }

    Ok(solution)
}

fn find_cheapest_insertion(
    model: &RoutingModel,
    solution: &WorkingSolution,
    cumuls: &RouteCumuls,
    pending: &[NodeIdx],
) -> Option<Insertion> {
    let mut best: Option<Insertion> = None;

    for (node_position, &node) in pending.iter().enumerate() {
        for vehicle_id in model.vehicles_iter() {
            let vehicle_index = vehicle_id.get();

            if !model.can_visit(vehicle_id, node) {
                continue;
            }

            if let Some(capacity) = model.capacity_dimension()
                && cumuls.load[vehicle_index] + model.lookup().demand(node)
                    > capacity.vehicle_capacity(vehicle_index)
            {
                continue;
            }

            for position in 0..=solution.route(vehicle_id).len() {
                let (previous, next) = neighbours(model, solution, vehicle_id, position);

                if let Some(time) = model.time_dimension()
                    && cumuls.time[vehicle_index] + insertion_transit(model, previous, node, next)
                        > time.vehicle_capacity(vehicle_index)
                {
                    continue;
                }

                let cost = model.arc_cost(previous, node) + model.arc_cost(node, next)
                    - model.arc_cost(previous, next);

                if best.as_ref().is_none_or(|best| cost < best.cost) {
                    best = Some(Insertion {
                        node_position,
                        vehicle_id,
                        position,
                        cost,
                    });
                }
            }
        }
    }

    best
}

fn neighbours(
    model: &RoutingModel,
    solution: &WorkingSolution,
    vehicle_id: VehicleIdx,
    position: usize,
) -> (NodeIdx, NodeIdx) {
    let route = solution.route(vehicle_id);
    let previous = if position == 0 {
        model.vehicle_start(vehicle_id)
    } else {
        route[position - 1]
    };
    let next = route
        .get(position)
        .copied()
        .unwrap_or_else(|| model.vehicle_end(vehicle_id));

    (previous, next)
}

fn insertion_transit(model: &RoutingModel, previous: NodeIdx, node: NodeIdx, next: NodeIdx) -> i64 {
    model.transit(DimensionKind::Time, previous, node) + model.transit(DimensionKind::Time, node, next)
        - model.transit(DimensionKind::Time, previous, next)
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use crate::test_utils;

    use super::*;

    fn clock() -> SearchClock {
        SearchClock::start(SignedDuration::from_secs(10))
    }

    #[test]
    fn test_inserts_every_visit() {
        let problem = test_utils::create_test_problem(
            test_utils::three_node_matrix(),
            vec![(1, 0, Some(10))],
            vec![(1, 1, Some(2), None), (2, 2, Some(3), None)],
        );
        let model = test_utils::create_test_model(&problem);
        let solution = construct_solution(&model, &clock()).unwrap();

        let mut visits = solution.route(VehicleIdx::new(0)).to_vec();
        visits.sort();
        assert_eq!(visits, vec![NodeIdx::new(1), NodeIdx::new(2)]);
        assert_eq!(solution.objective(&model), 450);
    }

    #[test]
    fn test_respects_capacity() {
        let problem = test_utils::create_test_problem(
            test_utils::line_matrix(5, 10),
            vec![(1, 0, Some(2)), (2, 0, Some(2))],
            vec![
                (1, 1, None, None),
                (2, 2, None, None),
                (3, 3, None, None),
                (4, 4, None, None),
            ],
        );
        let model = test_utils::create_test_model(&problem);
        let solution = construct_solution(&model, &clock()).unwrap();

        for vehicle_id in model.vehicles_iter() {
            assert_eq!(solution.route(vehicle_id).len(), 2);
            assert!(model.is_route_feasible(vehicle_id, solution.route(vehicle_id)));
        }
    }

    #[test]
    fn test_no_solution_when_fleet_is_too_small() {
        let problem = test_utils::create_test_problem(
            test_utils::three_node_matrix(),
            vec![(1, 0, Some(2)), (2, 0, Some(2))],
            vec![(1, 1, Some(2), None), (2, 2, Some(2), None), (3, 2, Some(1), None)],
        );
        let model = test_utils::create_test_model(&problem);

        assert_eq!(
            construct_solution(&model, &clock()).unwrap_err(),
            OptimizerError::NoSolution { unassigned: 1 }
        );
    }

    /// Closed tours on this matrix leave a horizon of 30 with two 5 minute services, so
    /// `0 -> 1 -> 2 -> 0` (31) is too long while each job alone (25) fits.
    fn tight_horizon_matrix() -> Vec<Vec<i64>> {
        vec![vec![0, 10, 10], vec![10, 0, 1], vec![10, 1, 0]]
    }

    #[test]
    fn test_time_horizon_splits_routes() {
        let problem = test_utils::create_test_problem(
            tight_horizon_matrix(),
            vec![(1, 0, None), (2, 0, None)],
            vec![(1, 1, None, Some(5)), (2, 2, None, Some(5))],
        );
        let model = test_utils::create_test_model(&problem);
        let solution = construct_solution(&model, &clock()).unwrap();

        for vehicle_id in model.vehicles_iter() {
            assert_eq!(solution.route(vehicle_id).len(), 1);
            assert!(model.is_route_feasible(vehicle_id, solution.route(vehicle_id)));
        }
        assert_eq!(solution.objective(&model), 50);
    }

    #[test]
    fn test_time_horizon_without_spare_vehicle() {
        let problem = test_utils::create_test_problem(
            tight_horizon_matrix(),
            vec![(1, 0, None)],
            vec![(1, 1, None, Some(5)), (2, 2, None, Some(5))],
        );
        let model = test_utils::create_test_model(&problem);

        assert_eq!(
            construct_solution(&model, &clock()).unwrap_err(),
            OptimizerError::NoSolution { unassigned: 1 }
        );
    }

    #[test]
    fn test_start_node_jobs_visited_by_another_vehicle() {
        let problem = test_utils::create_test_problem(
            test_utils::three_node_matrix(),
            vec![(1, 0, Some(2)), (2, 1, Some(10))],
            vec![(1, 0, Some(5), None), (2, 1, Some(1), None)],
        );
        let model = test_utils::create_test_model(&problem);
        let solution = construct_solution(&model, &clock()).unwrap();

        assert!(solution.route(VehicleIdx::new(0)).is_empty());
        assert_eq!(solution.route(VehicleIdx::new(1)), &[NodeIdx::new(0)]);
    }

    #[test]
    fn test_time_limit_reached() {
        let problem = test_utils::create_test_problem(
            test_utils::three_node_matrix(),
            vec![(1, 0, None)],
            vec![(1, 1, None, None)],
        );
        let model = test_utils::create_test_model(&problem);
        let clock = SearchClock::start(SignedDuration::from_secs(-1));

        assert!(matches!(
            construct_solution(&model, &clock),
            Err(OptimizerError::TimeLimitReached { .. })
        ));
    }
}
