//! Turns the raw optimizer assignment back into business routes.

mod route;
mod solution;

pub use self::{
    route::Route,
    solution::{SolveStatistics, Solution},
};

use tracing::{debug, instrument};

use crate::{
    checker::IntegrityError,
    model::routing_model::RoutingModel,
    problem::{routing_problem::RoutingProblem, vehicle::VehicleIdx},
    solver::optimizer::Assignment,
};

/// Walks the arc chain of every vehicle, from its start node until its end node.
#[instrument(skip_all, level = "debug")]
pub fn extract_routes(
    problem: &RoutingProblem,
    model: &RoutingModel,
    assignment: &Assignment,
) -> Result<Vec<Route>, IntegrityError> {
    if assignment.num_vehicles() != model.num_vehicles() {
        return Err(IntegrityError::VehicleCountMismatch {
            expected: model.num_vehicles(),
            actual: assignment.num_vehicles(),
        });
    }

    problem
        .vehicles_iter()
        .map(|(vehicle_id, _)| extract_route(problem, model, assignment, vehicle_id))
        .collect()
}

fn extract_route(
    problem: &RoutingProblem,
    model: &RoutingModel,
    assignment: &Assignment,
    vehicle_id: VehicleIdx,
) -> Result<Route, IntegrityError> {
    let vehicle = problem.vehicle(vehicle_id);
    let start = model.vehicle_start(vehicle_id);
    let end = model.vehicle_end(vehicle_id);

    let mut route = Route::new(vehicle_id, vehicle.start_location_id());

    // Served at departure: load only, no travel nor service.
    for &job_id in model.vehicle_start_jobs(vehicle_id) {
        route.add_job(job_id);
    }
    route.add_load(model.vehicle_start_load(vehicle_id));

    let mut current = start;
    let mut steps = 0;

    loop {
        // A valid chain visits every node at most once before reaching the end.
        if steps > model.num_nodes() {
            return Err(IntegrityError::BrokenArcChain {
                vehicle_id: vehicle.external_id(),
                steps,
            });
        }
        steps += 1;

        let next = assignment.next(vehicle_id, current).ok_or(
            IntegrityError::MissingSuccessor {
                vehicle_id: vehicle.external_id(),
                node: current.get(),
            },
        )?;

        if !model.is_sink(current) && !model.is_sink(next) {
            route.add_distance(model.distance(current, next));
        }

        // The end location is the last real node served, not the depot a closed route
        // returns to.
        if next == end {
            break;
        }

        if let Some(location_id) = model.location_id(next) {
            route.set_end_location_id(location_id);
        }

        for &job_id in model.lookup().jobs(next) {
            route.add_job(job_id);
        }
        route.add_load(model.lookup().demand(next));
        route.add_service_time(model.lookup().service_time(next));

        current = next;
    }

    debug!(
        vehicle_id = vehicle.external_id(),
        jobs = route.job_ids().len(),
        distance = route.total_distance(),
        duration = route.delivery_duration(),
        load = route.capacity_used(),
        "Extracted route"
    );

    Ok(route)
}
