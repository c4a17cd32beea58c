use crate::{
    json::types::{JobInput, RoutingRequest, VehicleInput},
    model::routing_model::{ModelBuilder, RoutingModel},
    problem::routing_problem::RoutingProblem,
    solver::{optimizer::Assignment, search_params::SearchParams},
};

/// `(id, start_index, capacity)`
pub type TestVehicle = (i64, i64, Option<i64>);

/// `(id, location_index, delivery, service)`
pub type TestJob = (i64, i64, Option<i64>, Option<i64>);

pub fn three_node_matrix() -> Vec<Vec<i64>> {
    vec![vec![0, 100, 200], vec![100, 0, 150], vec![200, 150, 0]]
}

/// Locations on a line, the distance is `|i - j| * step`.
pub fn line_matrix(size: usize, step: i64) -> Vec<Vec<i64>> {
    (0..size)
        .map(|i| {
            (0..size)
                .map(|j| (i as i64 - j as i64).abs() * step)
                .collect()
        })
        .collect()
}

pub fn create_test_request(
    matrix: Vec<Vec<i64>>,
    vehicles: Vec<TestVehicle>,
    jobs: Vec<TestJob>,
) -> RoutingRequest {
    RoutingRequest {
        vehicles: vehicles
            .into_iter()
            .map(|(id, start_index, capacity)| VehicleInput {
                id,
                start_index,
                capacity: capacity.map(|capacity| vec![capacity]),
            })
            .collect(),
        jobs: jobs
            .into_iter()
            .map(|(id, location_index, delivery, service)| JobInput {
                id,
                location_index,
                delivery: delivery.map(|delivery| vec![delivery]),
                service,
            })
            .collect(),
        matrix,
        open_routes: None,
        random_seed: None,
    }
}

pub fn create_test_problem(
    matrix: Vec<Vec<i64>>,
    vehicles: Vec<TestVehicle>,
    jobs: Vec<TestJob>,
) -> RoutingProblem {
    create_test_request(matrix, vehicles, jobs)
        .build_problem()
        .unwrap()
}

pub fn create_open_test_problem(
    matrix: Vec<Vec<i64>>,
    vehicles: Vec<TestVehicle>,
    jobs: Vec<TestJob>,
) -> RoutingProblem {
    let mut request = create_test_request(matrix, vehicles, jobs);
    request.open_routes = Some(true);
    request.build_problem().unwrap()
}

pub fn create_test_model(problem: &RoutingProblem) -> RoutingModel {
    ModelBuilder::new(problem).build()
}

/// Builds an assignment from explicit visit sequences, one per vehicle.
pub fn create_test_assignment(model: &RoutingModel, paths: Vec<Vec<usize>>) -> Assignment {
    let paths = paths
        .into_iter()
        .map(|path| path.into_iter().map(Into::into).collect())
        .collect::<Vec<_>>();

    Assignment::from_paths(model, &paths, 0)
}

pub fn fast_search_params() -> SearchParams {
    SearchParams {
        time_limit: jiff::SignedDuration::from_secs(10),
        iterations_without_improvement: 50,
        ..SearchParams::default()
    }
}
