use crate::utils::enumerate_idx::EnumerateIdx;

use super::{
    distance_matrix::{Distance, DistanceMatrix},
    job::{Job, JobIdx},
    location::LocationIdx,
    vehicle::{Vehicle, VehicleIdx},
};

/// Validated, index-based view of a routing request.
#[derive(Debug, Clone)]
pub struct RoutingProblem {
    vehicles: Vec<Vehicle>,
    jobs: Vec<Job>,
    matrix: DistanceMatrix,
    open_routes: bool,
}

impl RoutingProblem {
    pub fn new(
        vehicles: Vec<Vehicle>,
        jobs: Vec<Job>,
        matrix: DistanceMatrix,
        open_routes: bool,
    ) -> Self {
        RoutingProblem {
            vehicles,
            jobs,
            matrix,
            open_routes,
        }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, vehicle_id: VehicleIdx) -> &Vehicle {
        &self.vehicles[vehicle_id]
    }

    pub fn vehicles_iter(&self) -> impl Iterator<Item = (VehicleIdx, &Vehicle)> {
        self.vehicles.iter().enumerate_idx()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job(&self, job_id: JobIdx) -> &Job {
        &self.jobs[job_id]
    }

    pub fn jobs_iter(&self) -> impl Iterator<Item = (JobIdx, &Job)> {
        self.jobs.iter().enumerate_idx()
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    pub fn num_locations(&self) -> usize {
        self.matrix.num_locations()
    }

    pub fn travel_distance(&self, from: LocationIdx, to: LocationIdx) -> Distance {
        self.matrix.travel_distance(from, to)
    }

    /// Vehicles are not required to come back to their start location.
    pub fn has_open_routes(&self) -> bool {
        self.open_routes
    }

    pub fn has_capacity(&self) -> bool {
        self.vehicles.iter().any(|vehicle| vehicle.has_capacity())
    }

    pub fn has_service_durations(&self) -> bool {
        self.jobs.iter().any(|job| job.service_duration() > 0)
    }

    pub fn total_demand(&self) -> i64 {
        self.jobs.iter().map(|job| job.demand()).sum()
    }

    pub fn total_service_duration(&self) -> i64 {
        self.jobs.iter().map(|job| job.service_duration()).sum()
    }
}
