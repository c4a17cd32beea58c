use crate::problem::{job::JobIdx, location::LocationIdx, vehicle::VehicleIdx};

/// Jobs served by one vehicle, in visiting order, with the aggregates of the traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    vehicle_id: VehicleIdx,
    job_ids: Vec<JobIdx>,
    total_distance: i64,
    total_service_time: i64,
    capacity_used: i64,
    start_location_id: LocationIdx,
    end_location_id: LocationIdx,
}

impl Route {
    pub fn new(vehicle_id: VehicleIdx, start_location_id: LocationIdx) -> Self {
        Route {
            vehicle_id,
            job_ids: Vec::new(),
            total_distance: 0,
            total_service_time: 0,
            capacity_used: 0,
            start_location_id,
            end_location_id: start_location_id,
        }
    }

    pub(crate) fn add_job(&mut self, job_id: JobIdx) {
        self.job_ids.push(job_id);
    }

    pub(crate) fn add_distance(&mut self, distance: i64) {
        self.total_distance += distance;
    }

    pub(crate) fn add_service_time(&mut self, service_time: i64) {
        self.total_service_time += service_time;
    }

    pub(crate) fn add_load(&mut self, demand: i64) {
        self.capacity_used += demand;
    }

    pub(crate) fn set_end_location_id(&mut self, location_id: LocationIdx) {
        self.end_location_id = location_id;
    }

    pub fn vehicle_id(&self) -> VehicleIdx {
        self.vehicle_id
    }

    pub fn job_ids(&self) -> &[JobIdx] {
        &self.job_ids
    }

    pub fn is_empty(&self) -> bool {
        self.job_ids.is_empty()
    }

    pub fn total_distance(&self) -> i64 {
        self.total_distance
    }

    pub fn total_service_time(&self) -> i64 {
        self.total_service_time
    }

    /// Travel plus service time.
    pub fn delivery_duration(&self) -> i64 {
        self.total_distance + self.total_service_time
    }

    pub fn capacity_used(&self) -> i64 {
        self.capacity_used
    }

    pub fn start_location_id(&self) -> LocationIdx {
        self.start_location_id
    }

    /// Last real location of the route. Never the sink.
    pub fn end_location_id(&self) -> LocationIdx {
        self.end_location_id
    }
}
