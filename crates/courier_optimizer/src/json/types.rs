use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    extraction::{Route, Solution},
    problem::{
        distance_matrix::DistanceMatrix, job::Job, location::LocationIdx,
        routing_problem::RoutingProblem, vehicle::Vehicle,
    },
    validation::{self, ValidationError},
};

pub trait FromProblem<T> {
    fn from_problem(value: T, problem: &RoutingProblem) -> Self;
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(deny_unknown_fields, rename = "RoutingRequest")]
pub struct RoutingRequest {
    pub vehicles: Vec<VehicleInput>,
    pub jobs: Vec<JobInput>,
    pub matrix: Vec<Vec<i64>>,
    /// Vehicles may finish their route anywhere instead of returning to their start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_routes: Option<bool>,
    /// Seed for the search, overrides the configured one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(deny_unknown_fields, rename = "Vehicle")]
pub struct VehicleInput {
    pub id: i64,
    pub start_index: i64,
    /// Only the first dimension is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Vec<i64>>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(deny_unknown_fields, rename = "Job")]
pub struct JobInput {
    pub id: i64,
    pub location_index: i64,
    /// Only the first dimension is used, a job without delivery consumes one unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<i64>,
}

impl VehicleInput {
    pub fn first_capacity(&self) -> Option<i64> {
        self.capacity
            .as_ref()
            .and_then(|capacity| capacity.first().copied())
    }
}

impl JobInput {
    pub fn first_delivery(&self) -> Option<i64> {
        self.delivery
            .as_ref()
            .and_then(|delivery| delivery.first().copied())
    }
}

impl RoutingRequest {
    /// Validates the request and converts it into an index based problem.
    #[instrument(skip_all, level = "debug")]
    pub fn build_problem(&self) -> Result<RoutingProblem, ValidationError> {
        validation::validate_request(self)?;

        let vehicles = self
            .vehicles
            .iter()
            .map(|vehicle| {
                let start = to_location(vehicle.start_index).ok_or(
                    ValidationError::NegativeStartIndex {
                        vehicle_id: vehicle.id,
                        value: vehicle.start_index,
                    },
                )?;
                Ok(Vehicle::new(vehicle.id, start, vehicle.first_capacity()))
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        let jobs = self
            .jobs
            .iter()
            .map(|job| {
                let location = to_location(job.location_index).ok_or(
                    ValidationError::NegativeLocationIndex {
                        job_id: job.id,
                        value: job.location_index,
                    },
                )?;
                Ok(Job::new(job.id, location, job.first_delivery(), job.service))
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(RoutingProblem::new(
            vehicles,
            jobs,
            DistanceMatrix::from_rows(&self.matrix),
            self.open_routes.unwrap_or(false),
        ))
    }
}

fn to_location(index: i64) -> Option<LocationIdx> {
    usize::try_from(index).ok().map(LocationIdx::new)
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename = "Route")]
pub struct RouteOutput {
    pub jobs: Vec<i64>,
    pub delivery_duration: i64,
    pub capacity_used: i64,
    pub total_service_time: i64,
    pub total_distance: i64,
    pub start_location: usize,
    pub end_location: usize,
}

impl FromProblem<&Route> for RouteOutput {
    fn from_problem(value: &Route, problem: &RoutingProblem) -> Self {
        RouteOutput {
            jobs: value
                .job_ids()
                .iter()
                .map(|&job_id| problem.job(job_id).external_id())
                .collect(),
            delivery_duration: value.delivery_duration(),
            capacity_used: value.capacity_used(),
            total_service_time: value.total_service_time(),
            total_distance: value.total_distance(),
            start_location: value.start_location_id().get(),
            end_location: value.end_location_id().get(),
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename = "SolveMetadata")]
pub struct SolveMetadata {
    pub solve_time_seconds: f64,
    pub algorithm: String,
    pub objective_value: i64,
    pub random_seed: u64,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename = "RoutingResponse")]
pub struct RoutingResponse {
    pub total_delivery_duration: i64,
    /// Keyed by the vehicle id.
    pub routes: BTreeMap<String, RouteOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SolveMetadata>,
}

impl FromProblem<&Solution> for RoutingResponse {
    fn from_problem(value: &Solution, problem: &RoutingProblem) -> Self {
        RoutingResponse {
            total_delivery_duration: value.total_delivery_duration(),
            routes: value
                .routes()
                .iter()
                .map(|route| {
                    (
                        problem.vehicle(route.vehicle_id()).external_id().to_string(),
                        RouteOutput::from_problem(route, problem),
                    )
                })
                .collect(),
            metadata: Some(SolveMetadata {
                solve_time_seconds: value.solve_duration().as_secs_f64(),
                algorithm: value.algorithm().to_owned(),
                objective_value: value.objective_value(),
                random_seed: value.random_seed(),
            }),
        }
    }
}
