use anyhow::Result;
use courier_optimizer::json::types::{RoutingRequest, RoutingResponse};
use jiff::Timestamp;
use parking_lot::RwLock;
use serde::Serialize;
use uuid::Uuid;

/// Vehicle of a solved request, saved on its own and referenced by the solution.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StoredVehicle {
    pub id: String,
    pub vehicle_id: i64,
    pub start_index: i64,
    pub capacity: Option<Vec<i64>>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StoredJob {
    pub id: String,
    pub job_id: i64,
    pub location_index: i64,
    pub delivery: Option<Vec<i64>>,
    pub service: Option<i64>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StoredSolution {
    pub id: String,
    pub timestamp: Timestamp,
    pub solution: RoutingResponse,
    pub vehicle_refs: Vec<String>,
    pub job_refs: Vec<String>,
}

/// Persistence of solved requests.
pub trait SolutionRepository: Send + Sync {
    /// Saves the vehicles, the jobs and the solution, returns the solution id.
    fn save(&self, request: &RoutingRequest, response: &RoutingResponse) -> Result<String>;

    fn get(&self, id: &str) -> Result<Option<StoredSolution>>;

    /// Most recent solutions first.
    fn recent(&self, limit: usize) -> Result<Vec<StoredSolution>>;
}

#[derive(Default)]
struct Collections {
    solutions: Vec<StoredSolution>,
    vehicles: Vec<StoredVehicle>,
    jobs: Vec<StoredJob>,
}

#[derive(Default)]
pub struct InMemorySolutionRepository {
    collections: RwLock<Collections>,
}

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

impl InMemorySolutionRepository {
    pub fn vehicle(&self, id: &str) -> Option<StoredVehicle> {
        self.collections
            .read()
            .vehicles
            .iter()
            .find(|vehicle| vehicle.id == id)
            .cloned()
    }

    pub fn job(&self, id: &str) -> Option<StoredJob> {
        self.collections
            .read()
            .jobs
            .iter()
            .find(|job| job.id == id)
            .cloned()
    }
}

impl SolutionRepository for InMemorySolutionRepository {
    fn save(&self, request: &RoutingRequest, response: &RoutingResponse) -> Result<String> {
        let vehicles = request
            .vehicles
            .iter()
            .map(|vehicle| StoredVehicle {
                id: generate_id(),
                vehicle_id: vehicle.id,
                start_index: vehicle.start_index,
                capacity: vehicle.capacity.clone(),
            })
            .collect::<Vec<_>>();

        let jobs = request
            .jobs
            .iter()
            .map(|job| StoredJob {
                id: generate_id(),
                job_id: job.id,
                location_index: job.location_index,
                delivery: job.delivery.clone(),
                service: job.service,
            })
            .collect::<Vec<_>>();

        let solution = StoredSolution {
            id: generate_id(),
            timestamp: Timestamp::now(),
            solution: response.clone(),
            vehicle_refs: vehicles.iter().map(|vehicle| vehicle.id.clone()).collect(),
            job_refs: jobs.iter().map(|job| job.id.clone()).collect(),
        };
        let id = solution.id.clone();

        let mut collections = self.collections.write();
        collections.vehicles.extend(vehicles);
        collections.jobs.extend(jobs);
        collections.solutions.push(solution);

        Ok(id)
    }

    fn get(&self, id: &str) -> Result<Option<StoredSolution>> {
        Ok(self
            .collections
            .read()
            .solutions
            .iter()
            .find(|solution| solution.id == id)
            .cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<StoredSolution>> {
        let collections = self.collections.read();
        let mut solutions = collections.solutions.iter().collect::<Vec<_>>();

        // Stable sort keeps insertion order for equal timestamps, reversed below.
        solutions.sort_by_key(|solution| solution.timestamp);

        Ok(solutions.into_iter().rev().take(limit).cloned().collect())
    }
}
