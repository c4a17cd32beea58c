//! Checks a routing request for structural and business correctness before any model is built.

mod error;
mod jobs;
mod matrix;
mod totals;
mod vehicles;

pub use self::{error::ValidationError, totals::MAX_REQUEST_TOTAL};

use fxhash::FxHashSet;
use tracing::{debug, instrument};

use crate::json::types::{JobInput, RoutingRequest, VehicleInput};

pub struct ValidationContext<'a> {
    pub request: &'a RoutingRequest,
}

impl<'a> ValidationContext<'a> {
    pub fn new(request: &'a RoutingRequest) -> Self {
        Self { request }
    }

    /// Runs every rule in order and stops on the first failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        vehicles::check_fleet_not_empty(self)?;
        vehicles::check_vehicle_fields(self)?;
        jobs::check_job_fields(self)?;
        matrix::check_matrix(self)?;
        vehicles::check_unique_vehicle_ids(self)?;
        jobs::check_unique_job_ids(self)?;
        vehicles::check_start_indices(self)?;
        jobs::check_location_indices(self)?;
        totals::check_totals(self)?;
        vehicles::check_single_vehicle_capacity(self)?;

        Ok(())
    }

    fn vehicles(&self) -> impl Iterator<Item = &VehicleInput> {
        self.request.vehicles.iter()
    }

    fn jobs(&self) -> impl Iterator<Item = &JobInput> {
        self.request.jobs.iter()
    }

    fn matrix_size(&self) -> usize {
        self.request.matrix.len()
    }
}

#[instrument(skip_all, level = "debug")]
pub fn validate_request(request: &RoutingRequest) -> Result<(), ValidationError> {
    ValidationContext::new(request).validate().inspect_err(|error| {
        debug!(%error, "Request validation failed");
    })
}

/// Returns the ids occurring more than once, sorted, or `None` when all are unique.
fn get_duplicates(ids: impl Iterator<Item = i64>) -> Option<Vec<i64>> {
    let mut seen = FxHashSet::default();
    let mut duplicates = FxHashSet::default();

    for id in ids {
        if !seen.insert(id) {
            duplicates.insert(id);
        }
    }

    if duplicates.is_empty() {
        None
    } else {
        let mut duplicates = duplicates.into_iter().collect::<Vec<_>>();
        duplicates.sort_unstable();
        Some(duplicates)
    }
}
