use serde::Serialize;

use crate::define_index_newtype;

use super::location::LocationIdx;

define_index_newtype!(JobIdx, Job);

/// Demand of a job that does not declare a delivery vector.
pub const DEFAULT_JOB_DEMAND: i64 = 1;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Job {
    external_id: i64,
    location_id: LocationIdx,
    demand: i64,
    service_duration: i64,
}

impl Job {
    pub fn new(
        external_id: i64,
        location_id: LocationIdx,
        demand: Option<i64>,
        service_duration: Option<i64>,
    ) -> Self {
        Job {
            external_id,
            location_id,
            demand: demand.unwrap_or(DEFAULT_JOB_DEMAND),
            service_duration: service_duration.unwrap_or(0),
        }
    }

    pub fn external_id(&self) -> i64 {
        self.external_id
    }

    pub fn location_id(&self) -> LocationIdx {
        self.location_id
    }

    pub fn demand(&self) -> i64 {
        self.demand
    }

    pub fn service_duration(&self) -> i64 {
        self.service_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_defaults() {
        let job = Job::new(7, LocationIdx::new(2), None, None);

        assert_eq!(job.demand(), DEFAULT_JOB_DEMAND);
        assert_eq!(job.service_duration(), 0);
    }
}
