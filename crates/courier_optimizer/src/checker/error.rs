use serde::Serialize;
use thiserror::Error;

/// A solution contradicting the request. Always a defect of the modeling or of the
/// extraction, never a condition worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum IntegrityError {
    #[error("assignment covers {actual} vehicles, the model has {expected}")]
    VehicleCountMismatch { expected: usize, actual: usize },
    #[error("vehicle {vehicle_id} has no successor for node {node}")]
    MissingSuccessor { vehicle_id: i64, node: usize },
    #[error("route of vehicle {vehicle_id} never reaches its end node after {steps} steps")]
    BrokenArcChain { vehicle_id: i64, steps: usize },
    #[error("jobs {job_ids:?} are not part of any route")]
    UnassignedJobs { job_ids: Vec<i64> },
    #[error("jobs {job_ids:?} are served more than once")]
    DuplicateJobs { job_ids: Vec<i64> },
    #[error("vehicle {vehicle_id} carries {demand} but its capacity is {capacity}")]
    CapacityExceeded {
        vehicle_id: i64,
        demand: i64,
        capacity: i64,
    },
    #[error("vehicle {vehicle_id} reports a load of {reported}, its jobs add up to {computed}")]
    CapacityMismatch {
        vehicle_id: i64,
        reported: i64,
        computed: i64,
    },
}
