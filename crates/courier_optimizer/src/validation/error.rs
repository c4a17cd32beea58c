use serde::Serialize;
use thiserror::Error;

/// Reasons a request is rejected before modeling. Each variant carries enough detail
/// to locate the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("no vehicles provided")]
    EmptyFleet,

    #[error("vehicle {vehicle_id} has a negative start_index {value}")]
    NegativeStartIndex { vehicle_id: i64, value: i64 },

    #[error("vehicle {vehicle_id} has a negative capacity {value}")]
    NegativeCapacity { vehicle_id: i64, value: i64 },

    #[error("job {job_id} has a negative location_index {value}")]
    NegativeLocationIndex { job_id: i64, value: i64 },

    #[error("job {job_id} has a negative service time {value}")]
    NegativeServiceDuration { job_id: i64, value: i64 },

    #[error("job {job_id} has a negative delivery {value}")]
    NegativeDelivery { job_id: i64, value: i64 },

    #[error("matrix cannot be empty")]
    EmptyMatrix,

    #[error("matrix must be square: row {row} has {actual} elements, expected {expected}")]
    NonSquareMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("distance cannot be negative at position [{row}][{column}]: {value}")]
    NegativeDistance { row: usize, column: usize, value: i64 },

    #[error("vehicle ids must be unique, duplicates: {duplicates:?}")]
    DuplicateVehicleIds { duplicates: Vec<i64> },

    #[error("job ids must be unique, duplicates: {duplicates:?}")]
    DuplicateJobIds { duplicates: Vec<i64> },

    #[error("vehicle {vehicle_id} start_index {index} exceeds matrix size {matrix_size}")]
    StartIndexOutOfBounds {
        vehicle_id: i64,
        index: i64,
        matrix_size: usize,
    },

    #[error("job {job_id} location_index {index} exceeds matrix size {matrix_size}")]
    LocationIndexOutOfBounds {
        job_id: i64,
        index: i64,
        matrix_size: usize,
    },

    #[error("distances, demands and service times add up to more than {limit}")]
    TotalsTooLarge { limit: i64 },

    #[error("vehicle {vehicle_id} capacity {capacity} cannot handle total demand {demand}")]
    InsufficientCapacity {
        vehicle_id: i64,
        capacity: i64,
        demand: i64,
    },
}
