use serde::Serialize;

use crate::define_index_newtype;

use super::location::LocationIdx;

define_index_newtype!(VehicleIdx, Vehicle);

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    external_id: i64,
    start_location_id: LocationIdx,
    capacity: Option<i64>,
}

impl Vehicle {
    pub fn new(external_id: i64, start_location_id: LocationIdx, capacity: Option<i64>) -> Self {
        Vehicle {
            external_id,
            start_location_id,
            capacity,
        }
    }

    pub fn external_id(&self) -> i64 {
        self.external_id
    }

    pub fn start_location_id(&self) -> LocationIdx {
        self.start_location_id
    }

    /// First dimension of the declared capacity vector, if any.
    pub fn capacity(&self) -> Option<i64> {
        self.capacity
    }

    pub fn has_capacity(&self) -> bool {
        self.capacity.is_some()
    }
}
