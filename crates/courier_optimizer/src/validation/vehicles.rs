use crate::problem::job::DEFAULT_JOB_DEMAND;

use super::{ValidationContext, ValidationError, get_duplicates};

pub(super) fn check_fleet_not_empty(ctx: &ValidationContext) -> Result<(), ValidationError> {
    if ctx.request.vehicles.is_empty() {
        Err(ValidationError::EmptyFleet)
    } else {
        Ok(())
    }
}

pub(super) fn check_vehicle_fields(ctx: &ValidationContext) -> Result<(), ValidationError> {
    ctx.vehicles().try_for_each(|vehicle| {
        if vehicle.start_index < 0 {
            return Err(ValidationError::NegativeStartIndex {
                vehicle_id: vehicle.id,
                value: vehicle.start_index,
            });
        }

        match vehicle.first_capacity() {
            Some(capacity) if capacity < 0 => Err(ValidationError::NegativeCapacity {
                vehicle_id: vehicle.id,
                value: capacity,
            }),
            _ => Ok(()),
        }
    })
}

pub(super) fn check_unique_vehicle_ids(ctx: &ValidationContext) -> Result<(), ValidationError> {
    get_duplicates(ctx.vehicles().map(|vehicle| vehicle.id)).map_or(Ok(()), |duplicates| {
        Err(ValidationError::DuplicateVehicleIds { duplicates })
    })
}

pub(super) fn check_start_indices(ctx: &ValidationContext) -> Result<(), ValidationError> {
    let matrix_size = ctx.matrix_size();

    ctx.vehicles().try_for_each(|vehicle| {
        if usize::try_from(vehicle.start_index).map_or(true, |index| index >= matrix_size) {
            Err(ValidationError::StartIndexOutOfBounds {
                vehicle_id: vehicle.id,
                index: vehicle.start_index,
                matrix_size,
            })
        } else {
            Ok(())
        }
    })
}

/// A lone vehicle has to carry every job, so its capacity must cover the total demand.
pub(super) fn check_single_vehicle_capacity(
    ctx: &ValidationContext,
) -> Result<(), ValidationError> {
    let [vehicle] = ctx.request.vehicles.as_slice() else {
        return Ok(());
    };

    let Some(capacity) = vehicle.first_capacity() else {
        return Ok(());
    };

    let demand: i64 = ctx
        .jobs()
        .map(|job| job.first_delivery().unwrap_or(DEFAULT_JOB_DEMAND))
        .sum();

    if demand > capacity {
        Err(ValidationError::InsufficientCapacity {
            vehicle_id: vehicle.id,
            capacity,
            demand,
        })
    } else {
        Ok(())
    }
}
