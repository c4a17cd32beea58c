use super::{CheckerContext, IntegrityError};

/// Recomputes the load of every route from the request and compares it with the declared
/// capacity and with the load reported by the extraction.
pub fn check_capacity(ctx: &CheckerContext) -> Result<(), IntegrityError> {
    ctx.routes.iter().try_for_each(|route| {
        let vehicle = ctx.problem.vehicle(route.vehicle_id());
        let demand = route
            .job_ids()
            .iter()
            .map(|&job_id| ctx.problem.job(job_id).demand())
            .sum::<i64>();

        if let Some(capacity) = vehicle.capacity()
            && demand > capacity
        {
            return Err(IntegrityError::CapacityExceeded {
                vehicle_id: vehicle.external_id(),
                demand,
                capacity,
            });
        }

        if demand != route.capacity_used() {
            return Err(IntegrityError::CapacityMismatch {
                vehicle_id: vehicle.external_id(),
                reported: route.capacity_used(),
                computed: demand,
            });
        }

        Ok(())
    })
}
