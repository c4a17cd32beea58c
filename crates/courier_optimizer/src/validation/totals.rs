use crate::problem::job::DEFAULT_JOB_DEMAND;

use super::{ValidationContext, ValidationError};

/// Bound on the sum of every distance, demand and service time of a request. Route cumuls,
/// insertion deltas and the time horizon are all built from these values, the margin keeps
/// their intermediate sums in range.
pub const MAX_REQUEST_TOTAL: i64 = i64::MAX / 2;

pub(super) fn check_totals(ctx: &ValidationContext) -> Result<(), ValidationError> {
    let distances = ctx.request.matrix.iter().flatten().copied();
    let demands = ctx
        .jobs()
        .map(|job| job.first_delivery().unwrap_or(DEFAULT_JOB_DEMAND));
    let services = ctx.jobs().map(|job| job.service.unwrap_or(0));

    distances
        .chain(demands)
        .chain(services)
        .try_fold(0_i64, |total, value| {
            total
                .checked_add(value)
                .filter(|&total| total <= MAX_REQUEST_TOTAL)
        })
        .map(|_| ())
        .ok_or(ValidationError::TotalsTooLarge {
            limit: MAX_REQUEST_TOTAL,
        })
}
