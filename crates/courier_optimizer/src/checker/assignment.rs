use fxhash::FxHashMap;

use super::{CheckerContext, IntegrityError};

/// Every requested job is served by exactly one route, once.
pub fn check_assignment(ctx: &CheckerContext) -> Result<(), IntegrityError> {
    let mut served = FxHashMap::<i64, usize>::default();

    for job_id in ctx
        .routes
        .iter()
        .flat_map(|route| route.job_ids())
        .map(|&job_id| ctx.problem.job(job_id).external_id())
    {
        *served.entry(job_id).or_insert(0) += 1;
    }

    let mut unassigned = ctx
        .problem
        .jobs()
        .iter()
        .map(|job| job.external_id())
        .filter(|job_id| !served.contains_key(job_id))
        .collect::<Vec<_>>();

    if !unassigned.is_empty() {
        unassigned.sort_unstable();
        return Err(IntegrityError::UnassignedJobs {
            job_ids: unassigned,
        });
    }

    let mut duplicates = served
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(job_id, _)| job_id)
        .collect::<Vec<_>>();

    if !duplicates.is_empty() {
        duplicates.sort_unstable();
        return Err(IntegrityError::DuplicateJobs {
            job_ids: duplicates,
        });
    }

    Ok(())
}
