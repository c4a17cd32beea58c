use super::{ValidationContext, ValidationError, get_duplicates};

pub(super) fn check_job_fields(ctx: &ValidationContext) -> Result<(), ValidationError> {
    ctx.jobs().try_for_each(|job| {
        if job.location_index < 0 {
            return Err(ValidationError::NegativeLocationIndex {
                job_id: job.id,
                value: job.location_index,
            });
        }

        if let Some(service) = job.service
            && service < 0
        {
            return Err(ValidationError::NegativeServiceDuration {
                job_id: job.id,
                value: service,
            });
        }

        if let Some(delivery) = job.first_delivery()
            && delivery < 0
        {
            return Err(ValidationError::NegativeDelivery {
                job_id: job.id,
                value: delivery,
            });
        }

        Ok(())
    })
}

pub(super) fn check_unique_job_ids(ctx: &ValidationContext) -> Result<(), ValidationError> {
    get_duplicates(ctx.jobs().map(|job| job.id))
        .map_or(Ok(()), |duplicates| Err(ValidationError::DuplicateJobIds { duplicates }))
}

pub(super) fn check_location_indices(ctx: &ValidationContext) -> Result<(), ValidationError> {
    let matrix_size = ctx.matrix_size();

    ctx.jobs().try_for_each(|job| {
        if usize::try_from(job.location_index).map_or(true, |index| index >= matrix_size) {
            Err(ValidationError::LocationIndexOutOfBounds {
                job_id: job.id,
                index: job.location_index,
                matrix_size,
            })
        } else {
            Ok(())
        }
    })
}
