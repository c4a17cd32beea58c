use super::{ValidationContext, ValidationError};

/// The matrix must be non-empty, square and free of negative entries.
pub(super) fn check_matrix(ctx: &ValidationContext) -> Result<(), ValidationError> {
    let matrix = &ctx.request.matrix;

    if matrix.is_empty() {
        return Err(ValidationError::EmptyMatrix);
    }

    let size = matrix.len();

    for (row_index, row) in matrix.iter().enumerate() {
        if row.len() != size {
            return Err(ValidationError::NonSquareMatrix {
                row: row_index,
                expected: size,
                actual: row.len(),
            });
        }

        if let Some((column, &value)) = row.iter().enumerate().find(|&(_, &value)| value < 0) {
            return Err(ValidationError::NegativeDistance {
                row: row_index,
                column,
                value,
            });
        }
    }

    Ok(())
}
