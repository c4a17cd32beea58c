use super::location::LocationIdx;

pub type Distance = i64;

/// This matrix use a flat structure to store the travel costs between locations.
/// To find the index for a pair of locations, use the formula:
/// `index = from * num_locations + to`.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    distances: Vec<Distance>,
    num_locations: usize,
}

impl DistanceMatrix {
    /// Expects a square matrix; rows are checked by the request validation beforehand.
    pub fn from_rows(rows: &[Vec<Distance>]) -> Self {
        let num_locations = rows.len();
        let distances: Vec<Distance> = rows.iter().flatten().copied().collect();

        DistanceMatrix {
            distances,
            num_locations,
        }
    }

    #[inline(always)]
    fn index(&self, from: LocationIdx, to: LocationIdx) -> usize {
        from.get() * self.num_locations + to.get()
    }

    /// Travel cost between two locations. Staying on the same location is free.
    #[inline(always)]
    pub fn travel_distance(&self, from: LocationIdx, to: LocationIdx) -> Distance {
        if from == to {
            return 0;
        }

        self.distances[self.index(from, to)]
    }

    /// Largest sum over a single row of the provided matrix.
    pub fn max_row_sum(&self) -> Distance {
        self.distances
            .chunks(self.num_locations.max(1))
            .map(|row| row.iter().sum::<Distance>())
            .max()
            .unwrap_or(0)
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> DistanceMatrix {
        DistanceMatrix::from_rows(&[vec![5, 100, 200], vec![100, 0, 150], vec![200, 150, 0]])
    }

    #[test]
    fn test_travel_distance_ignores_diagonal() {
        let matrix = matrix();

        assert_eq!(matrix.travel_distance(0.into(), 0.into()), 0);
        assert_eq!(matrix.travel_distance(1.into(), 2.into()), 150);
    }

    #[test]
    fn test_max_row_sum_includes_diagonal() {
        assert_eq!(matrix().max_row_sum(), 350);
        assert_eq!(
            DistanceMatrix::from_rows(&[vec![9, 1], vec![2, 0]]).max_row_sum(),
            10
        );
    }
}
