use std::fmt::Display;

use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionKind {
    /// Cumulative demand, the transit of an arc is the demand of its destination.
    Capacity,
    /// Cumulative travel plus service, the transit of an arc is its travel cost plus the
    /// service time of its destination.
    Time,
}

impl Display for DimensionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DimensionKind::Capacity => write!(f, "Capacity"),
            DimensionKind::Time => write!(f, "Time"),
        }
    }
}

/// A cumulative quantity along a route with a hard upper bound per vehicle.
#[derive(Serialize, Debug, Clone)]
pub struct Dimension {
    kind: DimensionKind,
    vehicle_capacities: Vec<i64>,
    slack_max: i64,
    fix_start_cumul_to_zero: bool,
}

impl Dimension {
    pub fn new(
        kind: DimensionKind,
        vehicle_capacities: Vec<i64>,
        slack_max: i64,
        fix_start_cumul_to_zero: bool,
    ) -> Self {
        Dimension {
            kind,
            vehicle_capacities,
            slack_max,
            fix_start_cumul_to_zero,
        }
    }

    pub fn kind(&self) -> DimensionKind {
        self.kind
    }

    /// Upper bound of the cumul for the given vehicle.
    pub fn vehicle_capacity(&self, vehicle_index: usize) -> i64 {
        self.vehicle_capacities[vehicle_index]
    }

    pub fn vehicle_capacities(&self) -> &[i64] {
        &self.vehicle_capacities
    }

    /// Maximum waiting allowed at a node. There are no time windows, so waiting is never
    /// forced and the bound only limits idling.
    pub fn slack_max(&self) -> i64 {
        self.slack_max
    }

    pub fn fix_start_cumul_to_zero(&self) -> bool {
        self.fix_start_cumul_to_zero
    }
}
