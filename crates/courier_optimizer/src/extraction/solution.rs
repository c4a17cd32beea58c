use jiff::SignedDuration;

use crate::solver::optimizer::StopReason;

use super::route::Route;

/// Search figures reported next to the routes.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveStatistics {
    pub solve_duration: SignedDuration,
    pub algorithm: String,
    pub objective_value: i64,
    pub random_seed: u64,
    pub solutions_found: usize,
    pub stop_reason: StopReason,
}

/// One route per vehicle, in fleet order.
#[derive(Debug, Clone)]
pub struct Solution {
    routes: Vec<Route>,
    statistics: SolveStatistics,
}

impl Solution {
    pub fn new(routes: Vec<Route>, statistics: SolveStatistics) -> Self {
        Solution { routes, statistics }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn non_empty_routes_iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().filter(|route| !route.is_empty())
    }

    /// Sum of the delivery duration of every route.
    pub fn total_delivery_duration(&self) -> i64 {
        self.routes.iter().map(Route::delivery_duration).sum()
    }

    pub fn solve_duration(&self) -> SignedDuration {
        self.statistics.solve_duration
    }

    pub fn algorithm(&self) -> &str {
        &self.statistics.algorithm
    }

    pub fn objective_value(&self) -> i64 {
        self.statistics.objective_value
    }

    pub fn random_seed(&self) -> u64 {
        self.statistics.random_seed
    }
}
