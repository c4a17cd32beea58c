//! Built-in optimizer backend: cheapest insertion followed by a local search over the
//! relocate, swap and 2-opt neighborhoods.

mod construction;
mod guided_local_search;
mod local_search_optimizer;
mod moves;
mod working_solution;

use jiff::{SignedDuration, Timestamp};

pub use self::local_search_optimizer::LocalSearchOptimizer;

/// Wall clock of a single optimization run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchClock {
    start: Timestamp,
    time_limit: SignedDuration,
}

impl SearchClock {
    pub fn start(time_limit: SignedDuration) -> Self {
        SearchClock {
            start: Timestamp::now(),
            time_limit,
        }
    }

    pub fn elapsed(&self) -> SignedDuration {
        Timestamp::now().duration_since(self.start)
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed() > self.time_limit
    }

    pub fn time_limit(&self) -> SignedDuration {
        self.time_limit
    }
}
