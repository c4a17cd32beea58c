use std::fmt::Display;

use jiff::SignedDuration;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FirstSolutionStrategy {
    /// Repeatedly inserts the visit whose cheapest feasible insertion, over every route and
    /// position, costs the least.
    #[default]
    CheapestArcInsertion,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LocalSearchMetaheuristic {
    /// Escapes local optima by penalizing the arcs of the current solution.
    #[default]
    GuidedLocalSearch,
    /// Stops at the first local optimum.
    GreedyDescent,
}

impl Display for FirstSolutionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FirstSolutionStrategy::CheapestArcInsertion => write!(f, "cheapest_arc_insertion"),
        }
    }
}

impl Display for LocalSearchMetaheuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocalSearchMetaheuristic::GuidedLocalSearch => write!(f, "guided_local_search"),
            LocalSearchMetaheuristic::GreedyDescent => write!(f, "greedy_descent"),
        }
    }
}

#[derive(Clone, Debug)]
pub enum Termination {
    Duration(SignedDuration),
    Solutions(usize),
    IterationsWithoutImprovement(usize),
}

#[derive(Clone, Debug)]
pub struct SearchParams {
    pub time_limit: SignedDuration,
    /// Maximum number of solutions accepted by the search, the first solution included.
    pub solution_limit: usize,
    /// Local optima escaped in a row without improving the best objective.
    pub iterations_without_improvement: usize,
    pub first_solution_strategy: FirstSolutionStrategy,
    pub local_search_metaheuristic: LocalSearchMetaheuristic,
    pub random_seed: u64,
    /// Weight of the arc penalties relative to the average arc cost.
    pub guided_local_search_lambda: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            time_limit: SignedDuration::from_secs(30),
            solution_limit: 100,
            iterations_without_improvement: 2000,
            first_solution_strategy: FirstSolutionStrategy::default(),
            local_search_metaheuristic: LocalSearchMetaheuristic::default(),
            random_seed: 0,
            guided_local_search_lambda: 0.1,
        }
    }
}

impl SearchParams {
    pub fn terminations(&self) -> Vec<Termination> {
        vec![
            Termination::Duration(self.time_limit),
            Termination::Solutions(self.solution_limit),
            Termination::IterationsWithoutImprovement(self.iterations_without_improvement),
        ]
    }

    /// Name reported in the solve metadata.
    pub fn algorithm(&self) -> String {
        format!(
            "{}+{}",
            self.first_solution_strategy, self.local_search_metaheuristic
        )
    }

    pub fn with_random_seed(mut self, random_seed: Option<u64>) -> Self {
        if let Some(random_seed) = random_seed {
            self.random_seed = random_seed;
        }
        self
    }
}
