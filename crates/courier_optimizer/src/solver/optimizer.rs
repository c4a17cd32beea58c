use fxhash::FxHashMap;
use serde::Serialize;
use thiserror::Error;

use crate::{
    model::routing_model::{NodeIdx, RoutingModel},
    problem::vehicle::VehicleIdx,
};

use super::search_params::SearchParams;

/// A routing backend. Receives the model and the search configuration and returns the
/// arcs taken by every vehicle, or the reason no solution could be produced.
pub trait Optimizer: Send + Sync {
    fn optimize(
        &self,
        model: &RoutingModel,
        params: &SearchParams,
    ) -> Result<Assignment, OptimizerError>;
}

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum OptimizerError {
    #[error("no feasible solution exists, {unassigned} visits could not be assigned")]
    NoSolution { unassigned: usize },
    #[error("no solution found within the time limit of {time_limit_seconds}s")]
    TimeLimitReached { time_limit_seconds: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    LocalOptimum,
    SolutionLimit,
    IterationsWithoutImprovement,
    TimeLimit,
}

/// Successor of every node a vehicle leaves, from its start node up to the node
/// preceding its end node.
#[derive(Debug, Clone, Default)]
pub struct VehicleArcs {
    next: FxHashMap<NodeIdx, NodeIdx>,
}

impl VehicleArcs {
    pub fn insert(&mut self, from: NodeIdx, to: NodeIdx) {
        self.next.insert(from, to);
    }

    pub fn next(&self, node: NodeIdx) -> Option<NodeIdx> {
        self.next.get(&node).copied()
    }
}

/// Raw optimizer output.
#[derive(Debug, Clone)]
pub struct Assignment {
    vehicle_arcs: Vec<VehicleArcs>,
    objective: i64,
    solutions_found: usize,
    stop_reason: StopReason,
}

impl Assignment {
    pub fn new(vehicle_arcs: Vec<VehicleArcs>, objective: i64) -> Self {
        Assignment {
            vehicle_arcs,
            objective,
            solutions_found: 1,
            stop_reason: StopReason::LocalOptimum,
        }
    }

    /// Chains `start -> visits -> end` for every vehicle. Vehicles without a path get an empty
    /// route.
    pub fn from_paths(model: &RoutingModel, paths: &[Vec<NodeIdx>], objective: i64) -> Self {
        let vehicle_arcs = model
            .vehicles_iter()
            .map(|vehicle_id| {
                let visits = paths
                    .get(vehicle_id.get())
                    .map(Vec::as_slice)
                    .unwrap_or_default();

                let mut arcs = VehicleArcs::default();
                let nodes = model.route_nodes(vehicle_id, visits).collect::<Vec<_>>();
                for window in nodes.windows(2) {
                    arcs.insert(window[0], window[1]);
                }
                arcs
            })
            .collect();

        Assignment::new(vehicle_arcs, objective)
    }

    pub fn with_search_outcome(mut self, solutions_found: usize, stop_reason: StopReason) -> Self {
        self.solutions_found = solutions_found;
        self.stop_reason = stop_reason;
        self
    }

    /// Node following `node` on the route of the vehicle.
    pub fn next(&self, vehicle_id: VehicleIdx, node: NodeIdx) -> Option<NodeIdx> {
        self.vehicle_arcs
            .get(vehicle_id.get())
            .and_then(|arcs| arcs.next(node))
    }

    pub fn num_vehicles(&self) -> usize {
        self.vehicle_arcs.len()
    }

    pub fn objective(&self) -> i64 {
        self.objective
    }

    pub fn solutions_found(&self) -> usize {
        self.solutions_found
    }

    pub fn stop_reason(&self) -> StopReason {
        self.stop_reason
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils;

    use super::*;

    #[test]
    fn test_from_paths_closed_routes() {
        let problem = test_utils::create_test_problem(
            test_utils::three_node_matrix(),
            vec![(1, 0, None), (2, 0, None)],
            vec![(1, 1, None, None), (2, 2, None, None)],
        );
        let model = test_utils::create_test_model(&problem);
        let assignment = test_utils::create_test_assignment(&model, vec![vec![2, 1]]);

        let first = VehicleIdx::new(0);
        assert_eq!(assignment.next(first, NodeIdx::new(0)), Some(NodeIdx::new(2)));
        assert_eq!(assignment.next(first, NodeIdx::new(2)), Some(NodeIdx::new(1)));
        assert_eq!(assignment.next(first, NodeIdx::new(1)), Some(NodeIdx::new(0)));

        // Unused closed route loops on its start.
        let second = VehicleIdx::new(1);
        assert_eq!(assignment.next(second, NodeIdx::new(0)), Some(NodeIdx::new(0)));
        assert_eq!(assignment.next(second, NodeIdx::new(1)), None);
    }

    #[test]
    fn test_from_paths_open_route_ends_on_sink() {
        let problem = test_utils::create_open_test_problem(
            test_utils::three_node_matrix(),
            vec![(1, 0, None)],
            vec![(1, 1, None, None)],
        );
        let model = test_utils::create_test_model(&problem);
        let assignment = test_utils::create_test_assignment(&model, vec![vec![1]]);

        assert_eq!(
            assignment.next(VehicleIdx::new(0), NodeIdx::new(1)),
            Some(NodeIdx::new(3))
        );
        assert_eq!(assignment.next(VehicleIdx::new(0), NodeIdx::new(3)), None);
        assert_eq!(assignment.next(VehicleIdx::new(1), NodeIdx::new(0)), None);
    }

    #[test]
    fn test_optimizer_error_details() {
        let value = serde_json::to_value(OptimizerError::NoSolution { unassigned: 2 }).unwrap();

        assert_eq!(value["code"], "no_solution");
        assert_eq!(value["unassigned"], 2);
    }
}
