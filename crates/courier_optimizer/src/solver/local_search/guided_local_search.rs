use fxhash::FxHashMap;

use crate::{
    model::routing_model::{NodeIdx, RoutingModel},
    problem::vehicle::VehicleIdx,
};

use super::working_solution::WorkingSolution;

const UTILITY_EPSILON: f64 = 1e-9;

/// Penalty counters of the arcs that were part of a local optimum.
#[derive(Debug, Default)]
pub struct ArcPenalties {
    penalties: FxHashMap<(NodeIdx, NodeIdx), u32>,
}

impl ArcPenalties {
    pub fn penalty(&self, from: NodeIdx, to: NodeIdx) -> u32 {
        self.penalties.get(&(from, to)).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.penalties.is_empty()
    }

    /// Penalizes the arcs of the solution with the highest utility `cost / (1 + penalty)`.
    /// Returns `false` when every arc is free, in which case penalties cannot change anything.
    pub fn penalize(&mut self, model: &RoutingModel, solution: &WorkingSolution) -> bool {
        let arcs = solution
            .arcs(model)
            .filter(|(from, to)| from != to)
            .collect::<Vec<_>>();

        let utility = |&(from, to): &(NodeIdx, NodeIdx)| {
            model.arc_cost(from, to) as f64 / (1.0 + f64::from(self.penalty(from, to)))
        };

        let max_utility = arcs.iter().map(utility).fold(0.0, f64::max);
        if max_utility <= 0.0 {
            return false;
        }

        let selected = arcs
            .iter()
            .filter(|arc| utility(arc) >= max_utility - UTILITY_EPSILON)
            .copied()
            .collect::<Vec<_>>();

        for arc in selected {
            *self.penalties.entry(arc).or_insert(0) += 1;
        }

        true
    }
}

/// Arc cost plus the weighted penalty of the arc, the quantity the local search minimizes.
pub struct AugmentedCost<'a> {
    model: &'a RoutingModel,
    penalties: &'a ArcPenalties,
    penalty_weight: f64,
}

impl<'a> AugmentedCost<'a> {
    pub fn new(model: &'a RoutingModel, penalties: &'a ArcPenalties, penalty_weight: f64) -> Self {
        AugmentedCost {
            model,
            penalties,
            penalty_weight,
        }
    }

    pub fn route_cost(&self, vehicle_id: VehicleIdx, visits: &[NodeIdx]) -> f64 {
        self.model
            .route_arcs(vehicle_id, visits)
            .map(|(from, to)| {
                self.model.arc_cost(from, to) as f64
                    + self.penalty_weight * f64::from(self.penalties.penalty(from, to))
            })
            .sum()
    }
}

/// Weight of one penalty unit: `lambda` times the average cost of an arc of the first local
/// optimum.
pub fn penalty_weight(lambda: f64, model: &RoutingModel, solution: &WorkingSolution) -> f64 {
    let (cost, count) = solution
        .arcs(model)
        .filter(|(from, to)| from != to)
        .fold((0, 0usize), |(cost, count), (from, to)| {
            (cost + model.arc_cost(from, to), count + 1)
        });

    if count == 0 {
        0.0
    } else {
        lambda * cost as f64 / count as f64
    }
}
