use crate::{model::routing_model::NodeIdx, problem::vehicle::VehicleIdx};

use super::working_solution::WorkingSolution;

/// A route rewritten by a move.
pub type RouteChange = (VehicleIdx, Vec<NodeIdx>);

pub trait LocalSearchOperator: Sized {
    /// Emits every move of the neighborhood between routes `r1` and `r2`.
    fn generate_moves<C>(solution: &WorkingSolution, routes: (VehicleIdx, VehicleIdx), consumer: C)
    where
        C: FnMut(Self);

    /// Visits of the routes touched by the move once it is applied.
    fn route_changes(&self, solution: &WorkingSolution) -> Vec<RouteChange>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalSearchMove {
    Relocate(RelocateOperator),
    Swap(SwapOperator),
    TwoOpt(TwoOptOperator),
}

impl LocalSearchMove {
    pub fn generate_moves<C>(
        solution: &WorkingSolution,
        routes: (VehicleIdx, VehicleIdx),
        mut consumer: C,
    ) where
        C: FnMut(LocalSearchMove),
    {
        RelocateOperator::generate_moves(solution, routes, |op| {
            consumer(LocalSearchMove::Relocate(op))
        });
        SwapOperator::generate_moves(solution, routes, |op| consumer(LocalSearchMove::Swap(op)));
        TwoOptOperator::generate_moves(solution, routes, |op| {
            consumer(LocalSearchMove::TwoOpt(op))
        });
    }

    pub fn route_changes(&self, solution: &WorkingSolution) -> Vec<RouteChange> {
        match self {
            LocalSearchMove::Relocate(op) => op.route_changes(solution),
            LocalSearchMove::Swap(op) => op.route_changes(solution),
            LocalSearchMove::TwoOpt(op) => op.route_changes(solution),
        }
    }
}

/// **Relocate**
///
/// Moves the visit at `from` of route `r1` to position `to` of route `r2`. When both routes
/// are the same, `to` is a position in the route once the visit has been removed.
///
/// ```text
/// BEFORE:
///    r1: ... (A) -> [from] -> (B) ...
///    r2: ... (X) -> (Y) ...
///
/// AFTER:
///    r1: ... (A) -> (B) ...
///    r2: ... (X) -> [from] -> (Y) ...
///
/// Edges Removed: (A->from), (from->B), (X->Y)
/// Edges Added:   (A->B),    (X->from), (from->Y)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocateOperator {
    pub from_route: VehicleIdx,
    pub from: usize,
    pub to_route: VehicleIdx,
    pub to: usize,
}

impl LocalSearchOperator for RelocateOperator {
    fn generate_moves<C>(solution: &WorkingSolution, (r1, r2): (VehicleIdx, VehicleIdx), mut consumer: C)
    where
        C: FnMut(Self),
    {
        let source_len = solution.route(r1).len();
        let target_len = if r1 == r2 {
            source_len.saturating_sub(1)
        } else {
            solution.route(r2).len()
        };

        for from in 0..source_len {
            for to in 0..=target_len {
                if r1 == r2 && from == to {
                    continue;
                }

                consumer(RelocateOperator {
                    from_route: r1,
                    from,
                    to_route: r2,
                    to,
                });
            }
        }
    }

    fn route_changes(&self, solution: &WorkingSolution) -> Vec<RouteChange> {
        let mut source = solution.route(self.from_route).to_vec();
        let node = source.remove(self.from);

        if self.from_route == self.to_route {
            source.insert(self.to, node);
            return vec![(self.from_route, source)];
        }

        let mut target = solution.route(self.to_route).to_vec();
        target.insert(self.to, node);

        vec![(self.from_route, source), (self.to_route, target)]
    }
}

/// **Swap**
///
/// Exchanges the visit at `first` of route `r1` with the visit at `second` of route `r2`.
///
/// ```text
/// BEFORE:
///    r1: ... (A) -> [first] -> (B) ...
///    r2: ... (X) -> [second] -> (Y) ...
///
/// AFTER:
///    r1: ... (A) -> [second] -> (B) ...
///    r2: ... (X) -> [first] -> (Y) ...
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOperator {
    pub first_route: VehicleIdx,
    pub first: usize,
    pub second_route: VehicleIdx,
    pub second: usize,
}

impl LocalSearchOperator for SwapOperator {
    fn generate_moves<C>(solution: &WorkingSolution, (r1, r2): (VehicleIdx, VehicleIdx), mut consumer: C)
    where
        C: FnMut(Self),
    {
        // Inter-route pairs are generated once, from the lower route.
        if r1 > r2 {
            return;
        }

        for first in 0..solution.route(r1).len() {
            let second_start = if r1 == r2 { first + 1 } else { 0 };

            for second in second_start..solution.route(r2).len() {
                consumer(SwapOperator {
                    first_route: r1,
                    first,
                    second_route: r2,
                    second,
                });
            }
        }
    }

    fn route_changes(&self, solution: &WorkingSolution) -> Vec<RouteChange> {
        if self.first_route == self.second_route {
            let mut route = solution.route(self.first_route).to_vec();
            route.swap(self.first, self.second);
            return vec![(self.first_route, route)];
        }

        let mut first_route = solution.route(self.first_route).to_vec();
        let mut second_route = solution.route(self.second_route).to_vec();
        std::mem::swap(&mut first_route[self.first], &mut second_route[self.second]);

        vec![
            (self.first_route, first_route),
            (self.second_route, second_route),
        ]
    }
}

/// **Intra-Route 2-Opt**
///
/// Reverses the visits between `from` and `to` (inclusive).
///
/// ```text
/// BEFORE:
///    ... (prev) --x--> [from] -> ... -> [to] --x--> (next) ...
///
/// AFTER (Sequence Reversed):
///    ... (prev) -----> [to] -> ... -> [from] -----> (next) ...
///
/// Edges Removed: (prev->from), (to->next)
/// Edges Added:   (prev->to),   (from->next)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoOptOperator {
    pub route: VehicleIdx,
    pub from: usize,
    pub to: usize,
}

impl LocalSearchOperator for TwoOptOperator {
    fn generate_moves<C>(solution: &WorkingSolution, (r1, r2): (VehicleIdx, VehicleIdx), mut consumer: C)
    where
        C: FnMut(Self),
    {
        if r1 != r2 {
            return;
        }

        let len = solution.route(r1).len();
        for from in 0..len {
            // Reversing two adjacent visits is a swap.
            for to in (from + 2)..len {
                consumer(TwoOptOperator {
                    route: r1,
                    from,
                    to,
                });
            }
        }
    }

    fn route_changes(&self, solution: &WorkingSolution) -> Vec<RouteChange> {
        let mut route = solution.route(self.route).to_vec();
        route[self.from..=self.to].reverse();
        vec![(self.route, route)]
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils;

    use super::*;

    fn solution() -> WorkingSolution {
        let problem = test_utils::create_test_problem(
            test_utils::line_matrix(6, 10),
            vec![(1, 0, None), (2, 0, None)],
            vec![
                (1, 1, None, None),
                (2, 2, None, None),
                (3, 3, None, None),
                (4, 4, None, None),
                (5, 5, None, None),
            ],
        );
        let model = test_utils::create_test_model(&problem);
        let mut solution = WorkingSolution::empty(&model);

        for (position, node) in [1, 2, 3].into_iter().enumerate() {
            solution.insert(VehicleIdx::new(0), position, NodeIdx::new(node));
        }
        for (position, node) in [4, 5].into_iter().enumerate() {
            solution.insert(VehicleIdx::new(1), position, NodeIdx::new(node));
        }

        solution
    }

    fn nodes(indices: &[usize]) -> Vec<NodeIdx> {
        indices.iter().copied().map(NodeIdx::new).collect()
    }

    #[test]
    fn test_relocate_intra_route() {
        let op = RelocateOperator {
            from_route: VehicleIdx::new(0),
            from: 0,
            to_route: VehicleIdx::new(0),
            to: 2,
        };

        assert_eq!(
            op.route_changes(&solution()),
            vec![(VehicleIdx::new(0), nodes(&[2, 3, 1]))]
        );
    }

    #[test]
    fn test_relocate_inter_route() {
        let op = RelocateOperator {
            from_route: VehicleIdx::new(0),
            from: 1,
            to_route: VehicleIdx::new(1),
            to: 1,
        };

        assert_eq!(
            op.route_changes(&solution()),
            vec![
                (VehicleIdx::new(0), nodes(&[1, 3])),
                (VehicleIdx::new(1), nodes(&[4, 2, 5])),
            ]
        );
    }

    #[test]
    fn test_swap_inter_route() {
        let op = SwapOperator {
            first_route: VehicleIdx::new(0),
            first: 2,
            second_route: VehicleIdx::new(1),
            second: 0,
        };

        assert_eq!(
            op.route_changes(&solution()),
            vec![
                (VehicleIdx::new(0), nodes(&[1, 2, 4])),
                (VehicleIdx::new(1), nodes(&[3, 5])),
            ]
        );
    }

    #[test]
    fn test_two_opt_reverses_segment() {
        let op = TwoOptOperator {
            route: VehicleIdx::new(0),
            from: 0,
            to: 2,
        };

        assert_eq!(
            op.route_changes(&solution()),
            vec![(VehicleIdx::new(0), nodes(&[3, 2, 1]))]
        );
    }

    #[test]
    fn test_generated_neighborhood_sizes() {
        let solution = solution();
        let (r1, r2) = (VehicleIdx::new(0), VehicleIdx::new(1));

        let mut count = 0;
        RelocateOperator::generate_moves(&solution, (r1, r1), |_| count += 1);
        // 3 visits, 3 positions each once removed, minus the identity.
        assert_eq!(count, 6);

        count = 0;
        RelocateOperator::generate_moves(&solution, (r1, r2), |_| count += 1);
        assert_eq!(count, 9);

        count = 0;
        SwapOperator::generate_moves(&solution, (r2, r1), |_| count += 1);
        assert_eq!(count, 0);

        count = 0;
        TwoOptOperator::generate_moves(&solution, (r1, r1), |_| count += 1);
        assert_eq!(count, 1);
    }
}
