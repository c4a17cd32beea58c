use tracing::{debug, instrument};

use crate::{
    define_index_newtype,
    problem::{
        job::JobIdx, location::LocationIdx, routing_problem::RoutingProblem, vehicle::VehicleIdx,
    },
};

use super::{
    dimension::{Dimension, DimensionKind},
    node_lookup::NodeLookup,
};

// Node of the model graph, real nodes share their index with the matrix locations.
define_index_newtype!(NodeIdx);

/// Percentage of the time horizon a vehicle may spend waiting.
const TIME_SLACK_PERCENT: i64 = 10;

/// Which quantity the optimizer minimizes along the arcs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostEvaluator {
    Distance,
    /// Travel plus service time of the destination, so the objective is the total
    /// delivery duration.
    Time,
}

/// Directed graph built from a validated problem.
///
/// When routes are open, a sink node is appended after the real nodes. Every arc from or
/// to the sink costs 0 in every dimension and every vehicle ends its route there.
#[derive(Debug, Clone)]
pub struct RoutingModel {
    num_real_nodes: usize,
    sink: Option<NodeIdx>,
    /// Flat `num_nodes * num_nodes` matrix including the sink row and column.
    distances: Vec<i64>,
    lookup: NodeLookup,
    vehicle_starts: Vec<NodeIdx>,
    vehicle_ends: Vec<NodeIdx>,
    vehicle_start_loads: Vec<i64>,
    vehicle_start_jobs: Vec<Vec<JobIdx>>,
    visits: Vec<NodeIdx>,
    capacity_dimension: Option<Dimension>,
    time_dimension: Option<Dimension>,
    cost_evaluator: CostEvaluator,
}

impl RoutingModel {
    pub fn num_nodes(&self) -> usize {
        self.num_real_nodes + usize::from(self.sink.is_some())
    }

    pub fn num_vehicles(&self) -> usize {
        self.vehicle_starts.len()
    }

    pub fn sink(&self) -> Option<NodeIdx> {
        self.sink
    }

    #[inline(always)]
    pub fn is_sink(&self, node: NodeIdx) -> bool {
        self.sink == Some(node)
    }

    /// Matrix location of a node, `None` for the sink.
    pub fn location_id(&self, node: NodeIdx) -> Option<LocationIdx> {
        if self.is_sink(node) {
            None
        } else {
            Some(LocationIdx::new(node.get()))
        }
    }

    pub fn lookup(&self) -> &NodeLookup {
        &self.lookup
    }

    pub fn vehicle_start(&self, vehicle_id: VehicleIdx) -> NodeIdx {
        self.vehicle_starts[vehicle_id.get()]
    }

    pub fn vehicle_end(&self, vehicle_id: VehicleIdx) -> NodeIdx {
        self.vehicle_ends[vehicle_id.get()]
    }

    /// Demand of the start node jobs this vehicle loads at departure.
    pub fn vehicle_start_load(&self, vehicle_id: VehicleIdx) -> i64 {
        self.vehicle_start_loads[vehicle_id.get()]
    }

    pub fn vehicle_start_jobs(&self, vehicle_id: VehicleIdx) -> &[JobIdx] {
        &self.vehicle_start_jobs[vehicle_id.get()]
    }

    pub fn vehicles_iter(&self) -> impl Iterator<Item = VehicleIdx> {
        (0..self.num_vehicles()).map(VehicleIdx::new)
    }

    /// Nodes that have to be visited by exactly one vehicle.
    pub fn visits(&self) -> &[NodeIdx] {
        &self.visits
    }

    pub fn capacity_dimension(&self) -> Option<&Dimension> {
        self.capacity_dimension.as_ref()
    }

    pub fn time_dimension(&self) -> Option<&Dimension> {
        self.time_dimension.as_ref()
    }

    pub fn dimensions(&self) -> impl Iterator<Item = &Dimension> {
        self.capacity_dimension
            .iter()
            .chain(self.time_dimension.iter())
    }

    pub fn cost_evaluator(&self) -> CostEvaluator {
        self.cost_evaluator
    }

    /// Travel cost between two nodes, 0 on self arcs and on arcs touching the sink.
    #[inline(always)]
    pub fn distance(&self, from: NodeIdx, to: NodeIdx) -> i64 {
        if from == to {
            return 0;
        }

        self.distances[from.get() * self.num_nodes() + to.get()]
    }

    #[inline(always)]
    pub fn transit(&self, kind: DimensionKind, from: NodeIdx, to: NodeIdx) -> i64 {
        match kind {
            DimensionKind::Capacity => self.lookup.demand(to),
            DimensionKind::Time => self.distance(from, to) + self.lookup.service_time(to),
        }
    }

    /// Transit callback of a dimension, as consumed by an optimizer backend.
    pub fn transit_evaluator(
        &self,
        kind: DimensionKind,
    ) -> impl Fn(NodeIdx, NodeIdx) -> i64 + '_ {
        move |from, to| self.transit(kind, from, to)
    }

    #[inline(always)]
    pub fn arc_cost(&self, from: NodeIdx, to: NodeIdx) -> i64 {
        match self.cost_evaluator {
            CostEvaluator::Distance => self.distance(from, to),
            CostEvaluator::Time => self.transit(DimensionKind::Time, from, to),
        }
    }

    pub fn start_cumul(&self, kind: DimensionKind, vehicle_id: VehicleIdx) -> i64 {
        match kind {
            DimensionKind::Capacity => self.vehicle_start_load(vehicle_id),
            DimensionKind::Time => 0,
        }
    }

    /// Full node sequence of a route: start, visits, end.
    pub fn route_nodes<'a>(
        &'a self,
        vehicle_id: VehicleIdx,
        visits: &'a [NodeIdx],
    ) -> impl Iterator<Item = NodeIdx> + 'a {
        std::iter::once(self.vehicle_start(vehicle_id))
            .chain(visits.iter().copied())
            .chain(std::iter::once(self.vehicle_end(vehicle_id)))
    }

    pub fn route_cost(&self, vehicle_id: VehicleIdx, visits: &[NodeIdx]) -> i64 {
        self.route_arcs(vehicle_id, visits)
            .map(|(from, to)| self.arc_cost(from, to))
            .sum()
    }

    /// Value of the dimension cumul when the vehicle reaches its end node.
    pub fn route_cumul(&self, kind: DimensionKind, vehicle_id: VehicleIdx, visits: &[NodeIdx]) -> i64 {
        self.start_cumul(kind, vehicle_id)
            + self
                .route_arcs(vehicle_id, visits)
                .map(|(from, to)| self.transit(kind, from, to))
                .sum::<i64>()
    }

    /// A vehicle never visits its own start node.
    pub fn can_visit(&self, vehicle_id: VehicleIdx, node: NodeIdx) -> bool {
        node != self.vehicle_start(vehicle_id)
    }

    pub fn is_route_feasible(&self, vehicle_id: VehicleIdx, visits: &[NodeIdx]) -> bool {
        visits.iter().all(|&node| self.can_visit(vehicle_id, node))
            && self.dimensions().all(|dimension| {
                self.route_cumul(dimension.kind(), vehicle_id, visits)
                    <= dimension.vehicle_capacity(vehicle_id.get())
            })
    }

    /// Consecutive node pairs of a route, from the start node to the end node.
    pub fn route_arcs<'a>(
        &'a self,
        vehicle_id: VehicleIdx,
        visits: &'a [NodeIdx],
    ) -> impl Iterator<Item = (NodeIdx, NodeIdx)> + 'a {
        self.route_nodes(vehicle_id, visits)
            .zip(self.route_nodes(vehicle_id, visits).skip(1))
    }
}

/// Turns a [`RoutingProblem`] into a [`RoutingModel`].
pub struct ModelBuilder<'a> {
    problem: &'a RoutingProblem,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(problem: &'a RoutingProblem) -> Self {
        ModelBuilder { problem }
    }

    #[instrument(skip_all, level = "debug")]
    pub fn build(self) -> RoutingModel {
        let problem = self.problem;
        let num_real_nodes = problem.num_locations();
        let sink = problem
            .has_open_routes()
            .then_some(NodeIdx::new(num_real_nodes));
        let num_nodes = num_real_nodes + usize::from(sink.is_some());

        let distances = self.augmented_distances(num_nodes);

        let vehicle_starts: Vec<NodeIdx> = problem
            .vehicles()
            .iter()
            .map(|vehicle| NodeIdx::new(vehicle.start_location_id().get()))
            .collect();

        let vehicle_ends = vehicle_starts
            .iter()
            .map(|&start| sink.unwrap_or(start))
            .collect();

        let mut lookup = NodeLookup::with_nodes(num_nodes);
        let mut vehicle_start_loads = vec![0; vehicle_starts.len()];
        let mut vehicle_start_jobs = vec![Vec::new(); vehicle_starts.len()];

        for (job_id, job) in problem.jobs_iter() {
            let node = NodeIdx::new(job.location_id().get());

            // Jobs on a start node are served at departure by the first vehicle leaving from it
            // with enough room left. Otherwise another vehicle has to visit the node.
            let departure_vehicle = (0..vehicle_starts.len()).find(|&vehicle_index| {
                vehicle_starts[vehicle_index] == node
                    && problem.vehicles()[vehicle_index]
                        .capacity()
                        .is_none_or(|capacity| {
                            vehicle_start_loads[vehicle_index] + job.demand() <= capacity
                        })
            });

            if let Some(vehicle_index) = departure_vehicle {
                vehicle_start_loads[vehicle_index] += job.demand();
                vehicle_start_jobs[vehicle_index].push(job_id);
            } else {
                lookup.add_job(node, job_id, job.demand(), job.service_duration());
            }
        }

        let visits = (0..num_real_nodes)
            .map(NodeIdx::new)
            .filter(|&node| lookup.has_jobs(node))
            .collect::<Vec<_>>();

        let capacity_dimension = self.capacity_dimension();
        let time_dimension = self.time_dimension();

        let cost_evaluator = if time_dimension.is_some() {
            CostEvaluator::Time
        } else {
            CostEvaluator::Distance
        };

        debug!(
            nodes = num_nodes,
            visits = visits.len(),
            open_routes = sink.is_some(),
            has_capacity = capacity_dimension.is_some(),
            has_time = time_dimension.is_some(),
            "Built routing model"
        );

        RoutingModel {
            num_real_nodes,
            sink,
            distances,
            lookup,
            vehicle_starts,
            vehicle_ends,
            vehicle_start_loads,
            vehicle_start_jobs,
            visits,
            capacity_dimension,
            time_dimension,
            cost_evaluator,
        }
    }

    /// Rewrites the raw matrix into the model matrix. The extra sink row and column, if any,
    /// stay at 0.
    fn augmented_distances(&self, num_nodes: usize) -> Vec<i64> {
        let matrix = self.problem.matrix();
        let mut distances = vec![0; num_nodes * num_nodes];

        for from in 0..matrix.num_locations() {
            for to in 0..matrix.num_locations() {
                distances[from * num_nodes + to] =
                    matrix.travel_distance(LocationIdx::new(from), LocationIdx::new(to));
            }
        }

        distances
    }

    /// Added when at least one vehicle declares a capacity. Vehicles without one get the
    /// total demand, which can never bind.
    fn capacity_dimension(&self) -> Option<Dimension> {
        if !self.problem.has_capacity() {
            return None;
        }

        let total_demand = self.problem.total_demand();
        let capacities = self
            .problem
            .vehicles()
            .iter()
            .map(|vehicle| vehicle.capacity().unwrap_or(total_demand))
            .collect();

        Some(Dimension::new(DimensionKind::Capacity, capacities, 0, true))
    }

    /// Added when at least one job has a positive service duration. The horizon is the worst
    /// row of the raw matrix plus every service time.
    fn time_dimension(&self) -> Option<Dimension> {
        if !self.problem.has_service_durations() {
            return None;
        }

        let horizon =
            self.problem.matrix().max_row_sum() + self.problem.total_service_duration();
        let slack =
            horizon / 100 * TIME_SLACK_PERCENT + horizon % 100 * TIME_SLACK_PERCENT / 100;

        Some(Dimension::new(
            DimensionKind::Time,
            vec![horizon; self.problem.vehicles().len()],
            slack,
            false,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils;

    use super::*;

    #[test]
    fn test_closed_routes_end_at_start() {
        let problem = test_utils::create_test_problem(
            test_utils::three_node_matrix(),
            vec![(1, 0, Some(10)), (2, 2, None)],
            vec![(1, 1, Some(2), None)],
        );
        let model = test_utils::create_test_model(&problem);

        assert_eq!(model.num_nodes(), 3);
        assert_eq!(model.sink(), None);
        assert_eq!(model.vehicle_end(VehicleIdx::new(0)), NodeIdx::new(0));
        assert_eq!(model.vehicle_end(VehicleIdx::new(1)), NodeIdx::new(2));
        assert_eq!(model.cost_evaluator(), CostEvaluator::Distance);
    }

    #[test]
    fn test_open_routes_add_zero_cost_sink() {
        let problem = test_utils::create_open_test_problem(
            test_utils::three_node_matrix(),
            vec![(1, 0, None)],
            vec![(1, 1, None, None), (2, 2, None, Some(30))],
        );
        let model = test_utils::create_test_model(&problem);
        let sink = NodeIdx::new(3);

        assert_eq!(model.num_nodes(), 4);
        assert_eq!(model.sink(), Some(sink));
        assert!(model.is_sink(sink));
        assert_eq!(model.location_id(sink), None);
        assert_eq!(model.vehicle_start(VehicleIdx::new(0)), NodeIdx::new(0));
        assert_eq!(model.vehicle_end(VehicleIdx::new(0)), sink);

        for node in 0..3 {
            let node = NodeIdx::new(node);
            assert_eq!(model.distance(node, sink), 0);
            assert_eq!(model.distance(sink, node), 0);
            assert_eq!(model.transit(DimensionKind::Time, node, sink), 0);
        }

        assert_eq!(model.lookup().demand(sink), 0);
        assert_eq!(model.lookup().service_time(sink), 0);
        assert!(model.lookup().jobs(sink).is_empty());
    }

    #[test]
    fn test_capacity_dimension() {
        let problem = test_utils::create_test_problem(
            test_utils::three_node_matrix(),
            vec![(1, 0, Some(4)), (2, 0, None)],
            vec![(1, 1, Some(2), None), (2, 2, None, None), (3, 2, Some(3), None)],
        );
        let model = test_utils::create_test_model(&problem);
        let capacity = model.capacity_dimension().unwrap();

        assert_eq!(capacity.vehicle_capacities(), &[4, 6]);
        assert!(capacity.fix_start_cumul_to_zero());
        assert!(model.time_dimension().is_none());

        // Jobs sharing a location add up.
        assert_eq!(model.lookup().demand(NodeIdx::new(2)), 4);
        assert_eq!(
            model.transit(DimensionKind::Capacity, NodeIdx::new(1), NodeIdx::new(2)),
            4
        );
        assert_eq!(model.lookup().demand(NodeIdx::new(0)), 0);
    }

    #[test]
    fn test_no_capacity_dimension_without_vehicle_capacity() {
        let problem = test_utils::create_test_problem(
            test_utils::three_node_matrix(),
            vec![(1, 0, None)],
            vec![(1, 1, Some(2), None)],
        );
        let model = test_utils::create_test_model(&problem);

        assert!(model.capacity_dimension().is_none());
        assert_eq!(model.dimensions().count(), 0);
    }

    #[test]
    fn test_time_dimension_bounds() {
        let problem = test_utils::create_test_problem(
            test_utils::three_node_matrix(),
            vec![(1, 0, None)],
            vec![(1, 1, None, Some(20)), (2, 2, None, Some(30))],
        );
        let model = test_utils::create_test_model(&problem);
        let time = model.time_dimension().unwrap();

        // Worst row is [200, 150, 0] = 350, plus 50 of service.
        assert_eq!(time.vehicle_capacity(0), 400);
        assert_eq!(time.slack_max(), 40);
        assert!(!time.fix_start_cumul_to_zero());
        assert_eq!(model.cost_evaluator(), CostEvaluator::Time);

        assert_eq!(model.arc_cost(NodeIdx::new(0), NodeIdx::new(1)), 120);
        assert_eq!(model.arc_cost(NodeIdx::new(2), NodeIdx::new(0)), 200);

        let evaluator = model.transit_evaluator(DimensionKind::Time);
        assert_eq!(evaluator(NodeIdx::new(1), NodeIdx::new(2)), 180);
    }

    #[test]
    fn test_jobs_on_start_node_are_served_at_departure() {
        let problem = test_utils::create_test_problem(
            test_utils::three_node_matrix(),
            vec![(1, 1, Some(10)), (2, 0, Some(10)), (3, 0, Some(10))],
            vec![(1, 0, Some(3), Some(15)), (2, 2, Some(1), None)],
        );
        let model = test_utils::create_test_model(&problem);

        assert_eq!(model.visits(), &[NodeIdx::new(2)]);
        assert_eq!(model.vehicle_start_jobs(VehicleIdx::new(1)), &[JobIdx::new(0)]);
        assert_eq!(model.vehicle_start_load(VehicleIdx::new(1)), 3);
        assert!(model.vehicle_start_jobs(VehicleIdx::new(2)).is_empty());
        assert_eq!(model.vehicle_start_load(VehicleIdx::new(2)), 0);
        assert_eq!(
            model.route_cumul(DimensionKind::Capacity, VehicleIdx::new(1), &[NodeIdx::new(2)]),
            4
        );
    }

    #[test]
    fn test_start_node_jobs_go_to_a_vehicle_with_room() {
        let problem = test_utils::create_test_problem(
            test_utils::three_node_matrix(),
            vec![(1, 0, Some(2)), (2, 0, Some(10))],
            vec![(1, 0, Some(5), None), (2, 1, Some(1), None)],
        );
        let model = test_utils::create_test_model(&problem);

        assert!(model.vehicle_start_jobs(VehicleIdx::new(0)).is_empty());
        assert_eq!(model.vehicle_start_jobs(VehicleIdx::new(1)), &[JobIdx::new(0)]);
        assert_eq!(model.vehicle_start_load(VehicleIdx::new(1)), 5);
        assert_eq!(model.visits(), &[NodeIdx::new(1)]);
        assert!(model.is_route_feasible(VehicleIdx::new(0), &[]));
    }

    #[test]
    fn test_start_node_jobs_without_room_become_visits() {
        let problem = test_utils::create_test_problem(
            test_utils::three_node_matrix(),
            vec![(1, 0, Some(2)), (2, 1, Some(10))],
            vec![(1, 0, Some(5), None), (2, 1, Some(1), None)],
        );
        let model = test_utils::create_test_model(&problem);
        let depot = NodeIdx::new(0);

        assert_eq!(model.visits(), &[depot]);
        assert_eq!(model.lookup().demand(depot), 5);
        assert_eq!(model.vehicle_start_jobs(VehicleIdx::new(1)), &[JobIdx::new(1)]);

        // Vehicle 1 cannot come back to its own start to serve the job.
        assert!(!model.can_visit(VehicleIdx::new(0), depot));
        assert!(!model.is_route_feasible(VehicleIdx::new(0), &[depot]));
        assert!(model.is_route_feasible(VehicleIdx::new(1), &[depot]));
    }

    #[test]
    fn test_time_slack_of_a_large_horizon() {
        let distance = i64::MAX / 8;
        let problem = test_utils::create_test_problem(
            vec![vec![0, distance], vec![distance, 0]],
            vec![(1, 0, None)],
            vec![(1, 1, None, Some(5))],
        );
        let model = test_utils::create_test_model(&problem);
        let time = model.time_dimension().unwrap();

        assert_eq!(time.vehicle_capacity(0), distance + 5);
        assert_eq!(
            time.slack_max(),
            (i128::from(distance + 5) * 10 / 100) as i64
        );
    }

    #[test]
    fn test_route_feasibility() {
        let problem = test_utils::create_test_problem(
            test_utils::three_node_matrix(),
            vec![(1, 0, Some(4)), (2, 0, Some(10))],
            vec![(1, 1, Some(2), None), (2, 2, Some(3), None)],
        );
        let model = test_utils::create_test_model(&problem);
        let both = [NodeIdx::new(1), NodeIdx::new(2)];

        assert!(!model.is_route_feasible(VehicleIdx::new(0), &both));
        assert!(model.is_route_feasible(VehicleIdx::new(1), &both));
        assert_eq!(model.route_cost(VehicleIdx::new(1), &both), 450);
        assert_eq!(model.route_cost(VehicleIdx::new(1), &[]), 0);
    }
}
