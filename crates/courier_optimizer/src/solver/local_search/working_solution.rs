use crate::{
    model::routing_model::{NodeIdx, RoutingModel},
    problem::vehicle::VehicleIdx,
    solver::optimizer::Assignment,
};

/// Visit sequences of every vehicle, start and end nodes excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingSolution {
    routes: Vec<Vec<NodeIdx>>,
}

impl WorkingSolution {
    pub fn empty(model: &RoutingModel) -> Self {
        WorkingSolution {
            routes: vec![Vec::new(); model.num_vehicles()],
        }
    }

    pub fn route(&self, vehicle_id: VehicleIdx) -> &[NodeIdx] {
        &self.routes[vehicle_id.get()]
    }

    pub fn insert(&mut self, vehicle_id: VehicleIdx, position: usize, node: NodeIdx) {
        self.routes[vehicle_id.get()].insert(position, node);
    }

    pub fn replace_route(&mut self, vehicle_id: VehicleIdx, visits: Vec<NodeIdx>) {
        self.routes[vehicle_id.get()] = visits;
    }

    pub fn objective(&self, model: &RoutingModel) -> i64 {
        model
            .vehicles_iter()
            .map(|vehicle_id| model.route_cost(vehicle_id, self.route(vehicle_id)))
            .sum()
    }

    pub fn arcs<'a>(
        &'a self,
        model: &'a RoutingModel,
    ) -> impl Iterator<Item = (NodeIdx, NodeIdx)> + 'a {
        model
            .vehicles_iter()
            .flat_map(move |vehicle_id| model.route_arcs(vehicle_id, self.route(vehicle_id)))
    }

    pub fn into_assignment(self, model: &RoutingModel) -> Assignment {
        let objective = self.objective(model);
        Assignment::from_paths(model, &self.routes, objective)
    }
}
