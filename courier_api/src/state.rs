use std::sync::Arc;

use courier_optimizer::solver::pipeline::RoutingService;

use crate::repository::SolutionRepository;

pub struct AppState {
    pub service: RoutingService,
    pub repository: Arc<dyn SolutionRepository>,
}
