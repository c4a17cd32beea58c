use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use courier_optimizer::json::types::{RoutingRequest, RoutingResponse};
use tracing::{debug, info, warn};

use crate::{error::ApiError, state::AppState};

pub async fn solve_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RoutingRequest>, JsonRejection>,
) -> Result<Json<RoutingResponse>, ApiError> {
    let Json(request) = payload?;

    info!(
        vehicles = request.vehicles.len(),
        jobs = request.jobs.len(),
        "Received routing request"
    );

    // The search is CPU bound, keep it off the async workers.
    let solver_state = state.clone();
    let (request, result) = tokio::task::spawn_blocking(move || {
        let result = solver_state.service.solve(&request);
        (request, result)
    })
    .await
    .map_err(|error| ApiError::InternalServerError(error.to_string()))?;

    let response = result?;

    match state.repository.save(&request, &response) {
        Ok(solution_id) => debug!(%solution_id, "Saved solution"),
        Err(error) => warn!(%error, "Failed to save solution, returning it anyway"),
    }

    Ok(Json(response))
}
