use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::{error::ApiError, repository::StoredSolution, state::AppState};

#[derive(Deserialize)]
pub struct RecentQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

pub async fn recent_solutions_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<StoredSolution>>, ApiError> {
    Ok(Json(state.repository.recent(query.limit)?))
}

pub async fn get_solution_handler(
    State(state): State<Arc<AppState>>,
    Path(solution_id): Path<String>,
) -> Result<Json<StoredSolution>, ApiError> {
    state
        .repository
        .get(&solution_id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("solution {solution_id} not found")))
}
