use std::sync::Arc;

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    health::health_handler,
    solutions::{get_solution_handler, recent_solutions_handler},
    solve::solve_handler,
    state::AppState,
};

pub fn router(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/solve", post(solve_handler))
        .route("/health", get(health_handler))
        .route("/solutions", get(recent_solutions_handler))
        .route("/solutions/{solution_id}", get(get_solution_handler))
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(state)
}
