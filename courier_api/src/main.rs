mod config;
mod error;
mod health;
mod repository;
mod routes;
mod solutions;
mod solve;
mod state;

use std::sync::Arc;

use axum::serve;
use courier_optimizer::solver::pipeline::RoutingService;
use tracing::{Level, info};

use mimalloc::MiMalloc;

use crate::{
    config::ApiConfig, repository::InMemorySolutionRepository, routes::router, state::AppState,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = ApiConfig::from_env()?;

    info!(
        time_limit = %config.solver.search.time_limit,
        solution_limit = config.solver.search.solution_limit,
        policy = ?config.solver.time_limit_policy,
        "Loaded solver configuration"
    );

    let state = Arc::new(AppState {
        service: RoutingService::new(config.solver),
        repository: Arc::new(InMemorySolutionRepository::default()),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_address.as_str()).await?;
    info!("Listening on {}", config.bind_address);

    serve(listener, router(state)).await?;

    Ok(())
}
