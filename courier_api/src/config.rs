use anyhow::{Result, anyhow};
use courier_optimizer::{
    parsers::parse_duration,
    solver::{
        pipeline::{SolverConfig, TimeLimitPolicy},
        search_params::SearchParams,
    },
};

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_address: String,
    pub solver: SolverConfig,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `COURIER_*` variables, unset ones keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut search = SearchParams::default();

        if let Some(value) = lookup("COURIER_TIME_LIMIT") {
            search.time_limit =
                parse_duration(&value).map_err(|error| anyhow!("COURIER_TIME_LIMIT: {error}"))?;
        }

        if let Some(value) = lookup("COURIER_SOLUTION_LIMIT") {
            search.solution_limit = value
                .trim()
                .parse()
                .map_err(|error| anyhow!("COURIER_SOLUTION_LIMIT: {error}"))?;
        }

        if let Some(value) = lookup("COURIER_RANDOM_SEED") {
            search.random_seed = value
                .trim()
                .parse()
                .map_err(|error| anyhow!("COURIER_RANDOM_SEED: {error}"))?;
        }

        let time_limit_policy = match lookup("COURIER_TIME_LIMIT_POLICY") {
            Some(value) => value
                .parse::<TimeLimitPolicy>()
                .map_err(|error| anyhow!("COURIER_TIME_LIMIT_POLICY: {error}"))?,
            None => TimeLimitPolicy::default(),
        };

        Ok(ApiConfig {
            bind_address: lookup("COURIER_BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_owned()),
            solver: SolverConfig {
                search,
                time_limit_policy,
            },
        })
    }
}
