use std::{fs::File, io::BufReader, path::PathBuf};

use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};
use courier_optimizer::{
    json::types::{RoutingRequest, RoutingResponse},
    parsers,
    solver::{
        pipeline::{RoutingService, SolverConfig, TimeLimitPolicy},
        search_params::SearchParams,
    },
};
use tracing::info;

#[derive(Args)]
pub struct SolveArgs {
    /// The request to solve
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Time limit of the search (e.g., "30s", "5m", "PT1H30M")
    #[arg(short, long, value_parser = parsers::parse_duration, default_value = "30s")]
    timeout: jiff::SignedDuration,

    /// Maximum number of solutions accepted by the search
    #[arg(long, short = 'n', default_value_t = 100)]
    solutions: usize,

    /// Overrides the random seed of the request
    #[arg(long)]
    seed: Option<u64>,

    /// Fails instead of returning a solution found after the time limit
    #[arg(long)]
    reject_slow: bool,

    /// Writes the JSON response into this file
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
}

pub fn run(args: SolveArgs) -> anyhow::Result<()> {
    let f = File::open(&args.input)?;
    let mut request: RoutingRequest = serde_json::from_reader(BufReader::new(f))?;
    if args.seed.is_some() {
        request.random_seed = args.seed;
    }

    let service = RoutingService::new(SolverConfig {
        search: SearchParams {
            time_limit: args.timeout,
            solution_limit: args.solutions,
            ..SearchParams::default()
        },
        time_limit_policy: if args.reject_slow {
            TimeLimitPolicy::Reject
        } else {
            TimeLimitPolicy::WarnAndReturn
        },
    });

    info!("Solving {:?}", args.input);
    let response = service.solve(&request)?;

    println!("{}", routes_table(&response));
    if let Some(metadata) = &response.metadata {
        info!(
            "Finished: total delivery duration = {}, objective = {}, time = {:.3}s, seed = {}",
            response.total_delivery_duration,
            metadata.objective_value,
            metadata.solve_time_seconds,
            metadata.random_seed,
        );
    }

    if let Some(out) = args.out {
        serde_json::to_writer_pretty(File::create(&out)?, &response)?;
        info!("Response written to {:?}", out);
    }

    Ok(())
}

fn routes_table(response: &RoutingResponse) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Vehicle",
        "Jobs",
        "Distance",
        "Service",
        "Duration",
        "Load",
        "Start",
        "End",
    ]);

    for (vehicle_id, route) in &response.routes {
        let jobs = route
            .jobs
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        table.add_row(vec![
            vehicle_id.clone(),
            jobs,
            route.total_distance.to_string(),
            route.total_service_time.to_string(),
            route.delivery_duration.to_string(),
            route.capacity_used.to_string(),
            route.start_location.to_string(),
            route.end_location.to_string(),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use courier_optimizer::json::types::RouteOutput;

    use super::*;

    #[test]
    fn test_routes_table_lists_every_vehicle() {
        let response = RoutingResponse {
            total_delivery_duration: 450,
            routes: BTreeMap::from([
                (
                    "1".to_owned(),
                    RouteOutput {
                        jobs: vec![1, 2],
                        delivery_duration: 450,
                        capacity_used: 5,
                        total_service_time: 0,
                        total_distance: 450,
                        start_location: 0,
                        end_location: 0,
                    },
                ),
                (
                    "2".to_owned(),
                    RouteOutput {
                        jobs: vec![],
                        delivery_duration: 0,
                        capacity_used: 0,
                        total_service_time: 0,
                        total_distance: 0,
                        start_location: 0,
                        end_location: 0,
                    },
                ),
            ]),
            metadata: None,
        };

        let table = routes_table(&response);

        assert_eq!(table.row_iter().count(), 2);
        assert!(table.to_string().contains("1, 2"));
    }
}
