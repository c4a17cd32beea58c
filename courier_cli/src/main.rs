use clap::{Parser, Subcommand};

use mimalloc::MiMalloc;

use crate::solve::SolveArgs;

mod solve;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Solves a routing request read from a JSON file
    Solve {
        #[command(flatten)]
        args: SolveArgs,
    },
    /// Prints the JSON schema of a routing request
    Schema,
}

fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Solve { args }) => solve::run(args)?,
        Some(Commands::Schema) => {
            println!("{}", courier_optimizer::json::schema::generate_json_schema()?)
        }
        None => {}
    }

    Ok(())
}
