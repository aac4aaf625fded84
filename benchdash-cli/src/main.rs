use clap::{Parser, Subcommand};
use reqwest::Client;
use std::error::Error;

mod doctor;
mod results;

#[derive(clap::Parser, Debug)]
struct Args {
    /// Base URL of the dashboard server
    #[clap(long, default_value = "http://127.0.0.1:8080")]
    url: String,

    /// Disable colorized output
    #[clap(long)]
    no_color: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Show baseline results and the optimization ranking
    Data,
    /// Show host processor and core count
    System,
    /// Start a benchmark run on the server
    Run {
        /// Benchmark type label
        #[clap(long = "type", default_value = "baseline")]
        kind: String,
    },
    /// Check that the dashboard API is reachable and healthy
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let client = Client::new();
    let url = args.url.trim_end_matches('/');

    match args.command {
        Command::Data => results::run_data(&client, url).await?,
        Command::System => results::run_system(&client, url).await?,
        Command::Run { kind } => results::run_benchmark(&client, url, &kind).await?,
        Command::Doctor => doctor::run_doctor(&client, url).await?,
    }
    Ok(())
}
