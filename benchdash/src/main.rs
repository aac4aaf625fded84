use anyhow::{Context, Result};
use benchdash::Config;
use benchdash::server;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Benchmark dashboard server")]
struct Args {
    /// Optional TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Project root that relative paths resolve against (default: current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Override the listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    let mut config = Config::load(args.config.as_deref(), &root)?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    log::info!("[server] starting benchmark dashboard v{}", env!("CARGO_PKG_VERSION"));
    server::run(config, server::shutdown_signal()).await
}
