//! Perfsim - CPU and memory workload simulator
//!
//! Entry point for the HTTP service and the one-shot simulation commands.

use anyhow::Context;
use clap::{Parser, Subcommand};
use perfsim_core::{
    ApiServer, ApiServerConfig, AppState, CpuSimulation, GrowthPlan, MemoryHog, PerfsimConfig,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "perfsim")]
#[command(about = "HTTP service that simulates CPU and memory pressure", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (missing file falls back to defaults)
    #[arg(short, long, env = "PERFSIM_CONFIG", default_value = "perfsim.toml")]
    config: PathBuf,

    /// Listen address (overrides server.addr)
    #[arg(long)]
    addr: Option<SocketAddr>,

    /// Set log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Run the triplet search once and print the result
    Cpu {
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run one buffer growth pass and print the result
    Memory {
        /// Print the outcome and accumulator stats as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let level = level.as_str().to_lowercase();
    let filter = EnvFilter::new(format!("perfsim={level},perfsim_core={level},tower_http={level}"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // Write logs to stderr, not stdout
        .init();

    debug!("Perfsim v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = PerfsimConfig::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    if let Some(addr) = cli.addr {
        config.server.addr = addr;
    }

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let state = AppState::from_config(&config);
            let server = ApiServer::new(
                ApiServerConfig {
                    addr: config.server.addr,
                },
                state,
            );
            debug!("Starting HTTP API server [{}]...", server.state().instance_id);
            server.serve().await?;
        }
        Commands::Cpu { json } => {
            let simulation = CpuSimulation::from(&config.cpu);
            let report = tokio::task::spawn_blocking(move || simulation.run()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.message());
            }
        }
        Commands::Memory { json } => {
            let plan = GrowthPlan::from(&config.memory);
            let (outcome, stats) = tokio::task::spawn_blocking(move || {
                let mut hog = MemoryHog::new();
                let outcome = hog.grow(&plan);
                (outcome, hog.stats())
            })
            .await?;
            if json {
                let value = serde_json::json!({ "outcome": outcome, "stats": stats });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", outcome.message());
            }
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
