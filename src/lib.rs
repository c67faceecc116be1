//! Perfsim - CPU and memory workload simulator
//!
//! A small HTTP service that misbehaves on purpose, for exercising
//! profilers and memory monitors:
//! - `GET /cpu` runs a cubic triplet-sum search over a generated dataset
//! - `GET /memory` appends buffers to a process-lifetime accumulator until
//!   the run completes or memory runs out
//!
//! # Example
//!
//! ```ignore
//! use perfsim_core::{ApiServer, ApiServerConfig, AppState, PerfsimConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = PerfsimConfig::load("perfsim.toml")?;
//!     let state = AppState::from_config(&config);
//!     let server = ApiServer::new(ApiServerConfig { addr: config.server.addr }, state);
//!     server.serve().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod simulation;

// Re-export commonly used types
pub use api::{ApiServer, ApiServerConfig, AppState};
pub use config::{CpuConfig, MemoryConfig, PerfsimConfig, ServerConfig};
pub use error::{PerfsimError, Result};
pub use simulation::{
    count_triplets, CpuReport, CpuSimulation, Dataset, ExhaustionReason, GrowthOutcome,
    GrowthPlan, MemoryHog, MemoryStats,
};
