//! HTTP API exposing the workload simulations
//!
//! Provides:
//! - `GET /cpu` triplet search
//! - `GET /memory` buffer growth
//! - `GET /memory/stats` accumulator snapshot
//! - `GET /health` liveness probe

pub mod server;
pub mod state;

pub use server::{ApiServer, ApiServerConfig};
pub use state::AppState;
