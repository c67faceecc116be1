//! HTTP API server for the workload simulations

use super::state::AppState;
use crate::error::Result;
use crate::simulation::MemoryStats;
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Server address
    pub addr: SocketAddr,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            addr: ([127, 0, 0, 1], 8080).into(),
        }
    }
}

/// API server
pub struct ApiServer {
    config: ApiServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Create new API server
    pub fn new(config: ApiServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Get shared state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build router
    pub fn router(state: AppState) -> Router {
        Router::new()
            // Simulations
            .route("/cpu", get(cpu_handler))
            .route("/memory", get(memory_handler))
            .route("/memory/stats", get(memory_stats_handler))
            // Health check
            .route("/health", get(health_handler))
            // State
            .with_state(state)
            // Middleware
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
    }

    /// Serve until Ctrl-C
    pub async fn serve(self) -> Result<()> {
        let router = Self::router(self.state.clone());

        let listener = tokio::net::TcpListener::bind(self.config.addr).await?;
        info!(
            "API server [{}] listening on http://{}",
            self.state.instance_id,
            listener.local_addr()?
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("API server [{}] stopped", self.state.instance_id);
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        debug!("Received Ctrl-C, shutting down");
    }
}

/// Triplet search handler
async fn cpu_handler(State(state): State<AppState>) -> Result<String> {
    let simulation = state.cpu.clone();
    let report = tokio::task::spawn_blocking(move || simulation.run()).await?;
    Ok(report.message())
}

/// Buffer growth handler
///
/// Exhaustion is part of the demo, so both outcomes answer 200.
async fn memory_handler(State(state): State<AppState>) -> Result<String> {
    let hog = state.hog.clone();
    let plan = state.growth.clone();
    let outcome = tokio::task::spawn_blocking(move || hog.blocking_lock().grow(&plan)).await?;
    Ok(outcome.message())
}

/// Accumulator snapshot handler
async fn memory_stats_handler(State(state): State<AppState>) -> Json<MemoryStats> {
    Json(state.hog.lock().await.stats())
}

/// Health check handler
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub instance_id: String,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        instance_id: state.instance_id.clone(),
    })
}
