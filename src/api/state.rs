//! Process-scoped state shared by the request handlers

use crate::config::PerfsimConfig;
use crate::simulation::{CpuSimulation, GrowthPlan, MemoryHog};
use std::sync::Arc;
use tokio::sync::Mutex;

/// State injected into every handler.
///
/// The accumulator sits behind a mutex, so concurrent `/memory` requests
/// grow it one at a time.
#[derive(Clone)]
pub struct AppState {
    /// Triplet search parameters
    pub cpu: CpuSimulation,
    /// Buffer growth parameters
    pub growth: GrowthPlan,
    /// Lives as long as the process; never cleared
    pub hog: Arc<Mutex<MemoryHog>>,
    /// Instance ID
    pub instance_id: String,
}

impl AppState {
    pub fn new(cpu: CpuSimulation, growth: GrowthPlan) -> Self {
        Self {
            cpu,
            growth,
            hog: Arc::new(Mutex::new(MemoryHog::new())),
            instance_id: uuid::Uuid::new_v4().to_string()[..8].to_string(),
        }
    }

    pub fn from_config(config: &PerfsimConfig) -> Self {
        Self::new(
            CpuSimulation::from(&config.cpu),
            GrowthPlan::from(&config.memory),
        )
    }
}
