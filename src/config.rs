//! Layered configuration for perfsim
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. Optional TOML file (`perfsim.toml` unless overridden)
//! 3. Environment variables prefixed with `PERFSIM_`, nested keys joined by `__`
//!    (e.g. `PERFSIM_MEMORY__CHUNK_SIZE=4096`)

use crate::error::{PerfsimError, Result};
use crate::simulation::Dataset;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use tracing::debug;

/// Environment variable prefix
const ENV_PREFIX: &str = "PERFSIM";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerfsimConfig {
    pub server: ServerConfig,
    pub cpu: CpuConfig,
    pub memory: MemoryConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: ([127, 0, 0, 1], 8080).into(),
        }
    }
}

/// Triplet search settings for `/cpu`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuConfig {
    /// Number of values in the generated dataset (`0..dataset_len`)
    pub dataset_len: usize,
    /// Sum each counted triplet must hit
    pub target_sum: i64,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            dataset_len: 1000,
            target_sum: 1000,
        }
    }
}

/// Buffer growth settings for `/memory`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Size of every appended buffer in bytes
    pub chunk_size: usize,
    /// Maximum number of appends attempted per request
    pub max_chunks: usize,
    /// Simulated memory ceiling in bytes across the process lifetime (0 disables it)
    pub ceiling_bytes: u64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            chunk_size: 200_000,
            max_chunks: 100_000,
            ceiling_bytes: 2 * 1024 * 1024 * 1024,
        }
    }
}

impl PerfsimConfig {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration (file: {})", path.display());

        let config: PerfsimConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the simulations cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.memory.chunk_size == 0 {
            return Err(PerfsimError::InvalidConfig(
                "memory.chunk_size must be greater than zero".to_string(),
            ));
        }

        if self.cpu.dataset_len > Dataset::MAX_LEN {
            return Err(PerfsimError::InvalidConfig(format!(
                "cpu.dataset_len must not exceed {}",
                Dataset::MAX_LEN
            )));
        }

        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
