//! Memory leak simulation: append-only buffer accumulator
//!
//! `MemoryHog` owns every buffer it ever allocated and exposes no way to
//! release them. Allocation goes through `try_reserve_exact`, so running
//! out of memory is reported as a [`GrowthOutcome::Exhausted`] value instead
//! of aborting the process. A configurable ceiling gives a portable stand-in
//! for real exhaustion on hosts that overcommit.

use crate::config::MemoryConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::TryReserveError;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Byte written into every buffer so its pages become resident
const FILL_BYTE: u8 = 0xA5;

/// Parameters for one `/memory` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrowthPlan {
    /// Size of each appended buffer
    pub chunk_size: usize,
    /// Append attempts before the run counts as completed
    pub max_chunks: usize,
    /// Total accumulated bytes beyond which growth reports exhaustion
    pub ceiling_bytes: Option<u64>,
}

impl From<&MemoryConfig> for GrowthPlan {
    fn from(config: &MemoryConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            max_chunks: config.max_chunks,
            ceiling_bytes: (config.ceiling_bytes > 0).then_some(config.ceiling_bytes),
        }
    }
}

impl Default for GrowthPlan {
    fn default() -> Self {
        Self::from(&MemoryConfig::default())
    }
}

/// Why a growth run stopped early
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExhaustionReason {
    /// The allocator refused a reservation
    #[error("failed to allocate {requested} bytes: {message}")]
    AllocationFailed { requested: usize, message: String },

    /// The simulated ceiling would have been crossed
    #[error("memory ceiling of {ceiling} bytes reached")]
    CeilingReached { ceiling: u64 },
}

impl ExhaustionReason {
    fn allocation_failed(requested: usize, err: TryReserveError) -> Self {
        Self::AllocationFailed {
            requested,
            message: err.to_string(),
        }
    }
}

/// Result of one growth run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GrowthOutcome {
    /// Every planned append succeeded
    Completed { appended: usize },
    /// Growth stopped on resource exhaustion; appended buffers are kept
    Exhausted {
        appended: usize,
        reason: ExhaustionReason,
    },
}

impl GrowthOutcome {
    /// Buffers added during this run
    pub fn appended(&self) -> usize {
        match self {
            Self::Completed { appended } | Self::Exhausted { appended, .. } => *appended,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    /// Response body for `GET /memory`
    pub fn message(&self) -> String {
        match self {
            Self::Completed { .. } => {
                "Memory issue simulation completed. Memory usage might be high!".to_string()
            }
            Self::Exhausted { reason, .. } => format!("Memory issue simulated: {reason}"),
        }
    }
}

/// Snapshot of the accumulator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub chunks: usize,
    pub total_bytes: u64,
    pub runs: u64,
    pub exhaustions: u64,
    pub last_grown_at: Option<DateTime<Utc>>,
}

/// Process-lifetime buffer accumulator. Never shrinks.
#[derive(Debug, Default)]
pub struct MemoryHog {
    chunks: Vec<Box<[u8]>>,
    total_bytes: u64,
    runs: u64,
    exhaustions: u64,
    last_grown_at: Option<DateTime<Utc>>,
}

impl MemoryHog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn stats(&self) -> MemoryStats {
        MemoryStats {
            chunks: self.chunks.len(),
            total_bytes: self.total_bytes,
            runs: self.runs,
            exhaustions: self.exhaustions,
            last_grown_at: self.last_grown_at,
        }
    }

    /// Append up to `plan.max_chunks` buffers, stopping at the first exhaustion.
    ///
    /// Blocks the calling thread while buffers are allocated and filled.
    pub fn grow(&mut self, plan: &GrowthPlan) -> GrowthOutcome {
        self.runs += 1;
        self.last_grown_at = Some(Utc::now());
        debug!(
            "Growth run {}: up to {} chunks of {} bytes (holding {} bytes)",
            self.runs, plan.max_chunks, plan.chunk_size, self.total_bytes
        );

        let mut appended = 0;
        for _ in 0..plan.max_chunks {
            if let Err(reason) = self.append(plan) {
                self.exhaustions += 1;
                warn!(
                    "Memory exhausted after {} new chunks ({} bytes held): {}",
                    appended, self.total_bytes, reason
                );
                return GrowthOutcome::Exhausted { appended, reason };
            }
            appended += 1;
        }

        info!(
            "Growth run completed: {} chunks appended, {} bytes held",
            appended, self.total_bytes
        );
        GrowthOutcome::Completed { appended }
    }

    fn append(&mut self, plan: &GrowthPlan) -> Result<(), ExhaustionReason> {
        let size = plan.chunk_size;

        if let Some(ceiling) = plan.ceiling_bytes {
            if self.total_bytes.saturating_add(size as u64) > ceiling {
                return Err(ExhaustionReason::CeilingReached { ceiling });
            }
        }

        let chunk = allocate_chunk(size)
            .map_err(|err| ExhaustionReason::allocation_failed(size, err))?;
        self.chunks
            .try_reserve(1)
            .map_err(|err| ExhaustionReason::allocation_failed(size, err))?;

        self.chunks.push(chunk);
        self.total_bytes += size as u64;
        Ok(())
    }
}

fn allocate_chunk(size: usize) -> Result<Box<[u8]>, TryReserveError> {
    let mut chunk = Vec::new();
    chunk.try_reserve_exact(size)?;
    chunk.resize(size, FILL_BYTE);
    Ok(chunk.into_boxed_slice())
}
