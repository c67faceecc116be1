//! Workload simulations behind the HTTP routes
//!
//! - `cpu`: brute-force triplet search that pins a core
//! - `memory`: process-lifetime buffer accumulator that never frees

pub mod cpu;
pub mod memory;

pub use cpu::{count_triplets, CpuReport, CpuSimulation, Dataset};
pub use memory::{ExhaustionReason, GrowthOutcome, GrowthPlan, MemoryHog, MemoryStats};
