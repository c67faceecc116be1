//! CPU load simulation: exhaustive triplet-sum search
//!
//! The search is deliberately cubic. Every combination of three distinct
//! positions `i < j < k` is visited, so a 1000-value dataset costs roughly
//! 166 million comparisons per request.

use crate::config::CpuConfig;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Ordered sequence of integers searched by the simulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    values: Vec<i32>,
}

impl Dataset {
    /// Longest sequential dataset whose values all fit in `i32`
    pub const MAX_LEN: usize = i32::MAX as usize + 1;

    /// Dataset holding `0, 1, ..., len - 1`, with `len` clamped to [`Self::MAX_LEN`]
    pub fn sequential(len: usize) -> Self {
        Self {
            values: (0..).take(len.min(Self::MAX_LEN)).collect(),
        }
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<i32>> for Dataset {
    fn from(values: Vec<i32>) -> Self {
        Self { values }
    }
}

/// Count index triplets `i < j < k` whose values sum to `target`.
///
/// Sums are widened to `i64`, so no combination of `i32` values overflows.
pub fn count_triplets(values: &[i32], target: i64) -> u64 {
    let mut count = 0;

    for (i, &a) in values.iter().enumerate() {
        for (j, &b) in values.iter().enumerate().skip(i + 1) {
            let partial = i64::from(a) + i64::from(b);
            for &c in &values[j + 1..] {
                if partial + i64::from(c) == target {
                    count += 1;
                }
            }
        }
    }

    count
}

/// Parameters for one `/cpu` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuSimulation {
    pub dataset_len: usize,
    pub target_sum: i64,
}

impl From<&CpuConfig> for CpuSimulation {
    fn from(config: &CpuConfig) -> Self {
        Self {
            dataset_len: config.dataset_len,
            target_sum: config.target_sum,
        }
    }
}

impl Default for CpuSimulation {
    fn default() -> Self {
        Self::from(&CpuConfig::default())
    }
}

impl CpuSimulation {
    /// Generate a fresh dataset and search it. Blocks the calling thread.
    pub fn run(&self) -> CpuReport {
        let dataset = Dataset::sequential(self.dataset_len);
        debug!(
            "Searching {} values for triplets summing to {}",
            dataset.len(),
            self.target_sum
        );

        let started = Instant::now();
        let triplets = count_triplets(dataset.values(), self.target_sum);
        let elapsed_ms = whole_millis(started.elapsed());

        info!(
            "Triplet search finished: {} found in {}ms",
            triplets, elapsed_ms
        );

        CpuReport {
            dataset_len: dataset.len(),
            target_sum: self.target_sum,
            triplets,
            elapsed_ms,
        }
    }
}

fn whole_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Result of a triplet search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuReport {
    pub dataset_len: usize,
    pub target_sum: i64,
    pub triplets: u64,
    pub elapsed_ms: u64,
}

impl CpuReport {
    /// Response body for `GET /cpu`
    pub fn message(&self) -> String {
        format!("Task completed! Triplets found: {}", self.triplets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_sequential_dataset() {
        let dataset = Dataset::sequential(5);
        assert_eq!(dataset.values(), &[0, 1, 2, 3, 4]);
        assert!(Dataset::sequential(0).is_empty());
    }

    #[test]
    fn test_max_len_keeps_values_in_range() {
        assert_eq!(Dataset::MAX_LEN - 1, i32::MAX as usize);
        // Clamping never changes realistic lengths
        assert_eq!(Dataset::sequential(1000).len(), 1000);
    }

    #[test]
    fn test_elapsed_millis_saturates() {
        assert_eq!(whole_millis(Duration::from_millis(42)), 42);
        assert_eq!(whole_millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_default_workload_count() {
        let report = CpuSimulation::default().run();
        assert_eq!(report.dataset_len, 1000);
        assert_eq!(report.triplets, 83_333);
        assert_eq!(report.message(), "Task completed! Triplets found: 83333");
    }

    #[test]
    fn test_count_is_reproducible() {
        let dataset = Dataset::sequential(120);
        let first = count_triplets(dataset.values(), 150);
        let second = count_triplets(dataset.values(), 150);
        assert_eq!(first, second);
    }

    #[test]
    fn test_small_sequence() {
        // {0,3,9} {0,4,8} {0,5,7} {1,2,9} {1,3,8} {1,4,7} {1,5,6} {2,3,7} {2,4,6} {3,4,5}
        let dataset = Dataset::sequential(10);
        assert_eq!(count_triplets(dataset.values(), 12), 10);
    }

    #[test]
    fn test_unreachable_target() {
        let dataset = Dataset::sequential(200);
        assert_eq!(count_triplets(dataset.values(), -1), 0);
        // Largest possible sum is 197 + 198 + 199
        assert_eq!(count_triplets(dataset.values(), 595), 0);
        assert_eq!(count_triplets(dataset.values(), 594), 1);
    }

    #[test]
    fn test_fewer_than_three_values() {
        assert_eq!(count_triplets(&[], 0), 0);
        assert_eq!(count_triplets(&[0], 0), 0);
        assert_eq!(count_triplets(&[0, 0], 0), 0);
    }

    #[test]
    fn test_index_used_once_per_triplet() {
        // 2 + 2 + 2 would hit the target only by reusing an index
        assert_eq!(count_triplets(&[2, 5], 6), 0);
        // Duplicate values at distinct positions are separate triplets
        assert_eq!(count_triplets(&[1, 1, 1, 1], 3), 4);
    }

    #[test]
    fn test_no_overflow_at_extremes() {
        let values = [i32::MAX, i32::MAX, i32::MAX];
        assert_eq!(count_triplets(&values, 3 * i64::from(i32::MAX)), 1);
    }

    /// Independent enumeration: every ordered pick of three distinct positions,
    /// deduplicated as unordered sets
    fn distinct_index_sets(values: &[i32], target: i64) -> u64 {
        let n = values.len();
        let mut seen = HashSet::new();
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    if i == j || j == k || i == k {
                        continue;
                    }
                    let sum = i64::from(values[i]) + i64::from(values[j]) + i64::from(values[k]);
                    if sum == target {
                        let mut key = [i, j, k];
                        key.sort_unstable();
                        seen.insert(key);
                    }
                }
            }
        }
        seen.len() as u64
    }

    proptest! {
        #[test]
        fn prop_counts_each_unordered_triplet_once(
            values in prop::collection::vec(-20i32..20, 0..18),
            target in -60i64..60,
        ) {
            prop_assert_eq!(count_triplets(&values, target), distinct_index_sets(&values, target));
        }

        #[test]
        fn prop_negative_target_unreachable_for_non_negative_values(
            values in prop::collection::vec(0i32..1000, 0..40),
            target in i64::MIN..0,
        ) {
            prop_assert_eq!(count_triplets(&values, target), 0);
        }
    }
}
