//! Quality Statistics
//!
//! Process-wide counters over completed runs. Per-run totals and the
//! confidence histogram share one short-held mutex; cache hits are a lone
//! atomic. Only terminal outcomes are recorded, never cancelled or failed
//! runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::models::Outcome;

/// Number of confidence buckets: 0-9, 10-19, ..., 90-100
pub const HISTOGRAM_BUCKETS: usize = 10;

/// Per-outcome run counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub accepted: u64,
    pub corrected: u64,
    pub enhanced: u64,
    pub fallback: u64,
}

impl OutcomeCounts {
    pub fn get(&self, outcome: Outcome) -> u64 {
        match outcome {
            Outcome::Accepted => self.accepted,
            Outcome::Corrected => self.corrected,
            Outcome::Enhanced => self.enhanced,
            Outcome::Fallback => self.fallback,
        }
    }

    pub fn total(&self) -> u64 {
        self.accepted + self.corrected + self.enhanced + self.fallback
    }
}

/// Point-in-time view of the statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_runs: u64,
    pub total_size_bytes: u64,
    pub average_size_bytes: f64,
    pub outcomes: OutcomeCounts,
    pub confidence_histogram: [u64; HISTOGRAM_BUCKETS],
    pub average_confidence: f64,
    pub cache_hits: u64,
}

/// Per-run totals, updated together so a snapshot never sees a run half
/// recorded.
#[derive(Debug, Default)]
struct RunTotals {
    total_runs: u64,
    total_size_bytes: u64,
    confidence_sum: u64,
    outcomes: OutcomeCounts,
    histogram: [u64; HISTOGRAM_BUCKETS],
}

/// Shared quality statistics.
#[derive(Debug, Default)]
pub struct QualityStats {
    runs: Mutex<RunTotals>,
    cache_hits: AtomicU64,
}

/// Histogram bucket for a confidence value.
pub fn bucket_for(confidence: u8) -> usize {
    (usize::from(confidence) / 10).min(HISTOGRAM_BUCKETS - 1)
}

impl QualityStats {
    pub fn new() -> Self {
        Self::default()
    }

    fn runs(&self) -> MutexGuard<'_, RunTotals> {
        self.runs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record one completed run.
    pub fn record_run(&self, outcome: Outcome, size_bytes: usize, confidence: u8) {
        let mut runs = self.runs();
        runs.total_runs += 1;
        runs.total_size_bytes += size_bytes as u64;
        runs.confidence_sum += u64::from(confidence);
        match outcome {
            Outcome::Accepted => runs.outcomes.accepted += 1,
            Outcome::Corrected => runs.outcomes.corrected += 1,
            Outcome::Enhanced => runs.outcomes.enhanced += 1,
            Outcome::Fallback => runs.outcomes.fallback += 1,
        }
        runs.histogram[bucket_for(confidence)] += 1;
    }

    /// Record a request served from the cache.
    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let runs = self.runs();
        let average = |sum: u64| {
            if runs.total_runs == 0 {
                0.0
            } else {
                sum as f64 / runs.total_runs as f64
            }
        };

        StatsSnapshot {
            total_runs: runs.total_runs,
            total_size_bytes: runs.total_size_bytes,
            average_size_bytes: average(runs.total_size_bytes),
            outcomes: runs.outcomes.clone(),
            confidence_histogram: runs.histogram,
            average_confidence: average(runs.confidence_sum),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
        }
    }
}
