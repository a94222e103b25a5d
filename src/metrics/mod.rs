//! Run-level metrics for the match orchestrator
//!
//! Metrics live for the lifetime of the orchestrator that owns them and are
//! reset only via an explicit operation. Concurrent patient runs each
//! accumulate an immutable [`RunDelta`] and apply it in a single exclusive
//! section at run completion, so counters are never updated from multiple
//! threads without synchronization.

use serde::Serialize;
use std::sync::Mutex;

/// Immutable per-run counter delta, applied once at run completion
#[derive(Debug, Clone, Default)]
pub struct RunDelta {
    /// Trials evaluated during the run
    pub evaluations: u64,
    /// Evaluations that ended eligible
    pub eligible_matches: u64,
    /// Sum of decision confidences
    pub confidence_sum: f64,
    /// Trials skipped for configuration errors
    pub trials_skipped: u64,
}

/// Point-in-time copy of the accumulated counters
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// Total trials evaluated across all runs
    pub total_evaluations: u64,
    /// Total evaluations that ended eligible
    pub eligible_matches: u64,
    /// Sum of all decision confidences
    pub confidence_sum: f64,
    /// Total trials skipped for configuration errors
    pub trials_skipped: u64,
    /// Completed orchestration runs
    pub runs_completed: u64,
}

impl MetricsSnapshot {
    /// Mean confidence over all evaluations, zero when none have run
    #[must_use]
    pub fn average_confidence(&self) -> f64 {
        if self.total_evaluations == 0 {
            0.0
        } else {
            self.confidence_sum / self.total_evaluations as f64
        }
    }
}

/// Thread-safe accumulator for run-level metrics
#[derive(Debug, Default)]
pub struct MetricsStore {
    inner: Mutex<MetricsSnapshot>,
}

impl MetricsStore {
    /// Create a store with zeroed counters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one run's delta under a single exclusive section
    pub fn apply(&self, delta: &RunDelta) {
        let mut inner = self.inner.lock().unwrap();
        inner.total_evaluations += delta.evaluations;
        inner.eligible_matches += delta.eligible_matches;
        inner.confidence_sum += delta.confidence_sum;
        inner.trials_skipped += delta.trials_skipped;
        inner.runs_completed += 1;
    }

    /// Copy the current counters
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner.lock().unwrap().clone()
    }

    /// Zero every counter; the only way metrics are ever cleared
    pub fn reset(&self) {
        *self.inner.lock().unwrap() = MetricsSnapshot::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_accumulates() {
        let store = MetricsStore::new();
        store.apply(&RunDelta {
            evaluations: 3,
            eligible_matches: 1,
            confidence_sum: 2.4,
            trials_skipped: 1,
        });
        store.apply(&RunDelta {
            evaluations: 2,
            eligible_matches: 2,
            confidence_sum: 2.0,
            trials_skipped: 0,
        });

        let snapshot = store.snapshot();
        assert_eq!(snapshot.total_evaluations, 5);
        assert_eq!(snapshot.eligible_matches, 3);
        assert_eq!(snapshot.trials_skipped, 1);
        assert_eq!(snapshot.runs_completed, 2);
        assert!((snapshot.confidence_sum - 4.4).abs() < 1e-9);
    }

    #[test]
    fn test_average_confidence_guards_empty() {
        let store = MetricsStore::new();
        assert_eq!(store.snapshot().average_confidence(), 0.0);
    }

    #[test]
    fn test_reset_zeroes_counters() {
        let store = MetricsStore::new();
        store.apply(&RunDelta {
            evaluations: 4,
            eligible_matches: 2,
            confidence_sum: 3.5,
            trials_skipped: 0,
        });
        store.reset();
        assert_eq!(store.snapshot(), MetricsSnapshot::default());
    }
}
