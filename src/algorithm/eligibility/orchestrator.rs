//! Match orchestration across a trial catalog
//!
//! The orchestrator runs the evaluator over every trial in caller order,
//! collects the decisions into a [`MatchReport`], emits one audit event per
//! trial (evaluated or skipped), and applies the run's metrics delta in a
//! single exclusive section at completion.

use crate::algorithm::eligibility::evaluator::EligibilityEvaluator;
use crate::audit::{AuditEvent, AuditSink};
use crate::config::MatchConfig;
use crate::metrics::{MetricsStore, RunDelta};
use crate::models::{Decision, MatchReport, PatientRecord, TrialDefinition};
use log::{info, warn};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;

/// Outcome of assessing one catalog entry
enum TrialOutcome {
    /// The trial was well-formed and evaluated
    Evaluated(Decision),
    /// The trial failed its own invariants and was skipped
    Skipped { trial_id: String, reason: String },
}

/// Runs the eligibility evaluator across a trial catalog for one patient
///
/// A trial definition that fails an internal invariant is a configuration
/// error, not a patient-data error: the trial is skipped, audited, and the
/// run continues. Partial results are always returned to the caller.
pub struct MatchOrchestrator {
    evaluator: EligibilityEvaluator,
    config: MatchConfig,
    metrics: MetricsStore,
    sink: Arc<dyn AuditSink>,
}

impl MatchOrchestrator {
    /// Create an orchestrator with its own metrics store
    #[must_use]
    pub fn new(config: MatchConfig, sink: Arc<dyn AuditSink>) -> Self {
        Self {
            evaluator: EligibilityEvaluator::new(),
            config,
            metrics: MetricsStore::new(),
            sink,
        }
    }

    /// Metrics accumulated by this orchestrator
    #[must_use]
    pub const fn metrics(&self) -> &MetricsStore {
        &self.metrics
    }

    /// Evaluate one patient against every trial in the catalog
    ///
    /// The catalog order is caller-defined and preserved in the report.
    /// Decisions are identical between the sequential and parallel paths;
    /// audit events and metrics are always applied sequentially in catalog
    /// order.
    pub fn run(&self, patient: &PatientRecord, trials: &[TrialDefinition]) -> MatchReport {
        let start = Instant::now();

        let use_parallel =
            self.config.use_parallel && trials.len() >= self.config.parallel_threshold;

        let outcomes: Vec<TrialOutcome> = if use_parallel {
            trials
                .par_iter()
                .map(|trial| self.assess(patient, trial))
                .collect()
        } else {
            trials
                .iter()
                .map(|trial| self.assess(patient, trial))
                .collect()
        };

        let mut decisions = Vec::with_capacity(trials.len());
        let mut skipped_trials = Vec::new();
        let mut delta = RunDelta::default();

        for outcome in outcomes {
            match outcome {
                TrialOutcome::Evaluated(decision) => {
                    if self.config.log_decisions {
                        info!(
                            "trial {}: {} (confidence {:.2})",
                            decision.trial_id,
                            if decision.eligible { "eligible" } else { "ineligible" },
                            decision.confidence
                        );
                    }
                    self.sink
                        .append(AuditEvent::evaluation(patient.patient_id(), &decision));
                    delta.evaluations += 1;
                    if decision.eligible {
                        delta.eligible_matches += 1;
                    }
                    delta.confidence_sum += decision.confidence;
                    decisions.push(decision);
                }
                TrialOutcome::Skipped { trial_id, reason } => {
                    warn!("skipping misconfigured trial {trial_id}: {reason}");
                    self.sink
                        .append(AuditEvent::skipped(patient.patient_id(), &trial_id, &reason));
                    delta.trials_skipped += 1;
                    skipped_trials.push(trial_id);
                }
            }
        }

        self.metrics.apply(&delta);

        info!(
            "evaluated {} of {} trials for patient {} in {:?}",
            decisions.len(),
            trials.len(),
            patient.patient_id(),
            start.elapsed()
        );

        MatchReport::new(patient.patient_id().to_string(), decisions, skipped_trials)
    }

    /// Validate and evaluate one trial; pure, so it can run on any thread
    fn assess(&self, patient: &PatientRecord, trial: &TrialDefinition) -> TrialOutcome {
        match trial.validate() {
            Ok(()) => TrialOutcome::Evaluated(self.evaluator.evaluate(patient, trial)),
            Err(err) => TrialOutcome::Skipped {
                trial_id: trial.trial_id.clone(),
                reason: err.to_string(),
            },
        }
    }
}
