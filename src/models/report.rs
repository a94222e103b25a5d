//! Aggregate match report for one patient run

use crate::models::Decision;
use serde::Serialize;

/// Aggregate of all decisions for one patient across a trial catalog
///
/// Decisions appear in catalog order, minus only configuration-skipped
/// trials; the report is built once per run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    patient_id: String,
    decisions: Vec<Decision>,
    eligible_count: usize,
    average_confidence: f64,
    skipped_trials: Vec<String>,
}

impl MatchReport {
    /// Build a report from the decisions of one run
    ///
    /// Derived counts are computed here; an empty decision list yields an
    /// average confidence of zero rather than a division by zero.
    #[must_use]
    pub fn new(patient_id: String, decisions: Vec<Decision>, skipped_trials: Vec<String>) -> Self {
        let eligible_count = decisions.iter().filter(|d| d.eligible).count();
        let average_confidence = if decisions.is_empty() {
            0.0
        } else {
            decisions.iter().map(|d| d.confidence).sum::<f64>() / decisions.len() as f64
        };

        Self {
            patient_id,
            decisions,
            eligible_count,
            average_confidence,
            skipped_trials,
        }
    }

    /// Identifier of the evaluated patient
    #[must_use]
    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    /// Decisions in catalog order
    #[must_use]
    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    /// Number of trials the patient is eligible for
    #[must_use]
    pub const fn eligible_count(&self) -> usize {
        self.eligible_count
    }

    /// Mean confidence across all decisions, zero for an empty run
    #[must_use]
    pub const fn average_confidence(&self) -> f64 {
        self.average_confidence
    }

    /// Identifiers of trials skipped due to configuration errors
    #[must_use]
    pub fn skipped_trials(&self) -> &[String] {
        &self.skipped_trials
    }
}
