//! Evaluation output models
//!
//! A [`Decision`] carries the full reasoning trail for one (patient, trial)
//! pair. Consumers render decisions without access to engine internals, so
//! every displayable field is materialized here.

use serde::{Deserialize, Serialize};

/// One named eligibility check with a human-readable explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    /// Stable criterion name (`diagnosis`, `age`, the biomarker's own name,
    /// `medication`, `location`)
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Human-readable explanation of the outcome
    pub detail: String,
}

impl Criterion {
    /// Create a passing criterion
    #[must_use]
    pub fn passed(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            detail: detail.into(),
        }
    }

    /// Create a failing criterion
    #[must_use]
    pub fn failed(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            detail: detail.into(),
        }
    }
}

/// Full evaluation result for one (patient, trial) pair
///
/// `eligible` and `confidence` are always derived from the criterion list by
/// [`Decision::from_criteria`]; they are never set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Identifier of the evaluated trial
    pub trial_id: String,
    /// Whether every criterion passed
    pub eligible: bool,
    /// Fraction of passed criteria, in `[0, 1]`
    pub confidence: f64,
    /// Every evaluated criterion, in stable evaluation order
    pub criteria: Vec<Criterion>,
    /// Names of biomarkers required by the trial but absent from the record
    pub missing_criteria: Vec<String>,
}

impl Decision {
    /// Derive a decision from an evaluated criterion list
    ///
    /// The confidence is the plain ratio of passed criteria to total
    /// criteria, a deliberate simplification; a production system would
    /// replace it with a calibrated probabilistic score. Eligibility is a
    /// hard gate for clinical safety: partial credit never qualifies, and
    /// ties always resolve to ineligible.
    #[must_use]
    pub fn from_criteria(
        trial_id: String,
        criteria: Vec<Criterion>,
        missing_criteria: Vec<String>,
    ) -> Self {
        let total = criteria.len();
        let passed = criteria.iter().filter(|c| c.passed).count();
        let confidence = if total == 0 {
            0.0
        } else {
            passed as f64 / total as f64
        };

        Self {
            trial_id,
            eligible: total > 0 && passed == total,
            confidence,
            criteria,
            missing_criteria,
        }
    }

    /// Number of passed criteria
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.criteria.iter().filter(|c| c.passed).count()
    }

    /// Criteria that failed, in evaluation order
    #[must_use]
    pub fn failed_criteria(&self) -> Vec<&Criterion> {
        self.criteria.iter().filter(|c| !c.passed).collect()
    }
}
