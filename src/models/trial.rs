//! Trial definition model
//!
//! A [`TrialDefinition`] is a declarative eligibility specification loaded
//! from the trial catalog. Definitions are deserializable as-is so that a
//! misconfigured catalog entry can still be represented; the orchestrator
//! calls [`TrialDefinition::validate`] and skips entries that fail, treating
//! them as configuration errors rather than patient-data errors.

use crate::error::{Result, TrialMatchError};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Inclusive age bounds for a trial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeRange {
    /// Minimum eligible age in years
    pub min: i32,
    /// Maximum eligible age in years
    pub max: i32,
}

impl AgeRange {
    /// Check whether an age falls within the bounds, inclusive
    #[must_use]
    pub const fn contains(&self, age: i32) -> bool {
        self.min <= age && age <= self.max
    }
}

/// Inclusive bounds for one required biomarker
///
/// A biomarker named in a trial is mandatory evidence: its absence from the
/// patient record fails the criterion, it is never skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerRange {
    /// Biomarker name as reported by the upstream system
    pub name: String,
    /// Minimum acceptable value
    pub min: f64,
    /// Maximum acceptable value
    pub max: f64,
}

impl BiomarkerRange {
    /// Check whether a measured value falls within the bounds, inclusive
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Declarative eligibility specification for one trial
///
/// Biomarker requirements are kept as a vector rather than a map so that the
/// trial's declared order is preserved; criterion order within a decision
/// matches the order presented to a human reviewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialDefinition {
    /// Trial identifier, unique within the catalog
    pub trial_id: String,
    /// Human-readable trial title
    #[serde(default)]
    pub title: String,
    /// Trial phase label (e.g. "Phase 3")
    #[serde(default)]
    pub phase: String,
    /// Diagnosis required for enrollment, matched case-insensitively
    pub required_diagnosis: String,
    /// Inclusive age bounds
    pub age_range: AgeRange,
    /// Required biomarkers in declared order
    #[serde(default)]
    pub biomarker_ranges: Vec<BiomarkerRange>,
    /// Medications that disqualify a patient
    #[serde(default)]
    pub excluded_medications: Vec<String>,
    /// Eligible trial sites; an empty list means no location restriction
    #[serde(default)]
    pub eligible_locations: Vec<String>,
}

impl TrialDefinition {
    /// Validate the definition's own invariants
    ///
    /// # Returns
    ///
    /// `Ok(())` for a well-formed definition, or a `TrialConfiguration` error
    /// naming the first violated invariant
    pub fn validate(&self) -> Result<()> {
        if self.trial_id.trim().is_empty() {
            return Err(TrialMatchError::TrialConfiguration(
                "trial id must not be empty".to_string(),
            ));
        }

        if self.required_diagnosis.trim().is_empty() {
            return Err(TrialMatchError::TrialConfiguration(format!(
                "trial {}: required diagnosis must not be empty",
                self.trial_id
            )));
        }

        if self.age_range.min > self.age_range.max {
            return Err(TrialMatchError::TrialConfiguration(format!(
                "trial {}: age range min {} exceeds max {}",
                self.trial_id, self.age_range.min, self.age_range.max
            )));
        }

        let mut seen = FxHashSet::default();
        for range in &self.biomarker_ranges {
            if !seen.insert(range.name.as_str()) {
                return Err(TrialMatchError::TrialConfiguration(format!(
                    "trial {}: duplicate biomarker requirement {}",
                    self.trial_id, range.name
                )));
            }

            if !(range.min.is_finite() && range.max.is_finite()) {
                return Err(TrialMatchError::TrialConfiguration(format!(
                    "trial {}: biomarker {} has non-finite bounds",
                    self.trial_id, range.name
                )));
            }

            if range.min > range.max {
                return Err(TrialMatchError::TrialConfiguration(format!(
                    "trial {}: biomarker {} range min {} exceeds max {}",
                    self.trial_id, range.name, range.min, range.max
                )));
            }
        }

        Ok(())
    }
}
