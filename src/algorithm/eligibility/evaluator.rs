//! Per-trial eligibility evaluation
//!
//! The evaluator is a pure function of its inputs: no shared state, no IO,
//! safe to invoke concurrently for different (patient, trial) pairs. It
//! always checks every criterion rather than short-circuiting on the first
//! failure; the full reasoning trail is the product's core value.

use crate::models::{BiomarkerRange, Criterion, Decision, PatientRecord, TrialDefinition};
use itertools::Itertools;
use log::error;
use rustc_hash::FxHashSet;

/// Decides one patient's eligibility for one trial, explainably and
/// reproducibly
///
/// Criteria are evaluated in fixed order: diagnosis, age, one criterion per
/// declared biomarker (in the trial's declared order), medication exclusion,
/// location. Evaluating the same pair twice yields identical decisions.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityEvaluator;

impl EligibilityEvaluator {
    /// Create a new evaluator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluate one patient against one trial
    ///
    /// Never fails for well-formed inputs; returns a decision even when
    /// every criterion fails. Eligibility requires every criterion to pass.
    #[must_use]
    pub fn evaluate(&self, patient: &PatientRecord, trial: &TrialDefinition) -> Decision {
        let mut criteria = Vec::with_capacity(4 + trial.biomarker_ranges.len());
        let mut missing_criteria = Vec::new();

        criteria.push(Self::check_diagnosis(patient, trial));
        criteria.push(Self::check_age(patient, trial));
        for range in &trial.biomarker_ranges {
            criteria.push(Self::check_biomarker(patient, trial, range, &mut missing_criteria));
        }
        criteria.push(Self::check_medications(patient, trial));
        criteria.push(Self::check_location(patient, trial));

        Decision::from_criteria(trial.trial_id.clone(), criteria, missing_criteria)
    }

    fn check_diagnosis(patient: &PatientRecord, trial: &TrialDefinition) -> Criterion {
        if patient.diagnosis().to_lowercase() == trial.required_diagnosis.to_lowercase() {
            Criterion::passed(
                "diagnosis",
                format!(
                    "diagnosis '{}' matches required '{}'",
                    patient.diagnosis(),
                    trial.required_diagnosis
                ),
            )
        } else {
            Criterion::failed(
                "diagnosis",
                format!(
                    "diagnosis '{}' does not match required '{}'",
                    patient.diagnosis(),
                    trial.required_diagnosis
                ),
            )
        }
    }

    fn check_age(patient: &PatientRecord, trial: &TrialDefinition) -> Criterion {
        let age = patient.age();
        let range = trial.age_range;
        if range.contains(age) {
            Criterion::passed(
                "age",
                format!("age {age} within required range {}-{}", range.min, range.max),
            )
        } else {
            Criterion::failed(
                "age",
                format!("age {age} outside required range {}-{}", range.min, range.max),
            )
        }
    }

    fn check_biomarker(
        patient: &PatientRecord,
        trial: &TrialDefinition,
        range: &BiomarkerRange,
        missing_criteria: &mut Vec<String>,
    ) -> Criterion {
        if !(range.min.is_finite() && range.max.is_finite()) {
            error!(
                "trial {}: biomarker {} reached evaluation with non-finite bounds {}-{}",
                trial.trial_id, range.name, range.min, range.max
            );
            return Criterion::failed(
                range.name.clone(),
                format!(
                    "internal inconsistency: biomarker {} has non-numeric bounds",
                    range.name
                ),
            );
        }

        match patient.biomarkers().get(&range.name) {
            None => {
                missing_criteria.push(range.name.clone());
                Criterion::failed(range.name.clone(), format!("missing biomarker {}", range.name))
            }
            Some(&value) if !value.is_finite() => {
                error!(
                    "patient {}: biomarker {} reached evaluation with non-finite value",
                    patient.patient_id(),
                    range.name
                );
                Criterion::failed(
                    range.name.clone(),
                    format!(
                        "internal inconsistency: biomarker {} value is not a finite number",
                        range.name
                    ),
                )
            }
            Some(&value) if range.contains(value) => Criterion::passed(
                range.name.clone(),
                format!(
                    "{} {value} within required range {}-{}",
                    range.name, range.min, range.max
                ),
            ),
            Some(&value) => Criterion::failed(
                range.name.clone(),
                format!(
                    "{} {value} outside required range {}-{}",
                    range.name, range.min, range.max
                ),
            ),
        }
    }

    fn check_medications(patient: &PatientRecord, trial: &TrialDefinition) -> Criterion {
        let excluded: FxHashSet<String> = trial
            .excluded_medications
            .iter()
            .map(|m| m.to_lowercase())
            .collect();

        // Sorted so repeated evaluations produce identical details
        let offending = patient
            .medications()
            .iter()
            .filter(|m| excluded.contains(&m.to_lowercase()))
            .map(String::as_str)
            .sorted_unstable()
            .collect::<Vec<_>>();

        if offending.is_empty() {
            Criterion::passed("medication", "no excluded medications in use")
        } else {
            Criterion::failed(
                "medication",
                format!("taking excluded medication(s): {}", offending.iter().join(", ")),
            )
        }
    }

    fn check_location(patient: &PatientRecord, trial: &TrialDefinition) -> Criterion {
        if trial.eligible_locations.is_empty() {
            return Criterion::passed("location", "trial has no location restriction");
        }

        let location = patient.location().to_lowercase();
        if trial
            .eligible_locations
            .iter()
            .any(|site| site.to_lowercase() == location)
        {
            Criterion::passed(
                "location",
                format!("location '{}' is an eligible trial site", patient.location()),
            )
        } else {
            Criterion::failed(
                "location",
                format!(
                    "location '{}' not among eligible sites: {}",
                    patient.location(),
                    trial.eligible_locations.iter().join(", ")
                ),
            )
        }
    }
}
