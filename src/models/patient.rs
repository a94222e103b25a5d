//! Validated patient record model
//!
//! A [`PatientRecord`] is produced once by the upstream extraction
//! collaborator and is immutable afterwards. Every invariant is enforced at
//! construction; no field can be read before the checks have run.

use crate::error::{Result, TrialMatchError};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

/// Upper bound on plausible patient age, inclusive
pub const MAX_AGE: i32 = 120;

/// Structured representation of one patient, validated at construction
#[derive(Debug, Clone, Serialize)]
pub struct PatientRecord {
    patient_id: String,
    diagnosis: String,
    age: i32,
    biomarkers: FxHashMap<String, f64>,
    medications: FxHashSet<String>,
    location: String,
}

impl PatientRecord {
    /// Create a validated patient record
    ///
    /// # Arguments
    ///
    /// * `patient_id` - Identifier assigned by the upstream system (non-empty)
    /// * `diagnosis` - Primary diagnosis text (non-empty)
    /// * `age` - Age in years, within `0..=120`; out-of-range values are
    ///   rejected, never clamped
    /// * `biomarkers` - Measured biomarker values (finite numbers)
    /// * `medications` - Current medications, compared case-insensitively
    /// * `location` - Patient location used for site matching
    ///
    /// # Returns
    ///
    /// The record, or a `RecordValidation` error naming the violated invariant
    pub fn new(
        patient_id: String,
        diagnosis: String,
        age: i32,
        biomarkers: FxHashMap<String, f64>,
        medications: FxHashSet<String>,
        location: String,
    ) -> Result<Self> {
        if patient_id.trim().is_empty() {
            return Err(TrialMatchError::RecordValidation(
                "patient id must not be empty".to_string(),
            ));
        }

        if diagnosis.trim().is_empty() {
            return Err(TrialMatchError::RecordValidation(
                "diagnosis must not be empty".to_string(),
            ));
        }

        if !(0..=MAX_AGE).contains(&age) {
            return Err(TrialMatchError::RecordValidation(format!(
                "invalid age {age}: must be between 0 and {MAX_AGE}"
            )));
        }

        for (name, value) in &biomarkers {
            if !value.is_finite() {
                return Err(TrialMatchError::RecordValidation(format!(
                    "biomarker {name} has non-finite value {value}"
                )));
            }
        }

        Ok(Self {
            patient_id,
            diagnosis,
            age,
            biomarkers,
            medications,
            location,
        })
    }

    /// Identifier assigned by the upstream system
    #[must_use]
    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    /// Primary diagnosis text
    #[must_use]
    pub fn diagnosis(&self) -> &str {
        &self.diagnosis
    }

    /// Age in years
    #[must_use]
    pub const fn age(&self) -> i32 {
        self.age
    }

    /// Measured biomarker values by name
    #[must_use]
    pub const fn biomarkers(&self) -> &FxHashMap<String, f64> {
        &self.biomarkers
    }

    /// Current medications
    #[must_use]
    pub const fn medications(&self) -> &FxHashSet<String> {
        &self.medications
    }

    /// Patient location used for site matching
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }
}
