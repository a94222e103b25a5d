//! Record extraction collaborators
//!
//! Extraction is an external concern: the engine only depends on the
//! [`RecordExtractor`] contract, "given raw text, return a validated
//! [`PatientRecord`] or a validation error". The [`SimulatedExtractor`] is a
//! deterministic stand-in for a future language-model parsing backend and
//! reads the line-oriented `Field: value` record format used in demos.

use crate::error::{Result, TrialMatchError};
use crate::models::PatientRecord;
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

/// Producer of validated patient records from raw text
pub trait RecordExtractor {
    /// Extract one patient record from raw medical-record text
    fn extract(&self, text: &str) -> Result<PatientRecord>;
}

/// Deterministic extractor for line-oriented `Field: value` records
///
/// Recognized fields: `Patient ID`, `Age`, `Diagnosis`, `Biomarkers`
/// (comma-separated `name: value` pairs), `Medications` (comma-separated),
/// `Location`. Field names are case-insensitive; unrecognized lines are
/// ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedExtractor;

impl SimulatedExtractor {
    /// Create a new extractor
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn parse_biomarkers(value: &str) -> Result<FxHashMap<String, f64>> {
        let mut biomarkers = FxHashMap::default();
        for entry in value.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let Some((name, raw)) = entry.split_once(':') else {
                return Err(TrialMatchError::RecordValidation(format!(
                    "malformed biomarker entry '{entry}': expected 'name: value'"
                )));
            };
            let parsed = raw.trim().parse::<f64>().map_err(|_| {
                TrialMatchError::RecordValidation(format!(
                    "biomarker {} value '{}' is not numeric",
                    name.trim(),
                    raw.trim()
                ))
            })?;
            biomarkers.insert(name.trim().to_string(), parsed);
        }
        Ok(biomarkers)
    }

    fn parse_medications(value: &str) -> FxHashSet<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    fn require(field: Option<String>, name: &str) -> Result<String> {
        field.ok_or_else(|| {
            TrialMatchError::RecordValidation(format!("missing record field: {name}"))
        })
    }
}

impl RecordExtractor for SimulatedExtractor {
    fn extract(&self, text: &str) -> Result<PatientRecord> {
        let mut patient_id = None;
        let mut age = None;
        let mut diagnosis = None;
        let mut location = None;
        let mut biomarkers = FxHashMap::default();
        let mut medications = FxHashSet::default();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match key.trim().to_lowercase().as_str() {
                "patient id" => patient_id = Some(value.to_string()),
                "age" => {
                    let parsed = value.parse::<i32>().map_err(|_| {
                        TrialMatchError::RecordValidation(format!(
                            "age '{value}' is not an integer"
                        ))
                    })?;
                    age = Some(parsed);
                }
                "diagnosis" => diagnosis = Some(value.to_string()),
                "biomarkers" => biomarkers = Self::parse_biomarkers(value)?,
                "medications" => medications = Self::parse_medications(value),
                "location" => location = Some(value.to_string()),
                other => debug!("ignoring unrecognized record field '{other}'"),
            }
        }

        let patient_id = Self::require(patient_id, "Patient ID")?;
        let diagnosis = Self::require(diagnosis, "Diagnosis")?;
        let location = Self::require(location, "Location")?;
        let age = age.ok_or_else(|| {
            TrialMatchError::RecordValidation("missing record field: Age".to_string())
        })?;

        PatientRecord::new(patient_id, diagnosis, age, biomarkers, medications, location)
    }
}
