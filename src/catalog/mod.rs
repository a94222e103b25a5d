//! Trial catalog collaborators
//!
//! The engine treats the catalog as a read-only, caller-ordered sequence of
//! trial definitions. The order supplied here is preserved in the match
//! report so presentation stays stable across runs.

use crate::error::Result;
use crate::models::{AgeRange, BiomarkerRange, TrialDefinition};
use log::{info, warn};
use rustc_hash::FxHashSet;
use std::fs;
use std::path::Path;

/// Read-only source of trial definitions
pub trait TrialCatalog {
    /// Trials in caller-defined order
    fn trials(&self) -> &[TrialDefinition];
}

/// Catalog backed by an in-memory vector
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    trials: Vec<TrialDefinition>,
}

impl InMemoryCatalog {
    /// Create a catalog from trial definitions, preserving their order
    ///
    /// Duplicate trial ids are reported but kept; uniqueness is a catalog
    /// contract, not an engine invariant.
    #[must_use]
    pub fn new(trials: Vec<TrialDefinition>) -> Self {
        let mut seen = FxHashSet::default();
        for trial in &trials {
            if !seen.insert(trial.trial_id.as_str()) {
                warn!("catalog contains duplicate trial id {}", trial.trial_id);
            }
        }
        Self { trials }
    }

    /// Parse a catalog from a JSON array of trial definitions
    pub fn from_json_str(json: &str) -> Result<Self> {
        let trials: Vec<TrialDefinition> = serde_json::from_str(json)?;
        Ok(Self::new(trials))
    }

    /// Load a catalog from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        info!(
            "Loaded {} trial definitions from {}",
            catalog.trials.len(),
            path.display()
        );
        Ok(catalog)
    }
}

impl TrialCatalog for InMemoryCatalog {
    fn trials(&self) -> &[TrialDefinition] {
        &self.trials
    }
}

/// Built-in demonstration catalog
///
/// Mirrors the trials a deployment would load from its trial registry; used
/// by the CLI when no catalog file is supplied.
#[must_use]
pub fn demo_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(vec![
        TrialDefinition {
            trial_id: "NCT001".to_string(),
            title: "Diabetes Phase 3".to_string(),
            phase: "Phase 3".to_string(),
            required_diagnosis: "Diabetes".to_string(),
            age_range: AgeRange { min: 18, max: 75 },
            biomarker_ranges: Vec::new(),
            excluded_medications: vec!["Insulin".to_string()],
            eligible_locations: vec!["Toronto".to_string(), "Montreal".to_string()],
        },
        TrialDefinition {
            trial_id: "NCT002".to_string(),
            title: "Hypertension Study".to_string(),
            phase: "Phase 2".to_string(),
            required_diagnosis: "Hypertension".to_string(),
            age_range: AgeRange { min: 40, max: 80 },
            biomarker_ranges: Vec::new(),
            excluded_medications: Vec::new(),
            eligible_locations: vec!["Vancouver".to_string()],
        },
        TrialDefinition {
            trial_id: "NCT003".to_string(),
            title: "Type 2 Diabetes Biomarker Substudy".to_string(),
            phase: "Phase 2".to_string(),
            required_diagnosis: "Type 2 Diabetes".to_string(),
            age_range: AgeRange { min: 45, max: 80 },
            biomarker_ranges: vec![
                BiomarkerRange {
                    name: "HbA1c".to_string(),
                    min: 7.5,
                    max: 11.0,
                },
                BiomarkerRange {
                    name: "glucose".to_string(),
                    min: 140.0,
                    max: 250.0,
                },
            ],
            excluded_medications: Vec::new(),
            eligible_locations: vec!["Toronto".to_string()],
        },
    ])
}
