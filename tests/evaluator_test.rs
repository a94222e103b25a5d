#[cfg(test)]
mod tests {
    use rustc_hash::{FxHashMap, FxHashSet};
    use trial_match::models::{AgeRange, BiomarkerRange, PatientRecord, TrialDefinition};
    use trial_match::EligibilityEvaluator;

    /// The reference patient from the screening scenarios
    fn diabetes_patient() -> PatientRecord {
        let mut biomarkers = FxHashMap::default();
        biomarkers.insert("HbA1c".to_string(), 8.2);
        biomarkers.insert("glucose".to_string(), 195.0);

        PatientRecord::new(
            "P-99".to_string(),
            "Type 2 Diabetes".to_string(),
            52,
            biomarkers,
            FxHashSet::default(),
            "Toronto".to_string(),
        )
        .unwrap()
    }

    fn diabetes_trial() -> TrialDefinition {
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
        }
    }

    #[test]
    fn test_full_match_is_eligible() {
        let decision = EligibilityEvaluator::new().evaluate(&diabetes_patient(), &diabetes_trial());

        assert!(decision.eligible);
        assert_eq!(decision.confidence, 1.0);
        assert_eq!(decision.criteria.len(), 6);
        assert!(decision.criteria.iter().all(|c| c.passed));
        assert!(decision.missing_criteria.is_empty());
    }

    #[test]
    fn test_criterion_order_is_stable() {
        let decision = EligibilityEvaluator::new().evaluate(&diabetes_patient(), &diabetes_trial());

        let names: Vec<&str> = decision.criteria.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["diagnosis", "age", "HbA1c", "glucose", "medication", "location"]
        );
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let patient = diabetes_patient();
        let trial = diabetes_trial();
        let evaluator = EligibilityEvaluator::new();

        let first = evaluator.evaluate(&patient, &trial);
        let second = evaluator.evaluate(&patient, &trial);
        assert_eq!(first, second);
    }

    #[test]
    fn test_age_outside_range_fails_only_age() {
        let mut trial = diabetes_trial();
        trial.age_range = AgeRange { min: 18, max: 30 };

        let decision = EligibilityEvaluator::new().evaluate(&diabetes_patient(), &trial);

        assert!(!decision.eligible);
        let failed = decision.failed_criteria();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].name, "age");
        assert!(failed[0].detail.contains("outside required range 18-30"));
        assert_eq!(decision.confidence, 5.0 / 6.0);
    }

    #[test]
    fn test_partial_credit_never_yields_eligibility() {
        // Only HbA1c declared: five criteria total, age fails
        let mut trial = diabetes_trial();
        trial.age_range = AgeRange { min: 18, max: 30 };
        trial.biomarker_ranges.pop();

        let decision = EligibilityEvaluator::new().evaluate(&diabetes_patient(), &trial);

        assert!(!decision.eligible);
        assert_eq!(decision.confidence, 0.8);
        assert_eq!(decision.passed_count(), 4);
    }

    #[test]
    fn test_location_mismatch_fails_only_location() {
        let patient = PatientRecord::new(
            "P-99".to_string(),
            "Type 2 Diabetes".to_string(),
            52,
            diabetes_patient().biomarkers().clone(),
            FxHashSet::default(),
            "Calgary".to_string(),
        )
        .unwrap();

        let decision = EligibilityEvaluator::new().evaluate(&patient, &diabetes_trial());

        assert!(!decision.eligible);
        let failed = decision.failed_criteria();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].name, "location");
        assert!(failed[0].detail.contains("Calgary"));
    }

    #[test]
    fn test_empty_location_list_means_no_restriction() {
        let mut trial = diabetes_trial();
        trial.eligible_locations.clear();

        let patient = PatientRecord::new(
            "P-99".to_string(),
            "Type 2 Diabetes".to_string(),
            52,
            diabetes_patient().biomarkers().clone(),
            FxHashSet::default(),
            "Anywhere".to_string(),
        )
        .unwrap();

        let decision = EligibilityEvaluator::new().evaluate(&patient, &trial);
        assert!(decision.eligible);
    }

    #[test]
    fn test_location_match_is_case_insensitive() {
        let patient = PatientRecord::new(
            "P-99".to_string(),
            "Type 2 Diabetes".to_string(),
            52,
            diabetes_patient().biomarkers().clone(),
            FxHashSet::default(),
            "TORONTO".to_string(),
        )
        .unwrap();

        let decision = EligibilityEvaluator::new().evaluate(&patient, &diabetes_trial());
        assert!(decision.eligible);
    }

    #[test]
    fn test_diagnosis_match_is_case_insensitive_and_exact() {
        let mut trial = diabetes_trial();
        trial.required_diagnosis = "type 2 diabetes".to_string();
        let decision = EligibilityEvaluator::new().evaluate(&diabetes_patient(), &trial);
        assert!(decision.criteria[0].passed);

        // Substrings do not match: the required diagnosis must equal the
        // recorded one, not merely appear within it
        trial.required_diagnosis = "Diabetes".to_string();
        let decision = EligibilityEvaluator::new().evaluate(&diabetes_patient(), &trial);
        assert!(!decision.criteria[0].passed);
    }

    #[test]
    fn test_missing_biomarker_fails_and_is_reported() {
        let mut trial = diabetes_trial();
        trial.biomarker_ranges.push(BiomarkerRange {
            name: "LDL".to_string(),
            min: 0.0,
            max: 130.0,
        });

        let decision = EligibilityEvaluator::new().evaluate(&diabetes_patient(), &trial);

        assert!(!decision.eligible);
        assert_eq!(decision.missing_criteria, vec!["LDL".to_string()]);
        let ldl = decision.criteria.iter().find(|c| c.name == "LDL").unwrap();
        assert!(!ldl.passed);
        assert_eq!(ldl.detail, "missing biomarker LDL");
    }

    #[test]
    fn test_biomarker_bounds_are_inclusive() {
        let mut patient_biomarkers = FxHashMap::default();
        patient_biomarkers.insert("HbA1c".to_string(), 7.5);
        patient_biomarkers.insert("glucose".to_string(), 250.0);

        let patient = PatientRecord::new(
            "P-99".to_string(),
            "Type 2 Diabetes".to_string(),
            52,
            patient_biomarkers,
            FxHashSet::default(),
            "Toronto".to_string(),
        )
        .unwrap();

        let decision = EligibilityEvaluator::new().evaluate(&patient, &diabetes_trial());
        assert!(decision.eligible);
    }

    #[test]
    fn test_excluded_medication_fails_with_detail() {
        let mut medications = FxHashSet::default();
        medications.insert("Insulin".to_string());

        let patient = PatientRecord::new(
            "P-99".to_string(),
            "Type 2 Diabetes".to_string(),
            52,
            diabetes_patient().biomarkers().clone(),
            medications,
            "Toronto".to_string(),
        )
        .unwrap();

        let mut trial = diabetes_trial();
        trial.excluded_medications = vec!["Insulin".to_string()];

        let decision = EligibilityEvaluator::new().evaluate(&patient, &trial);

        assert!(!decision.eligible);
        let failed = decision.failed_criteria();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].name, "medication");
        assert!(failed[0].detail.contains("Insulin"));
    }

    #[test]
    fn test_medication_exclusion_is_case_insensitive_and_lists_all() {
        let mut medications = FxHashSet::default();
        medications.insert("warfarin".to_string());
        medications.insert("INSULIN".to_string());
        medications.insert("Metformin".to_string());

        let patient = PatientRecord::new(
            "P-99".to_string(),
            "Type 2 Diabetes".to_string(),
            52,
            diabetes_patient().biomarkers().clone(),
            medications,
            "Toronto".to_string(),
        )
        .unwrap();

        let mut trial = diabetes_trial();
        trial.excluded_medications = vec!["Insulin".to_string(), "Warfarin".to_string()];

        let decision = EligibilityEvaluator::new().evaluate(&patient, &trial);

        let medication = decision
            .criteria
            .iter()
            .find(|c| c.name == "medication")
            .unwrap();
        assert!(!medication.passed);
        assert!(medication.detail.contains("INSULIN"));
        assert!(medication.detail.contains("warfarin"));
        assert!(!medication.detail.contains("Metformin"));
    }

    #[test]
    fn test_no_short_circuit_on_failure() {
        let patient = PatientRecord::new(
            "P-1".to_string(),
            "Asthma".to_string(),
            17,
            FxHashMap::default(),
            FxHashSet::default(),
            "Oslo".to_string(),
        )
        .unwrap();

        let decision = EligibilityEvaluator::new().evaluate(&patient, &diabetes_trial());

        // Every criterion is still recorded even though the first one failed
        assert_eq!(decision.criteria.len(), 6);
        assert_eq!(decision.passed_count(), 1); // only medication passes
        assert_eq!(decision.confidence, 1.0 / 6.0);
        assert_eq!(
            decision.missing_criteria,
            vec!["HbA1c".to_string(), "glucose".to_string()]
        );
    }

    #[test]
    fn test_trial_without_biomarkers_has_four_criteria() {
        let mut trial = diabetes_trial();
        trial.biomarker_ranges.clear();

        let decision = EligibilityEvaluator::new().evaluate(&diabetes_patient(), &trial);
        assert_eq!(decision.criteria.len(), 4);
        assert!(decision.eligible);
    }

    #[test]
    fn test_non_finite_bound_is_reported_not_swallowed() {
        // A range like this is normally rejected by validate(); reaching the
        // evaluator anyway must yield an ineligible decision with a
        // diagnostic detail, never a panic
        let mut trial = diabetes_trial();
        trial.biomarker_ranges[0].max = f64::NAN;

        let decision = EligibilityEvaluator::new().evaluate(&diabetes_patient(), &trial);

        assert!(!decision.eligible);
        let anomalous = decision.criteria.iter().find(|c| c.name == "HbA1c").unwrap();
        assert!(!anomalous.passed);
        assert!(anomalous.detail.contains("internal inconsistency"));
    }

    #[test]
    fn test_confidence_is_exact_ratio() {
        let mut trial = diabetes_trial();
        trial.required_diagnosis = "Hypertension".to_string();
        trial.age_range = AgeRange { min: 60, max: 80 };

        let decision = EligibilityEvaluator::new().evaluate(&diabetes_patient(), &trial);

        let passed = decision.passed_count();
        assert_eq!(
            decision.confidence,
            passed as f64 / decision.criteria.len() as f64
        );
    }
}
