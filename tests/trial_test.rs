#[cfg(test)]
mod tests {
    use trial_match::TrialMatchError;
    use trial_match::models::trial::*;

    fn base_trial() -> TrialDefinition {
        TrialDefinition {
            trial_id: "NCT100".to_string(),
            title: "Asthma Study".to_string(),
            phase: "Phase 2".to_string(),
            required_diagnosis: "Asthma".to_string(),
            age_range: AgeRange { min: 18, max: 65 },
            biomarker_ranges: vec![BiomarkerRange {
                name: "FEV1".to_string(),
                min: 1.0,
                max: 4.0,
            }],
            excluded_medications: vec!["Prednisone".to_string()],
            eligible_locations: vec!["Toronto".to_string()],
        }
    }

    #[test]
    fn test_valid_definition() {
        assert!(base_trial().validate().is_ok());
    }

    #[test]
    fn test_inverted_age_range_rejected() {
        let mut trial = base_trial();
        trial.age_range = AgeRange { min: 80, max: 18 };

        let err = trial.validate().unwrap_err();
        assert!(matches!(err, TrialMatchError::TrialConfiguration(_)));
        assert!(err.to_string().contains("age range"));
    }

    #[test]
    fn test_inverted_biomarker_range_rejected() {
        let mut trial = base_trial();
        trial.biomarker_ranges[0].min = 5.0;

        let err = trial.validate().unwrap_err();
        assert!(err.to_string().contains("FEV1"));
    }

    #[test]
    fn test_non_finite_biomarker_bound_rejected() {
        let mut trial = base_trial();
        trial.biomarker_ranges[0].max = f64::NAN;

        let err = trial.validate().unwrap_err();
        assert!(err.to_string().contains("non-finite"));
    }

    #[test]
    fn test_duplicate_biomarker_rejected() {
        let mut trial = base_trial();
        trial.biomarker_ranges.push(BiomarkerRange {
            name: "FEV1".to_string(),
            min: 0.5,
            max: 2.0,
        });

        let err = trial.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_empty_trial_id_rejected() {
        let mut trial = base_trial();
        trial.trial_id = String::new();
        assert!(trial.validate().is_err());
    }

    #[test]
    fn test_empty_required_diagnosis_rejected() {
        let mut trial = base_trial();
        trial.required_diagnosis = String::new();
        assert!(trial.validate().is_err());
    }

    #[test]
    fn test_age_range_contains_is_inclusive() {
        let range = AgeRange { min: 45, max: 80 };
        assert!(range.contains(45));
        assert!(range.contains(80));
        assert!(!range.contains(44));
        assert!(!range.contains(81));
    }

    #[test]
    fn test_biomarker_range_contains_is_inclusive() {
        let range = BiomarkerRange {
            name: "HbA1c".to_string(),
            min: 7.5,
            max: 11.0,
        };
        assert!(range.contains(7.5));
        assert!(range.contains(11.0));
        assert!(!range.contains(7.4));
        assert!(!range.contains(11.1));
    }
}
