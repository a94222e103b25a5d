use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use std::sync::Arc;
use trial_match::{
    InMemoryCatalog, JsonlAuditSink, MatchConfig, MatchOrchestrator, MemoryAuditSink,
    RecordExtractor, SimulatedExtractor, TrialCatalog, demo_catalog,
};

/// Demo record matching the simulated-text input of the original screener
const DEFAULT_RECORD: &str = "
Patient ID: P-99
Age: 52
Diagnosis: Type 2 Diabetes
Biomarkers: HbA1c: 8.2, glucose: 195
Medications: Metformin
Location: Toronto
";

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Usage: trial-match [record.txt] [catalog.json] [audit.jsonl]
    let args: Vec<String> = std::env::args().collect();

    let text = match args.get(1) {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading patient record from {path}"))?,
        None => {
            info!("no record file given, using built-in demo record");
            DEFAULT_RECORD.to_string()
        }
    };

    let catalog = match args.get(2) {
        Some(path) => InMemoryCatalog::from_json_file(Path::new(path))
            .with_context(|| format!("loading trial catalog from {path}"))?,
        None => demo_catalog(),
    };

    let patient = SimulatedExtractor::new()
        .extract(&text)
        .context("patient record failed validation")?;
    info!(
        "matching patient {} against {} trials",
        patient.patient_id(),
        catalog.trials().len()
    );

    let orchestrator = match args.get(3) {
        Some(path) => {
            let sink = JsonlAuditSink::create(Path::new(path))
                .with_context(|| format!("opening audit log {path}"))?;
            MatchOrchestrator::new(MatchConfig::default(), Arc::new(sink))
        }
        None => MatchOrchestrator::new(MatchConfig::default(), Arc::new(MemoryAuditSink::new())),
    };

    let report = orchestrator.run(&patient, catalog.trials());

    println!("{}", serde_json::to_string_pretty(&report)?);

    for decision in report.decisions() {
        let marker = if decision.eligible { "ELIGIBLE" } else { "ineligible" };
        info!(
            "{} {} at {:.0}% confidence",
            decision.trial_id,
            marker,
            decision.confidence * 100.0
        );
    }

    let metrics = orchestrator.metrics().snapshot();
    info!(
        "run complete: {} evaluations, {} eligible, {} skipped, average confidence {:.2}",
        metrics.total_evaluations,
        metrics.eligible_matches,
        metrics.trials_skipped,
        metrics.average_confidence()
    );

    Ok(())
}
