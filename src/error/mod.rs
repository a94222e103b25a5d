//! Error handling for the trial matching engine.
//!
//! The variants mirror the engine's error taxonomy: patient-record validation
//! failures are fatal to a single request, trial configuration errors are
//! recovered locally by the orchestrator, and evaluation anomalies are
//! reported without aborting a run.

/// Specialized error type for trial matching operations
#[derive(Debug, thiserror::Error)]
pub enum TrialMatchError {
    /// A patient record violated an invariant at construction
    #[error("record validation error: {0}")]
    RecordValidation(String),

    /// A trial definition violated its own invariants
    #[error("trial configuration error: {0}")]
    TrialConfiguration(String),

    /// Unexpected internal inconsistency reaching the evaluator
    #[error("evaluation anomaly: {0}")]
    EvaluationAnomaly(String),

    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing or writing JSON data
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for trial matching operations
pub type Result<T> = std::result::Result<T, TrialMatchError>;
