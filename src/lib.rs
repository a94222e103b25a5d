//! A Rust library for matching validated patient records against clinical
//! trial eligibility definitions, producing an explainable decision,
//! confidence score, and itemized reasoning trail per trial.

pub mod algorithm;
pub mod audit;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extraction;
pub mod metrics;
pub mod models;

// Re-export the most common types for easier use
// Core types
pub use algorithm::eligibility::{EligibilityEvaluator, MatchOrchestrator};
pub use config::{MatchConfig, MatchConfigBuilder};
pub use error::{Result, TrialMatchError};
pub use models::{
    AgeRange, BiomarkerRange, Criterion, Decision, MatchReport, PatientRecord, TrialDefinition,
};

// Collaborator interfaces
pub use audit::{AuditEvent, AuditSink, JsonlAuditSink, MemoryAuditSink};
pub use catalog::{InMemoryCatalog, TrialCatalog, demo_catalog};
pub use extraction::{RecordExtractor, SimulatedExtractor};
pub use metrics::{MetricsSnapshot, MetricsStore, RunDelta};
