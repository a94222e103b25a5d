//! Matching algorithms for the trial screening workflow

pub mod eligibility;

// Re-export key types
pub use eligibility::{EligibilityEvaluator, MatchOrchestrator};
