//! Audit trail for trial evaluations
//!
//! Every evaluation produces exactly one [`AuditEvent`], as does every trial
//! skipped for a configuration error. Events are append-only: the engine
//! never mutates or deletes an event after emission. Sinks are narrow
//! collaborators behind the [`AuditSink`] trait so a persistent backend can
//! be substituted without touching the engine.

use crate::error::Result;
use crate::models::Decision;
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

/// One append-only record of a trial evaluation or skip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// When the event was emitted
    pub timestamp: DateTime<Utc>,
    /// Identifier of the evaluated patient
    pub patient_ref: String,
    /// Identifier of the trial
    pub trial_id: String,
    /// Short human-readable outcome summary
    pub decision_summary: String,
}

impl AuditEvent {
    /// Create an event for a completed evaluation
    #[must_use]
    pub fn evaluation(patient_ref: &str, decision: &Decision) -> Self {
        let outcome = if decision.eligible {
            "eligible"
        } else {
            "ineligible"
        };
        Self {
            timestamp: Utc::now(),
            patient_ref: patient_ref.to_string(),
            trial_id: decision.trial_id.clone(),
            decision_summary: format!(
                "{outcome} (confidence {:.2}, {}/{} criteria passed)",
                decision.confidence,
                decision.passed_count(),
                decision.criteria.len()
            ),
        }
    }

    /// Create an event for a trial skipped due to a configuration error
    #[must_use]
    pub fn skipped(patient_ref: &str, trial_id: &str, reason: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            patient_ref: patient_ref.to_string(),
            trial_id: trial_id.to_string(),
            decision_summary: format!("skipped: {reason}"),
        }
    }
}

/// Append-only sink for audit events
pub trait AuditSink: Send + Sync {
    /// Append one event to the sink
    fn append(&self, event: AuditEvent);
}

/// In-memory sink for tests and in-process inspection
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl MemoryAuditSink {
    /// Create an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events appended so far
    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Number of events appended so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Whether no events have been appended
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl AuditSink for MemoryAuditSink {
    fn append(&self, event: AuditEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Sink writing one JSON object per line to any writer
///
/// Write failures are logged rather than propagated: audit emission must
/// never abort a multi-trial run.
#[derive(Debug)]
pub struct JsonlAuditSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonlAuditSink<W> {
    /// Create a sink over an existing writer
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the sink and return the underlying writer
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap()
    }
}

impl JsonlAuditSink<BufWriter<File>> {
    /// Create a sink appending to a file, creating it if necessary
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::options().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> AuditSink for JsonlAuditSink<W> {
    fn append(&self, event: AuditEvent) {
        let mut writer = self.writer.lock().unwrap();
        if let Err(err) = write_event(&mut *writer, &event) {
            warn!(
                "failed to append audit event for trial {}: {err}",
                event.trial_id
            );
        }
    }
}

fn write_event<W: Write>(writer: &mut W, event: &AuditEvent) -> std::io::Result<()> {
    serde_json::to_writer(&mut *writer, event)?;
    writeln!(writer)?;
    writer.flush()
}
