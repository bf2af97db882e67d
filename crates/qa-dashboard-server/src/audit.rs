// crates/qa-dashboard-server/src/audit.rs
// ============================================================================
// Module: Audit Logging
// Description: Structured audit events for call-boundary handling.
// Purpose: Emit JSON-line audit records without a logging framework.
// Dependencies: serde, serde_json, sha2
// ============================================================================

//! ## Overview
//! Audit events are serialized as one JSON object per line. Sinks only decide
//! where the line goes; serialization is shared. Raw bearer tokens never
//! appear in events, only their SHA-256 fingerprints.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;
use sha2::Digest;
use sha2::Sha256;

// ============================================================================
// SECTION: Event Types
// ============================================================================

/// One invocation at the call boundary.
#[derive(Debug, Clone, Serialize)]
pub struct OperationAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// RFC 3339 timestamp.
    pub timestamp: String,
    /// Operation wire name.
    pub operation: String,
    /// Caller account, when the envelope decoded.
    pub account_id: Option<String>,
    /// `ok` or `error`.
    pub outcome: &'static str,
    /// Normalized error code on failure.
    pub error_code: Option<&'static str>,
    /// HTTP status returned.
    pub status: u16,
    /// Handling time in milliseconds.
    pub duration_ms: u128,
    /// Host bearer token fingerprint (sha256).
    pub token_fingerprint: Option<String>,
}

/// Access gate decision.
#[derive(Debug, Clone, Serialize)]
pub struct AccessAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// RFC 3339 timestamp.
    pub timestamp: String,
    /// Caller account.
    pub account_id: String,
    /// Project key from the caller context.
    pub project_key: Option<String>,
    /// Gate path: `role` or `group`.
    pub path: &'static str,
    /// Decision label.
    pub decision: &'static str,
    /// Failure or denial detail.
    pub reason: Option<String>,
}

/// Internal failure recorded before normalization.
#[derive(Debug, Clone, Serialize)]
pub struct FailureAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// RFC 3339 timestamp.
    pub timestamp: String,
    /// Operation wire name.
    pub operation: &'static str,
    /// Caller account.
    pub account_id: String,
    /// Project key from the caller context.
    pub project_key: Option<String>,
    /// Full internal error.
    pub error: String,
}

/// Server lifecycle notice.
#[derive(Debug, Clone, Serialize)]
pub struct LifecycleAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// RFC 3339 timestamp.
    pub timestamp: String,
    /// Notice text.
    pub message: String,
}

// ============================================================================
// SECTION: Sink Trait
// ============================================================================

/// Audit sink for call-boundary events.
pub trait AuditSink: Send + Sync {
    /// Writes one serialized event line.
    fn write_line(&self, line: &str);

    /// Records an invocation event.
    fn record_operation(&self, event: &OperationAuditEvent) {
        emit(self, event);
    }

    /// Records an access decision.
    fn record_access(&self, event: &AccessAuditEvent) {
        emit(self, event);
    }

    /// Records an internal failure.
    fn record_failure(&self, event: &FailureAuditEvent) {
        emit(self, event);
    }

    /// Records a lifecycle notice.
    fn record_lifecycle(&self, event: &LifecycleAuditEvent) {
        emit(self, event);
    }
}

/// Serializes `event` and hands it to the sink.
fn emit<S: AuditSink + ?Sized, E: Serialize>(sink: &S, event: &E) {
    if let Ok(payload) = serde_json::to_string(event) {
        sink.write_line(&payload);
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn write_line(&self, line: &str) {
        let _ = writeln!(io::stderr(), "{line}");
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn write_line(&self, line: &str) {
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{line}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn write_line(&self, _line: &str) {}
}

/// Audit sink that keeps events in memory for inspection.
#[derive(Default)]
pub struct MemoryAuditSink {
    /// Recorded events.
    events: Mutex<Vec<Value>>,
}

impl MemoryAuditSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded event.
    #[must_use]
    pub fn events(&self) -> Vec<Value> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Returns recorded events whose `event` field equals `name`.
    #[must_use]
    pub fn events_named(&self, name: &str) -> Vec<Value> {
        self.events().into_iter().filter(|event| event["event"] == name).collect()
    }
}

impl AuditSink for MemoryAuditSink {
    fn write_line(&self, line: &str) {
        if let Ok(value) = serde_json::from_str(line)
            && let Ok(mut events) = self.events.lock()
        {
            events.push(value);
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the lowercase hex SHA-256 fingerprint of a token.
#[must_use]
pub fn token_fingerprint(token: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let digest = Sha256::digest(token.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push(char::from(HEX[usize::from(byte >> 4)]));
        out.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================
