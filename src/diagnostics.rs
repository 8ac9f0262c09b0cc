//! Non-fatal session failures and where they are reported.
//!
//! ERROR HANDLING
//! ==============
//! Session operations always succeed from the caller's point of view. Anything
//! that goes wrong in the durable layer becomes a [`SessionDiagnostic`] handed
//! to an injected [`DiagnosticSink`]. Production wires [`LogSink`]; tests wire
//! [`RecordingSink`] and assert on what was reported.

#[cfg(test)]
#[path = "diagnostics_test.rs"]
mod diagnostics_test;

use std::cell::RefCell;

use crate::storage::StorageError;

/// A durable-layer failure that was absorbed by the session store.
#[derive(Debug, thiserror::Error)]
pub enum SessionDiagnostic {
    /// No durable backend exists in this execution context.
    #[error("durable storage unavailable; {op} kept in memory only")]
    BackendUnavailable { op: &'static str },
    /// Exactly one of the two session keys was found during restore.
    #[error("stored session is incomplete: missing `{missing}`")]
    PartialDurableState { missing: String },
    /// The user could not be encoded for storage, or the stored text is not
    /// a valid user object.
    #[error("failed to {op} stored user: {source}")]
    Codec {
        op: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// The backend refused a read, write, or removal.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SessionDiagnostic {
    /// Whether this diagnostic reflects an expected environment condition
    /// rather than a fault.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::BackendUnavailable { .. })
    }
}

/// Receives diagnostics from a session store.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: SessionDiagnostic);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: SessionDiagnostic) {
        if diagnostic.is_benign() {
            log::debug!("session: {diagnostic}");
        } else {
            log::warn!("session: {diagnostic}");
        }
    }
}

/// Keeps every reported diagnostic for later inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    reports: RefCell<Vec<SessionDiagnostic>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of diagnostics reported so far.
    pub fn len(&self) -> usize {
        self.reports.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.borrow().is_empty()
    }

    /// Rendered messages of every report, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.reports.borrow().iter().map(ToString::to_string).collect()
    }

    /// Drain all reports, leaving the sink empty.
    pub fn take(&self) -> Vec<SessionDiagnostic> {
        self.reports.take()
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: SessionDiagnostic) {
        self.reports.borrow_mut().push(diagnostic);
    }
}
