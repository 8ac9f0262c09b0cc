use super::*;

fn parse_error() -> serde_json::Error {
    serde_json::from_str::<serde_json::Value>("{not json").unwrap_err()
}

fn decode_failure() -> SessionDiagnostic {
    SessionDiagnostic::Codec { op: "decode", source: parse_error() }
}

// =============================================================
// SessionDiagnostic
// =============================================================

#[test]
fn backend_unavailable_is_benign() {
    assert!(SessionDiagnostic::BackendUnavailable { op: "commit" }.is_benign());
}

#[test]
fn faults_are_not_benign() {
    assert!(!decode_failure().is_benign());
    assert!(!SessionDiagnostic::PartialDurableState { missing: "user".to_owned() }.is_benign());
    assert!(!SessionDiagnostic::Storage(StorageError::Unavailable).is_benign());
}

#[test]
fn messages_name_the_failure() {
    assert_eq!(
        SessionDiagnostic::BackendUnavailable { op: "restore" }.to_string(),
        "durable storage unavailable; restore kept in memory only"
    );
    assert_eq!(
        SessionDiagnostic::PartialDurableState { missing: "access_token".to_owned() }.to_string(),
        "stored session is incomplete: missing `access_token`"
    );
    assert!(decode_failure().to_string().starts_with("failed to decode stored user: "));
}

#[test]
fn storage_error_converts_transparently() {
    let diag: SessionDiagnostic = StorageError::Unavailable.into();
    assert_eq!(diag.to_string(), "durable storage is unavailable");
}

// =============================================================
// Sinks
// =============================================================

#[test]
fn recording_sink_keeps_reports_in_order() {
    let sink = RecordingSink::new();
    assert!(sink.is_empty());
    sink.report(SessionDiagnostic::BackendUnavailable { op: "commit" });
    sink.report(decode_failure());
    assert_eq!(sink.len(), 2);
    let taken = sink.take();
    assert!(matches!(taken[0], SessionDiagnostic::BackendUnavailable { op: "commit" }));
    assert!(matches!(taken[1], SessionDiagnostic::Codec { op: "decode", .. }));
    assert!(sink.is_empty());
}

#[test]
fn log_sink_accepts_every_variant() {
    let sink = LogSink;
    sink.report(SessionDiagnostic::BackendUnavailable { op: "clear" });
    sink.report(SessionDiagnostic::Codec { op: "encode", source: parse_error() });
    sink.report(SessionDiagnostic::Storage(StorageError::Unavailable));
}
