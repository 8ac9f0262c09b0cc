//! # session
//!
//! Client-side authentication session for the book-sharing frontend.
//!
//! Holds the current user and bearer credential in memory and mirrors them
//! into browser `localStorage` so a page reload does not force a new login.
//! Persistence is best-effort: every operation succeeds in memory even when
//! storage is missing or rejects a write.
//!
//! `state` owns the session store, `storage` abstracts the durable backend,
//! `diagnostics` carries non-fatal failures, and `util` holds the Leptos and
//! browser glue.

pub mod diagnostics;
pub mod net;
pub mod state;
pub mod storage;
pub mod util;

pub use diagnostics::{DiagnosticSink, LogSink, RecordingSink, SessionDiagnostic};
pub use net::types::User;
pub use state::session::{Session, SessionState, SessionStore, SubscriptionGuard, SubscriptionId};
pub use storage::{DurableBackend, StorageError, StorageKeys};
