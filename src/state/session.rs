//! Authenticated session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login flow calls [`SessionStore::commit`] after the API returns a user
//! and access token, logout calls [`SessionStore::clear`], and the app root
//! calls [`SessionStore::restore`] once at startup. Route guards and
//! user-aware components read [`SessionStore::snapshot`] or subscribe.
//!
//! DESIGN
//! ======
//! The in-memory state is authoritative; the durable backend is a mirror.
//! Durable I/O always happens before the in-memory swap, and subscribers run
//! after both, so a subscriber never sees a session whose persistence has not
//! yet been attempted.
//!
//! ERROR HANDLING
//! ==============
//! No operation returns an error. Durable failures go to the injected
//! [`DiagnosticSink`]; a corrupt or half-written stored session restores as
//! logged out.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::diagnostics::{DiagnosticSink, LogSink, SessionDiagnostic};
use crate::net::types::User;
use crate::storage::local::LocalStorageBackend;
use crate::storage::{DurableBackend, StorageKeys};

// =============================================================================
// SNAPSHOT
// =============================================================================

/// A user paired with the bearer credential that authenticates them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub credential: String,
}

/// Point-in-time view of the session.
///
/// Either empty or holding a full [`Session`]; there is no state with a user
/// but no credential, or the reverse.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    session: Option<Session>,
}

impl SessionState {
    /// The logged-out state.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn authenticated(user: User, credential: impl Into<String>) -> Self {
        Self { session: Some(Session { user, credential: credential.into() }) }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn credential(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.credential.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// `Authorization` header value for API requests, if logged in.
    pub fn authorization_header(&self) -> Option<String> {
        self.credential().map(|c| format!("Bearer {c}"))
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// `Send + Sync` switch that detaches one subscription.
///
/// Reactive cleanup hooks require `Send + Sync` closures while the store is
/// `Rc`-based; a released guard is pruned on the store's next access.
#[derive(Clone, Debug)]
pub struct SubscriptionGuard {
    alive: Arc<AtomicBool>,
}

impl SubscriptionGuard {
    pub fn release(&self) {
        self.alive.store(false, Ordering::Relaxed);
    }

    pub fn is_released(&self) -> bool {
        !self.alive.load(Ordering::Relaxed)
    }
}

type Subscriber = Rc<dyn Fn(&SessionState)>;

struct Subscription {
    id: SubscriptionId,
    alive: Arc<AtomicBool>,
    callback: Subscriber,
}

impl Subscription {
    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }
}

struct Inner {
    state: RefCell<SessionState>,
    subscribers: RefCell<Vec<Subscription>>,
    next_subscription: Cell<u64>,
    backend: Option<Box<dyn DurableBackend>>,
    keys: StorageKeys,
    sink: Rc<dyn DiagnosticSink>,
}

/// Session state mirrored into a durable backend.
///
/// Cloning yields another handle to the same store. The host builds exactly
/// one at startup and hands clones to whatever needs it.
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<Inner>,
}

impl SessionStore {
    /// Create an empty store over `backend` with default keys and [`LogSink`].
    ///
    /// `None` means this execution context has no durable storage; the store
    /// then works in memory only.
    #[must_use]
    pub fn new(backend: Option<Box<dyn DurableBackend>>) -> Self {
        Self::with_config(backend, StorageKeys::default(), Rc::new(LogSink))
    }

    /// Create an empty store with explicit keys and diagnostic sink.
    #[must_use]
    pub fn with_config(
        backend: Option<Box<dyn DurableBackend>>,
        keys: StorageKeys,
        sink: Rc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(SessionState::default()),
                subscribers: RefCell::new(Vec::new()),
                next_subscription: Cell::new(0),
                backend,
                keys,
                sink,
            }),
        }
    }

    /// Create a store over the browser's `localStorage`, if there is one.
    #[must_use]
    pub fn browser() -> Self {
        let backend = LocalStorageBackend::detect().map(|b| Box::new(b) as Box<dyn DurableBackend>);
        Self::new(backend)
    }

    /// Whether a durable backend was supplied.
    pub fn has_backend(&self) -> bool {
        self.inner.backend.is_some()
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.inner.keys
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Record a freshly authenticated session.
    ///
    /// Persists `user` (as JSON) and `credential` first, then replaces the
    /// in-memory state and notifies subscribers. Any existing session is
    /// overwritten. Persistence failures are reported, never returned.
    pub fn commit(&self, user: User, credential: impl Into<String>) {
        let credential = credential.into();
        self.persist(&user, &credential);
        log::debug!("session: committed user {}", user.id);
        self.replace(SessionState::authenticated(user, credential));
    }

    /// Log out: drop both durable keys, then empty the in-memory state.
    pub fn clear(&self) {
        match self.inner.backend.as_deref() {
            Some(backend) => self.remove_keys(backend),
            None => self.report(SessionDiagnostic::BackendUnavailable { op: "clear" }),
        }
        log::debug!("session: cleared");
        self.replace(SessionState::empty());
    }

    /// Adopt a previously persisted session, if a complete one exists.
    ///
    /// Leaves the in-memory state untouched when storage is absent, either
    /// key is missing or empty, or the stored user does not parse.
    pub fn restore(&self) {
        let Some(backend) = self.inner.backend.as_deref() else {
            self.report(SessionDiagnostic::BackendUnavailable { op: "restore" });
            return;
        };
        let keys = &self.inner.keys;

        let stored_user = self.read(backend, &keys.user);
        let stored_credential = self.read(backend, &keys.credential);
        let (raw_user, credential) = match (stored_user, stored_credential) {
            (Some(raw_user), Some(credential)) => (raw_user, credential),
            (Some(_), None) => {
                self.report(SessionDiagnostic::PartialDurableState { missing: keys.credential.clone() });
                return;
            }
            (None, Some(_)) => {
                self.report(SessionDiagnostic::PartialDurableState { missing: keys.user.clone() });
                return;
            }
            (None, None) => return,
        };

        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => {
                log::debug!("session: restored user {}", user.id);
                self.replace(SessionState::authenticated(user, credential));
            }
            Err(source) => self.report(SessionDiagnostic::Codec { op: "decode", source }),
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Current session state.
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    pub fn user(&self) -> Option<User> {
        self.inner.state.borrow().user().cloned()
    }

    pub fn credential(&self) -> Option<String> {
        self.inner.state.borrow().credential().map(str::to_owned)
    }

    // -------------------------------------------------------------------------
    // Subscriptions
    // -------------------------------------------------------------------------

    /// Call `f` with the new snapshot after every `commit`, `clear`, and
    /// successful `restore`. Subscribers run synchronously in registration
    /// order before the operation returns.
    pub fn subscribe(&self, f: impl Fn(&SessionState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.get());
        self.inner.next_subscription.set(id.0 + 1);
        let subscription = Subscription { id, alive: Arc::new(AtomicBool::new(true)), callback: Rc::new(f) };
        self.inner.subscribers.borrow_mut().push(subscription);
        id
    }

    /// Remove a subscriber. Returns `false` if `id` was not registered or
    /// its guard was already released.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.prune_released();
        let mut subscribers = self.inner.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        subscribers.len() != before
    }

    /// Guard that detaches `id` when released, usable from `Send + Sync`
    /// contexts such as reactive cleanup hooks.
    pub fn guard(&self, id: SubscriptionId) -> Option<SubscriptionGuard> {
        self.inner
            .subscribers
            .borrow()
            .iter()
            .find(|s| s.id == id)
            .map(|s| SubscriptionGuard { alive: Arc::clone(&s.alive) })
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.prune_released();
        self.inner.subscribers.borrow().len()
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn persist(&self, user: &User, credential: &str) {
        let Some(backend) = self.inner.backend.as_deref() else {
            self.report(SessionDiagnostic::BackendUnavailable { op: "commit" });
            return;
        };
        let keys = &self.inner.keys;

        // The old credential goes first so that no later failure, including
        // a failed rollback, leaves it paired with the new user.
        let written = backend
            .remove(&keys.credential)
            .map_err(SessionDiagnostic::from)
            .and_then(|()| {
                serde_json::to_string(user).map_err(|source| SessionDiagnostic::Codec { op: "encode", source })
            })
            .and_then(|raw| backend.set(&keys.user, &raw).map_err(SessionDiagnostic::from))
            .and_then(|()| backend.set(&keys.credential, credential).map_err(SessionDiagnostic::from));

        if let Err(diagnostic) = written {
            self.report(diagnostic);
            self.remove_keys(backend);
        }
    }

    fn remove_keys(&self, backend: &dyn DurableBackend) {
        let keys = &self.inner.keys;
        for key in [&keys.user, &keys.credential] {
            if let Err(err) = backend.remove(key) {
                self.report(err.into());
            }
        }
    }

    /// Read `key`, treating read failures and empty values as missing.
    fn read(&self, backend: &dyn DurableBackend, key: &str) -> Option<String> {
        match backend.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(err) => {
                self.report(err.into());
                None
            }
        }
    }

    fn replace(&self, next: SessionState) {
        *self.inner.state.borrow_mut() = next;
        self.notify();
    }

    fn notify(&self) {
        self.prune_released();
        let snapshot = self.snapshot();
        // Cloned out so subscribers may call back into the store.
        let subscribers: Vec<(Arc<AtomicBool>, Subscriber)> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|s| (Arc::clone(&s.alive), Rc::clone(&s.callback)))
            .collect();
        for (alive, subscriber) in subscribers {
            // An earlier subscriber may have released this one.
            if alive.load(Ordering::Relaxed) {
                subscriber(&snapshot);
            }
        }
    }

    fn prune_released(&self) {
        self.inner.subscribers.borrow_mut().retain(Subscription::is_alive);
    }

    fn report(&self, diagnostic: SessionDiagnostic) {
        self.inner.sink.report(diagnostic);
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.inner.state.borrow())
            .field("keys", &self.inner.keys)
            .field("has_backend", &self.has_backend())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
