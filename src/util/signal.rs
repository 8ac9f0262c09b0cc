//! Leptos bridge for the session store.
//!
//! Components read session state through an `RwSignal` provided via context,
//! like every other piece of client state. The store stays the only writer:
//! the signal is overwritten on every store notification and should be
//! treated as read-only by components.
//!
//! LIFECYCLE
//! =========
//! Each bridge subscription is tied to the reactive owner it was created
//! under. When that owner is cleaned up (component unmount) the subscription
//! is released, so disposed signals are never written to.

#[cfg(test)]
#[path = "signal_test.rs"]
mod signal_test;

use leptos::prelude::*;

use crate::state::session::{SessionState, SessionStore, SubscriptionId};

/// Create a signal holding the current snapshot that follows every change
/// until the current owner is cleaned up.
pub fn session_signal(store: &SessionStore) -> RwSignal<SessionState> {
    let signal = RwSignal::new(store.snapshot());
    let id = store.subscribe(move |state| signal.set(state.clone()));
    release_on_cleanup(store, id);
    signal
}

/// Sync an existing signal to `store` now and on every future change.
///
/// The subscription ends when the current owner is cleaned up, or earlier
/// through [`SessionStore::unsubscribe`] with the returned id.
pub fn bind_signal(store: &SessionStore, signal: RwSignal<SessionState>) -> SubscriptionId {
    signal.set(store.snapshot());
    let id = store.subscribe(move |state| signal.set(state.clone()));
    release_on_cleanup(store, id);
    id
}

fn release_on_cleanup(store: &SessionStore, id: SubscriptionId) {
    if let Some(guard) = store.guard(id) {
        on_cleanup(move || guard.release());
    }
}
