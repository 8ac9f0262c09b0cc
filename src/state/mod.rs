//! Client-side application state.
//!
//! DESIGN
//! ======
//! `session` is the only state that outlives a page load; it owns the
//! synchronization between memory and durable storage.

pub mod session;
