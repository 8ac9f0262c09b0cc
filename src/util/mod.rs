//! Glue between the session store and its environment.
//!
//! SYSTEM CONTEXT
//! ==============
//! `signal` feeds session snapshots into Leptos reactivity; `logging` wires
//! the `log` facade to the browser console.

pub mod logging;
pub mod signal;
