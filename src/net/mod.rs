//! Wire-level types shared with the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login/register endpoints return a `user` object; the session store
//! keeps that object verbatim, so its schema lives here rather than in `state`.

pub mod types;
