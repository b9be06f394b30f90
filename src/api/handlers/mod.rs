//! API handlers for Gerbang.
//!
//! Route handlers live here; the auth submodule carries the login state
//! machine, session codec, guard, and rate limiter.

pub mod auth;
pub mod health;
pub mod root;
