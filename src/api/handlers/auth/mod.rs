//! Auth handlers and supporting modules.
//!
//! This module coordinates credential login, session token issuance, and
//! per-request session guarding.
//!
//! ## Login Rate Limiting
//!
//! `POST /api/auth/login` is rate limited per client address before any
//! validation or store I/O: 5 attempts per 60-second window by default.
//! Counters are in-memory and process-local, which is exact only for a
//! single-instance deployment.
//!
//! ## Account Existence Leak
//!
//! Unknown-identifier and wrong-password failures both return 401 but
//! carry different body detail, so the response leaks whether an account
//! exists. This matches the behavior clients already depend on; unify
//! the bodies if that compatibility is ever dropped.

pub(crate) mod password;
pub(crate) mod principal;
pub(crate) mod rate_limit;
mod service;
pub(crate) mod session;
mod state;
pub(crate) mod store;
pub(crate) mod token;
pub(crate) mod types;
mod utils;
pub(crate) mod validate;

pub use password::hash_secret;
pub use principal::{require_auth, Principal};
pub use rate_limit::{NoopRateLimiter, RateLimitDecision, RateLimiter, WindowRateLimiter};
pub use service::{authenticate, AuthOutcome};
pub use state::{AuthConfig, AuthState};
pub use store::{MemoryUserStore, PgUserStore, UserRecord, UserStore};
pub use token::{SessionClaims, SessionTokenCodec, TokenError};
pub use types::PublicUser;
