//! # Gerbang (Authentication & Session Gateway)
//!
//! `gerbang` authenticates users against stored credentials, issues signed
//! session tokens, and gates access to protected resources on subsequent
//! requests.
//!
//! ## Login Flow
//!
//! `POST /api/auth/login` runs a small state machine: rate-limit admission,
//! input validation, user lookup (by email or username), bcrypt secret
//! verification, and finally token minting. Every step has a terminal
//! failure state; a token is only produced on full success.
//!
//! ## Sessions
//!
//! Sessions are stateless HS256 JWTs carried in an `HttpOnly` cookie with a
//! 24-hour TTL. Protected handlers resolve the cookie into a [`Principal`]
//! with a fresh user lookup on every request, so deleted accounts lose
//! access immediately even while their token is still unexpired.
//!
//! > **Limitation:** there is no server-side revocation list. Logout clears
//! > the client cookie only; a minted token stays valid until it expires.
//!
//! [`Principal`]: api::Principal

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
