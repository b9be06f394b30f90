//! Authenticated principal extraction.
//!
//! Flow Overview: read the session cookie, verify the token, re-resolve
//! the user with a fresh store lookup, and return a principal that
//! downstream handlers consume. The principal lives only for the one
//! request; nothing is cached across requests.

use axum::http::{HeaderMap, StatusCode};

use super::service::{resolve_session, GuardOutcome};
use super::session::extract_session_token;
use super::state::AuthState;
use super::types::PublicUser;

/// Authenticated user context derived from the session cookie.
#[derive(Clone, Debug)]
pub struct Principal {
    pub id: uuid::Uuid,
    pub username: String,
    pub email: String,
}

impl From<PublicUser> for Principal {
    fn from(user: PublicUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Resolve the session cookie into a principal, or reject the request.
///
/// # Errors
/// `401 Unauthorized` (generic, no reason detail) when the cookie is
/// missing, the token fails verification, or the account no longer
/// exists; `500` only when the store itself fails.
pub async fn require_auth(headers: &HeaderMap, state: &AuthState) -> Result<Principal, StatusCode> {
    let Some(token) = extract_session_token(headers) else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    match resolve_session(state, &token).await {
        GuardOutcome::Authenticated(user) => Ok(user.into()),
        GuardOutcome::Rejected => Err(StatusCode::UNAUTHORIZED),
        GuardOutcome::Fault => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}
