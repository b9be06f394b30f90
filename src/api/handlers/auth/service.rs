//! The login state machine.
//!
//! `Start → RateChecked → Validated → UserResolved → SecretVerified →
//! TokenMinted`, with an early exit to a terminal outcome at every step.
//! Only `Success` produces session material; no partial token or cookie
//! exists in any other terminal state.

use tracing::{debug, error};

use super::password;
use super::rate_limit::RateLimitDecision;
use super::state::AuthState;
use super::types::PublicUser;
use super::validate::{self, ValidationFailure};

/// Terminal outcome of one login attempt. Produced once, consumed by the
/// transport layer to shape the HTTP response, never persisted.
#[derive(Debug)]
pub enum AuthOutcome {
    Success { user: PublicUser, token: String },
    InvalidInput(ValidationFailure),
    NotFound,
    BadSecret,
    RateLimited,
    Internal,
}

/// Run one login attempt to a terminal outcome.
///
/// The rate limiter is the first gate, ahead of validation and any store
/// I/O, so it bounds load even against malformed requests. Unexpected
/// faults at any step are logged server-side and collapse to
/// [`AuthOutcome::Internal`] with no detail for the caller.
pub async fn authenticate(
    state: &AuthState,
    client_key: &str,
    identifier: &str,
    secret: &str,
) -> AuthOutcome {
    if state.rate_limiter().admit(client_key) == RateLimitDecision::Limited {
        debug!("login rate limited for client {client_key}");
        return AuthOutcome::RateLimited;
    }

    let credentials = match validate::validate(identifier, secret) {
        Ok(credentials) => credentials,
        Err(failure) => return AuthOutcome::InvalidInput(failure),
    };

    let record = match state
        .store()
        .find_by_identifier(&credentials.identifier)
        .await
    {
        Ok(Some(record)) => record,
        Ok(None) => {
            debug!("login identifier not registered");
            return AuthOutcome::NotFound;
        }
        Err(err) => {
            error!("user lookup failed: {err:?}");
            return AuthOutcome::Internal;
        }
    };

    match password::verify_secret(credentials.secret, record.secret_hash.clone()).await {
        Ok(true) => {}
        Ok(false) => return AuthOutcome::BadSecret,
        Err(err) => {
            error!("secret verification failed: {err:?}");
            return AuthOutcome::Internal;
        }
    }

    // Redact before the record crosses into the token/response layer.
    let user = record.redacted();
    match state.codec().mint(&user) {
        Ok(token) => AuthOutcome::Success { user, token },
        Err(err) => {
            error!("token mint failed: {err:?}");
            AuthOutcome::Internal
        }
    }
}

/// Re-verify a presented token and re-resolve the identity freshly.
/// Claims are never trusted past token validity: a deleted account is
/// rejected even while its token is unexpired.
pub(super) enum GuardOutcome {
    Authenticated(PublicUser),
    Rejected,
    Fault,
}

pub(super) async fn resolve_session(state: &AuthState, raw_token: &str) -> GuardOutcome {
    let claims = match state.codec().verify(raw_token) {
        Ok(claims) => claims,
        // Malformed, forged, expired: indistinguishable to the caller.
        Err(err) => {
            debug!("session token rejected: {err}");
            return GuardOutcome::Rejected;
        }
    };

    match state.store().find_by_id(claims.sub).await {
        Ok(Some(record)) => GuardOutcome::Authenticated(record.redacted()),
        Ok(None) => {
            debug!("session user no longer exists");
            GuardOutcome::Rejected
        }
        Err(err) => {
            error!("session user lookup failed: {err:?}");
            GuardOutcome::Fault
        }
    }
}
