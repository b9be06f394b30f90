//! Session endpoints: login, logout, and current-user lookup.

use axum::{
    extract::Extension,
    http::{
        header::{InvalidHeaderValue, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{error, instrument};

use super::principal::require_auth;
use super::service::{authenticate, AuthOutcome};
use super::state::{AuthConfig, AuthState};
use super::types::{ErrorResponse, FieldErrors, LoginRequest, LoginResponse, MessageResponse};
use super::utils::{extract_client_ip, UNKNOWN_CLIENT_KEY};

const SESSION_COOKIE_NAME: &str = "token";

const MSG_LOGIN_OK: &str = "Login successful";
const MSG_USER_NOT_FOUND: &str = "User not found";
const DETAIL_IDENTIFIER_UNREGISTERED: &str = "Email or username is not registered";
const MSG_BAD_PASSWORD: &str = "Incorrect password";
const DETAIL_BAD_PASSWORD: &str = "The password entered is incorrect";
const MSG_RATE_LIMITED: &str = "Too many login attempts. Try again in 1 minute.";
const MSG_INTERNAL: &str = "An unexpected server error occurred";
const MSG_LOGOUT_OK: &str = "Logout successful";
const MSG_UNAUTHORIZED: &str = "Unauthorized";

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful; sets the session cookie", body = LoginResponse),
        (status = 400, description = "Input validation failed", body = ErrorResponse),
        (status = 401, description = "Unknown identifier or wrong password", body = ErrorResponse),
        (status = 429, description = "Too many login attempts"),
        (status = 500, description = "Unexpected server fault", body = ErrorResponse),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn login(
    headers: HeaderMap,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    // A missing or non-JSON body flows into validation as empty fields.
    let request = payload.map_or_else(
        || LoginRequest {
            email: String::new(),
            password: String::new(),
        },
        |Json(payload)| payload,
    );

    let client_key =
        extract_client_ip(&headers).unwrap_or_else(|| UNKNOWN_CLIENT_KEY.to_string());

    match authenticate(&auth_state, &client_key, &request.email, &request.password).await {
        AuthOutcome::Success { user, token } => {
            let mut response_headers = HeaderMap::new();
            match session_cookie(auth_state.config(), &token) {
                Ok(cookie) => {
                    response_headers.insert(SET_COOKIE, cookie);
                }
                Err(err) => {
                    // A token that cannot be carried in a cookie is a fault,
                    // not a partial success.
                    error!("failed to build session cookie: {err}");
                    return internal_error();
                }
            }
            let body = Json(LoginResponse {
                message: MSG_LOGIN_OK.to_string(),
                token,
                user,
            });
            (StatusCode::OK, response_headers, body).into_response()
        }
        AuthOutcome::InvalidInput(failure) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                message: failure.message.to_string(),
                details: failure.details,
            }),
        )
            .into_response(),
        AuthOutcome::NotFound => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                message: MSG_USER_NOT_FOUND.to_string(),
                details: FieldErrors {
                    email: Some(DETAIL_IDENTIFIER_UNREGISTERED.to_string()),
                    password: None,
                },
            }),
        )
            .into_response(),
        AuthOutcome::BadSecret => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                message: MSG_BAD_PASSWORD.to_string(),
                details: FieldErrors {
                    email: None,
                    password: Some(DETAIL_BAD_PASSWORD.to_string()),
                },
            }),
        )
            .into_response(),
        AuthOutcome::RateLimited => {
            (StatusCode::TOO_MANY_REQUESTS, MSG_RATE_LIMITED.to_string()).into_response()
        }
        AuthOutcome::Internal => internal_error(),
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse)
    ),
    tag = "auth"
)]
pub async fn logout(auth_state: Extension<Arc<AuthState>>) -> impl IntoResponse {
    // Client-side only: the cookie is cleared, any minted token stays
    // valid until it expires. Idempotent by design.
    let mut response_headers = HeaderMap::new();
    if let Ok(cookie) = clear_session_cookie(auth_state.config()) {
        response_headers.insert(SET_COOKIE, cookie);
    }
    (
        StatusCode::OK,
        response_headers,
        Json(MessageResponse {
            message: MSG_LOGOUT_OK.to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "The authenticated user", body = super::types::PublicUser),
        (status = 401, description = "Missing or invalid session", body = MessageResponse),
        (status = 500, description = "Unexpected server fault", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn me(headers: HeaderMap, auth_state: Extension<Arc<AuthState>>) -> impl IntoResponse {
    match require_auth(&headers, &auth_state).await {
        Ok(principal) => (
            StatusCode::OK,
            Json(super::types::PublicUser {
                id: principal.id,
                username: principal.username,
                email: principal.email,
            }),
        )
            .into_response(),
        Err(StatusCode::UNAUTHORIZED) => (
            StatusCode::UNAUTHORIZED,
            Json(MessageResponse {
                message: MSG_UNAUTHORIZED.to_string(),
            }),
        )
            .into_response(),
        // Only a store fault reaches here; same generic body as login.
        Err(_) => internal_error(),
    }
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            message: MSG_INTERNAL.to_string(),
            details: FieldErrors::default(),
        }),
    )
        .into_response()
}

/// Build the `HttpOnly` session cookie carrying the token.
pub(super) fn session_cookie(
    config: &AuthConfig,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = config.session_ttl_seconds();
    let secure = config.session_cookie_secure();
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

fn clear_session_cookie(config: &AuthConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = config.session_cookie_secure();
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Read the session token from the request's cookie header, if present.
pub(super) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        // Browsers may send bare, valueless cookie names; skip those
        // pairs instead of giving up on the whole header.
        let Some((key, val)) = pair.trim().split_once('=') else {
            continue;
        };
        if key.trim() == SESSION_COOKIE_NAME {
            return Some(val.trim().to_string());
        }
    }
    None
}
