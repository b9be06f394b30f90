//! Auth state and configuration.

use std::sync::Arc;

use super::rate_limit::RateLimiter;
use super::store::UserStore;
use super::token::SessionTokenCodec;

const DEFAULT_SESSION_TTL_SECONDS: i64 = 24 * 60 * 60;
const DEFAULT_RATE_LIMIT_ATTEMPTS: u32 = 5;
const DEFAULT_RATE_LIMIT_WINDOW_SECONDS: u64 = 60;

/// Immutable configuration constructed once at process start.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    frontend_url: String,
    session_ttl_seconds: i64,
    rate_limit_attempts: u32,
    rate_limit_window_seconds: u64,
}

impl AuthConfig {
    #[must_use]
    pub fn new(frontend_url: String) -> Self {
        Self {
            frontend_url,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            rate_limit_attempts: DEFAULT_RATE_LIMIT_ATTEMPTS,
            rate_limit_window_seconds: DEFAULT_RATE_LIMIT_WINDOW_SECONDS,
        }
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_rate_limit_attempts(mut self, attempts: u32) -> Self {
        self.rate_limit_attempts = attempts;
        self
    }

    #[must_use]
    pub fn with_rate_limit_window_seconds(mut self, seconds: u64) -> Self {
        self.rate_limit_window_seconds = seconds;
        self
    }

    #[must_use]
    pub fn frontend_url(&self) -> &str {
        &self.frontend_url
    }

    #[must_use]
    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    #[must_use]
    pub fn rate_limit_attempts(&self) -> u32 {
        self.rate_limit_attempts
    }

    #[must_use]
    pub fn rate_limit_window_seconds(&self) -> u64 {
        self.rate_limit_window_seconds
    }

    /// Only mark cookies secure when the frontend is served over HTTPS.
    pub(crate) fn session_cookie_secure(&self) -> bool {
        self.frontend_url.starts_with("https://")
    }
}

/// Shared per-process auth dependencies, passed to handlers by `Extension`.
pub struct AuthState {
    config: AuthConfig,
    codec: SessionTokenCodec,
    store: Arc<dyn UserStore>,
    rate_limiter: Arc<dyn RateLimiter>,
}

impl AuthState {
    #[must_use]
    pub fn new(
        config: AuthConfig,
        codec: SessionTokenCodec,
        store: Arc<dyn UserStore>,
        rate_limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        Self {
            config,
            codec,
            store,
            rate_limiter,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub fn codec(&self) -> &SessionTokenCodec {
        &self.codec
    }

    pub(crate) fn store(&self) -> &dyn UserStore {
        self.store.as_ref()
    }

    pub(crate) fn rate_limiter(&self) -> &dyn RateLimiter {
        self.rate_limiter.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::super::rate_limit::NoopRateLimiter;
    use super::super::store::MemoryUserStore;
    use super::super::token::SessionTokenCodec;
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn auth_config_defaults_and_overrides() {
        let config = AuthConfig::new("https://app.gerbang.dev".to_string());

        assert_eq!(config.frontend_url(), "https://app.gerbang.dev");
        assert_eq!(config.session_ttl_seconds(), DEFAULT_SESSION_TTL_SECONDS);
        assert_eq!(config.rate_limit_attempts(), DEFAULT_RATE_LIMIT_ATTEMPTS);
        assert_eq!(
            config.rate_limit_window_seconds(),
            DEFAULT_RATE_LIMIT_WINDOW_SECONDS
        );
        assert!(config.session_cookie_secure());

        let config = config
            .with_session_ttl_seconds(3_600)
            .with_rate_limit_attempts(3)
            .with_rate_limit_window_seconds(30);

        assert_eq!(config.session_ttl_seconds(), 3_600);
        assert_eq!(config.rate_limit_attempts(), 3);
        assert_eq!(config.rate_limit_window_seconds(), 30);
    }

    #[test]
    fn plain_http_frontend_is_not_secure() {
        let config = AuthConfig::new("http://localhost:5173".to_string());
        assert!(!config.session_cookie_secure());
    }

    #[test]
    fn auth_state_constructs_with_noop_rate_limiter() {
        let config = AuthConfig::new("http://localhost:5173".to_string());
        let codec = SessionTokenCodec::new(&SecretString::from("test-secret"), 86_400)
            .expect("codec");
        let state = AuthState::new(
            config,
            codec,
            Arc::new(MemoryUserStore::default()),
            Arc::new(NoopRateLimiter),
        );
        assert_eq!(state.codec().ttl_seconds(), 86_400);
    }
}
