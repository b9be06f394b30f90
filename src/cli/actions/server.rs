use crate::api::{self, handlers::auth::AuthConfig};
use anyhow::Result;
use secrecy::SecretString;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub secret: SecretString,
    pub frontend_url: String,
    pub session_ttl_seconds: i64,
    pub rate_limit_attempts: u32,
    pub rate_limit_window_seconds: u64,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database is unreachable or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let config = AuthConfig::new(args.frontend_url)
        .with_session_ttl_seconds(args.session_ttl_seconds)
        .with_rate_limit_attempts(args.rate_limit_attempts)
        .with_rate_limit_window_seconds(args.rate_limit_window_seconds);

    api::new(args.port, args.dsn, &args.secret, config).await
}
