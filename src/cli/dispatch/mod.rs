//! Command-line argument dispatch and server initialization.
//!
//! This module parses validated CLI arguments and maps them to the
//! appropriate action, such as starting the API server with its full
//! configuration state.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::auth;
use anyhow::{bail, Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
/// An empty signing secret is refused here so the process never starts
/// minting tokens with an undefined key.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;

    let auth_opts = auth::Options::parse(matches)?;

    if auth_opts.secret.trim().is_empty() {
        bail!("signing secret must not be empty");
    }
    if auth_opts.session_ttl_seconds <= 0 {
        bail!("session TTL must be positive");
    }

    Ok(Action::Server(Args {
        port,
        dsn,
        secret: SecretString::from(auth_opts.secret),
        frontend_url: auth_opts.frontend_url,
        session_ttl_seconds: auth_opts.session_ttl_seconds,
        rate_limit_attempts: auth_opts.rate_limit_attempts,
        rate_limit_window_seconds: auth_opts.rate_limit_window_seconds,
    }))
}
