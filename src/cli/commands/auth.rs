use anyhow::{Context, Result};
use clap::{Arg, Command};

pub const ARG_SECRET: &str = "secret";
pub const ARG_FRONTEND_URL: &str = "frontend-url";
pub const ARG_SESSION_TTL_SECONDS: &str = "session-ttl-seconds";
pub const ARG_RATE_LIMIT_ATTEMPTS: &str = "rate-limit-attempts";
pub const ARG_RATE_LIMIT_WINDOW_SECONDS: &str = "rate-limit-window-seconds";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SECRET)
                .short('s')
                .long(ARG_SECRET)
                .help("Symmetric secret used to sign session tokens")
                .env("GERBANG_SECRET")
                .required(true),
        )
        .arg(
            Arg::new(ARG_FRONTEND_URL)
                .long(ARG_FRONTEND_URL)
                .help("Frontend origin allowed by CORS; https URLs also mark the session cookie Secure")
                .env("GERBANG_FRONTEND_URL")
                .default_value("http://localhost:5173"),
        )
        .arg(
            Arg::new(ARG_SESSION_TTL_SECONDS)
                .long(ARG_SESSION_TTL_SECONDS)
                .help("Session token and cookie TTL in seconds")
                .env("GERBANG_SESSION_TTL_SECONDS")
                .default_value("86400")
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new(ARG_RATE_LIMIT_ATTEMPTS)
                .long(ARG_RATE_LIMIT_ATTEMPTS)
                .help("Login attempts allowed per client within the rate-limit window")
                .env("GERBANG_RATE_LIMIT_ATTEMPTS")
                .default_value("5")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new(ARG_RATE_LIMIT_WINDOW_SECONDS)
                .long(ARG_RATE_LIMIT_WINDOW_SECONDS)
                .help("Rate-limit window length in seconds")
                .env("GERBANG_RATE_LIMIT_WINDOW_SECONDS")
                .default_value("60")
                .value_parser(clap::value_parser!(u64)),
        )
}

#[derive(Debug)]
pub struct Options {
    pub secret: String,
    pub frontend_url: String,
    pub session_ttl_seconds: i64,
    pub rate_limit_attempts: u32,
    pub rate_limit_window_seconds: u64,
}

impl Options {
    /// Collect auth options from validated CLI matches.
    ///
    /// # Errors
    /// Returns an error if a required argument is missing.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        Ok(Self {
            secret: matches
                .get_one::<String>(ARG_SECRET)
                .cloned()
                .context("missing required argument: --secret")?,
            frontend_url: matches
                .get_one::<String>(ARG_FRONTEND_URL)
                .cloned()
                .context("missing required argument: --frontend-url")?,
            session_ttl_seconds: matches
                .get_one::<i64>(ARG_SESSION_TTL_SECONDS)
                .copied()
                .unwrap_or(86_400),
            rate_limit_attempts: matches
                .get_one::<u32>(ARG_RATE_LIMIT_ATTEMPTS)
                .copied()
                .unwrap_or(5),
            rate_limit_window_seconds: matches
                .get_one::<u64>(ARG_RATE_LIMIT_WINDOW_SECONDS)
                .copied()
                .unwrap_or(60),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches_for(args: Vec<&str>) -> clap::ArgMatches {
        with_args(Command::new("test")).get_matches_from(args)
    }

    #[test]
    fn defaults_apply() {
        temp_env::with_vars(
            [
                ("GERBANG_SECRET", None::<&str>),
                ("GERBANG_FRONTEND_URL", None),
                ("GERBANG_SESSION_TTL_SECONDS", None),
            ],
            || {
                let matches = matches_for(vec!["test", "--secret", "sup3rs3cr3t"]);
                let options = Options::parse(&matches).expect("options");
                assert_eq!(options.secret, "sup3rs3cr3t");
                assert_eq!(options.frontend_url, "http://localhost:5173");
                assert_eq!(options.session_ttl_seconds, 86_400);
                assert_eq!(options.rate_limit_attempts, 5);
                assert_eq!(options.rate_limit_window_seconds, 60);
            },
        );
    }

    #[test]
    fn overrides_apply() {
        let matches = matches_for(vec![
            "test",
            "--secret",
            "sup3rs3cr3t",
            "--frontend-url",
            "https://app.gerbang.dev",
            "--session-ttl-seconds",
            "3600",
            "--rate-limit-attempts",
            "3",
            "--rate-limit-window-seconds",
            "30",
        ]);
        let options = Options::parse(&matches).expect("options");
        assert_eq!(options.frontend_url, "https://app.gerbang.dev");
        assert_eq!(options.session_ttl_seconds, 3600);
        assert_eq!(options.rate_limit_attempts, 3);
        assert_eq!(options.rate_limit_window_seconds, 30);
    }
}
