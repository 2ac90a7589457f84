use std::env;
use std::time::Duration;

use anyhow::Context;

/// Runtime configuration, sourced from the environment (and `.env` via
/// dotenvy in `main`).
///
/// The expected origin is deliberately a configured value: deriving it from
/// the inbound request's host would let a spoofed header decide what origin
/// the verification engine checks against.
#[derive(Clone, Debug)]
pub struct Settings {
    pub bind_addr: String,
    pub expected_origin: String,
    pub verifier_url: String,
    pub mongo_uri: String,
    pub database_name: String,
    pub challenge_ttl: Duration,
    pub storage_timeout: Duration,
    pub verify_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "localhost:9000".into()),
            expected_origin: env::var("EXPECTED_ORIGIN")
                .context("EXPECTED_ORIGIN not found in environment variables")?,
            verifier_url: env::var("VERIFIER_URL")
                .context("VERIFIER_URL not found in environment variables")?,
            mongo_uri: env::var("MONGO_URI")
                .context("MONGO_URI not found in environment variables")?,
            database_name: env::var("DATABASE_NAME")
                .context("DATABASE_NAME not found in environment variables")?,
            challenge_ttl: duration_from_env("CHALLENGE_TTL_SECS", 300)?,
            storage_timeout: duration_from_env("STORAGE_TIMEOUT_SECS", 3)?,
            verify_timeout: duration_from_env("VERIFY_TIMEOUT_SECS", 5)?,
        })
    }
}

fn duration_from_env(name: &str, default_secs: u64) -> anyhow::Result<Duration> {
    let secs = match env::var(name) {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("{name} is not a number of seconds"))?,
        Err(_) => default_secs,
    };
    Ok(Duration::from_secs(secs))
}
