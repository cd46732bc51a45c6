use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};

/// Runtime configuration, loaded once at startup and held for the process
/// lifetime.
pub struct Config {
    pub port: u16,
    pub db_url: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("RUST_PORT", "8080"),
            db_url: read_db_url(),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

/// `DB_URL` names the shared Postgres instance. Deployments mount it under
/// `/run/secrets`; bare environments export it as an environment variable.
/// The value embeds credentials and must never be logged.
fn read_db_url() -> String {
    read_secret("DB_URL")
        .or_else(|| env::var("DB_URL").ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .expect("DB_URL is not configured! Provide /run/secrets/DB_URL or the DB_URL environment variable.")
}

fn read_secret(secret_name: &str) -> Option<String> {
    read_to_string(format!("/run/secrets/{secret_name}")).ok()
}
