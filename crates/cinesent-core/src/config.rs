use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_positive = |var: &str, raw: &str| -> Result<NonZeroUsize, ConfigError> {
        raw.parse::<NonZeroUsize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("CINESENT_ENV", "development"));

    let bind_addr = or_default("CINESENT_BIND_ADDR", "0.0.0.0:8501")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("CINESENT_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("CINESENT_LOG_LEVEL", "info");

    let model_path = PathBuf::from(or_default(
        "CINESENT_MODEL_PATH",
        "./models/imdb_sentiment_model.json",
    ));
    let vectorizer_path = PathBuf::from(or_default(
        "CINESENT_VECTORIZER_PATH",
        "./models/imdb_vectorizer.json",
    ));
    let stopwords_path = lookup("CINESENT_STOPWORDS_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let movies_path = PathBuf::from(or_default("CINESENT_MOVIES_PATH", "./config/movies.yaml"));

    let history_limit = match lookup("CINESENT_HISTORY_LIMIT") {
        Ok(raw) if !raw.trim().is_empty() => {
            Some(parse_positive("CINESENT_HISTORY_LIMIT", raw.trim())?)
        }
        _ => None,
    };
    let rate_limit_per_minute = parse_positive(
        "CINESENT_RATE_LIMIT_PER_MINUTE",
        &or_default("CINESENT_RATE_LIMIT_PER_MINUTE", "120"),
    )?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        model_path,
        vectorizer_path,
        stopwords_path,
        movies_path,
        history_limit,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
