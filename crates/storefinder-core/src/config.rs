use std::time::Duration;

use crate::app_config::{AppConfig, Environment};
use crate::options::{EmptyResultPolicy, LocatorOptions, Variant};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str| -> Result<Option<bool>, ConfigError> {
        match lookup(var) {
            Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(Some(true)),
                "0" | "false" | "no" | "off" => Ok(Some(false)),
                other => Err(invalid(var, format!("expected a boolean, got '{other}'"))),
            },
            Err(_) => Ok(None),
        }
    };

    let geocoder_access_token = require("MAPBOX_ACCESS_TOKEN")?;

    let env = parse_environment(&or_default("STOREFINDER_ENV", "development"));
    let log_level = or_default("STOREFINDER_LOG_LEVEL", "info");
    let records_path = PathBuf::from(or_default(
        "STOREFINDER_RECORDS_PATH",
        "./config/locations.json",
    ));

    let geocoder_base_url = or_default("STOREFINDER_GEOCODER_BASE_URL", "https://api.mapbox.com");
    let geocoder_timeout_secs = parse_u64("STOREFINDER_GEOCODER_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("STOREFINDER_USER_AGENT", "storefinder/0.1 (store-locator)");
    let geocoder_max_retries = parse_u32("STOREFINDER_GEOCODER_MAX_RETRIES", "2")?;
    let geocoder_backoff_ms = parse_u64("STOREFINDER_GEOCODER_BACKOFF_MS", "250")?;

    let variant = or_default("STOREFINDER_VARIANT", "current")
        .parse::<Variant>()
        .map_err(|reason| invalid("STOREFINDER_VARIANT", reason))?;

    let mut locator = LocatorOptions::for_variant(variant);

    if lookup("STOREFINDER_DEBOUNCE_MS").is_ok() {
        let ms = parse_u64("STOREFINDER_DEBOUNCE_MS", "0")?;
        locator.debounce_window = (ms > 0).then_some(Duration::from_millis(ms));
    }
    if let Some(validate) = parse_bool("STOREFINDER_VALIDATE_POSTAL")? {
        locator.validate_postal_format = validate;
    }
    if let Some(guard) = parse_bool("STOREFINDER_GUARD_IN_FLIGHT")? {
        locator.guard_in_flight = guard;
    }
    if let Ok(raw) = lookup("STOREFINDER_EMPTY_RESULT_POLICY") {
        locator.empty_result_policy = raw
            .parse::<EmptyResultPolicy>()
            .map_err(|reason| invalid("STOREFINDER_EMPTY_RESULT_POLICY", reason))?;
    }
    if let Ok(raw) = lookup("STOREFINDER_DEFAULT_RADIUS_MILES") {
        let radius = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid("STOREFINDER_DEFAULT_RADIUS_MILES", e.to_string()))?;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(invalid(
                "STOREFINDER_DEFAULT_RADIUS_MILES",
                format!("radius must be a positive number, got {radius}"),
            ));
        }
        locator.default_radius_miles = radius;
    }

    Ok(AppConfig {
        env,
        log_level,
        records_path,
        geocoder_base_url,
        geocoder_access_token,
        geocoder_timeout_secs,
        user_agent,
        geocoder_max_retries,
        geocoder_backoff_ms,
        variant,
        locator,
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
