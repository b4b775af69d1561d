use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("MAPBOX_ACCESS_TOKEN", "pk.test-token");
    m
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(parse_environment("development"), Environment::Development);
    assert_eq!(parse_environment("test"), Environment::Test);
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_fails_without_access_token() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "MAPBOX_ACCESS_TOKEN"),
        "expected MissingEnvVar(MAPBOX_ACCESS_TOKEN), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_token_as_missing() {
    let mut map = HashMap::new();
    map.insert("MAPBOX_ACCESS_TOKEN", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_succeeds_with_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(
        cfg.records_path,
        std::path::PathBuf::from("./config/locations.json")
    );
    assert_eq!(cfg.geocoder_base_url, "https://api.mapbox.com");
    assert_eq!(cfg.geocoder_timeout_secs, 10);
    assert_eq!(cfg.user_agent, "storefinder/0.1 (store-locator)");
    assert_eq!(cfg.geocoder_max_retries, 2);
    assert_eq!(cfg.geocoder_backoff_ms, 250);
    assert_eq!(cfg.variant, Variant::Current);
    assert_eq!(cfg.locator, LocatorOptions::for_variant(Variant::Current));
}

#[test]
fn debug_output_redacts_access_token() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("pk.test-token"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn legacy_variant_selects_legacy_preset() {
    let mut map = full_env();
    map.insert("STOREFINDER_VARIANT", "legacy");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.variant, Variant::Legacy);
    assert!(cfg.locator.validate_postal_format);
    assert_eq!(cfg.locator.debounce_window, Some(Duration::from_millis(250)));
}

#[test]
fn unknown_variant_is_rejected() {
    let mut map = full_env();
    map.insert("STOREFINDER_VARIANT", "nightly");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFINDER_VARIANT"
        ),
        "expected InvalidEnvVar(STOREFINDER_VARIANT), got: {result:?}"
    );
}

#[test]
fn debounce_override_of_zero_disables_debounce() {
    let mut map = full_env();
    map.insert("STOREFINDER_VARIANT", "legacy");
    map.insert("STOREFINDER_DEBOUNCE_MS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.locator.debounce_window.is_none());
}

#[test]
fn debounce_override_sets_window() {
    let mut map = full_env();
    map.insert("STOREFINDER_DEBOUNCE_MS", "400");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.locator.debounce_window, Some(Duration::from_millis(400)));
}

#[test]
fn debounce_override_invalid() {
    let mut map = full_env();
    map.insert("STOREFINDER_DEBOUNCE_MS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFINDER_DEBOUNCE_MS"
        ),
        "expected InvalidEnvVar(STOREFINDER_DEBOUNCE_MS), got: {result:?}"
    );
}

#[test]
fn boolean_overrides_apply() {
    let mut map = full_env();
    map.insert("STOREFINDER_VALIDATE_POSTAL", "true");
    map.insert("STOREFINDER_GUARD_IN_FLIGHT", "yes");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.locator.validate_postal_format);
    assert!(cfg.locator.guard_in_flight);
}

#[test]
fn boolean_override_invalid() {
    let mut map = full_env();
    map.insert("STOREFINDER_VALIDATE_POSTAL", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFINDER_VALIDATE_POSTAL"
        ),
        "expected InvalidEnvVar(STOREFINDER_VALIDATE_POSTAL), got: {result:?}"
    );
}

#[test]
fn empty_result_policy_override() {
    let mut map = full_env();
    map.insert("STOREFINDER_EMPTY_RESULT_POLICY", "clear");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.locator.empty_result_policy, EmptyResultPolicy::Clear);
}

#[test]
fn default_radius_must_be_positive() {
    let mut map = full_env();
    map.insert("STOREFINDER_DEFAULT_RADIUS_MILES", "-5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFINDER_DEFAULT_RADIUS_MILES"
        ),
        "expected InvalidEnvVar(STOREFINDER_DEFAULT_RADIUS_MILES), got: {result:?}"
    );
}

#[test]
fn default_radius_override() {
    let mut map = full_env();
    map.insert("STOREFINDER_DEFAULT_RADIUS_MILES", "25");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!((cfg.locator.default_radius_miles - 25.0).abs() < f64::EPSILON);
}

#[test]
fn geocoder_max_retries_invalid() {
    let mut map = full_env();
    map.insert("STOREFINDER_GEOCODER_MAX_RETRIES", "many");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFINDER_GEOCODER_MAX_RETRIES"
        ),
        "expected InvalidEnvVar(STOREFINDER_GEOCODER_MAX_RETRIES), got: {result:?}"
    );
}
