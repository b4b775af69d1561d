use std::path::PathBuf;

use crate::options::{LocatorOptions, Variant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub records_path: PathBuf,
    pub geocoder_base_url: String,
    pub geocoder_access_token: String,
    pub geocoder_timeout_secs: u64,
    pub user_agent: String,
    pub geocoder_max_retries: u32,
    pub geocoder_backoff_ms: u64,
    pub variant: Variant,
    pub locator: LocatorOptions,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("records_path", &self.records_path)
            .field("geocoder_base_url", &self.geocoder_base_url)
            .field("geocoder_access_token", &"[redacted]")
            .field("geocoder_timeout_secs", &self.geocoder_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("geocoder_max_retries", &self.geocoder_max_retries)
            .field("geocoder_backoff_ms", &self.geocoder_backoff_ms)
            .field("variant", &self.variant)
            .field("locator", &self.locator)
            .finish()
    }
}
