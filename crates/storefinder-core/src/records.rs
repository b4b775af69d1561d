//! Raw location records as they appear on the page or in a records file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One location entry exactly as the page exposes it.
///
/// Values are kept as loose JSON so a record with a blank or non-numeric
/// coordinate still parses; the ingestor decides whether it is usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    #[serde(rename = "locationLatitude", alias = "latitude", alias = "lat", default)]
    pub latitude: Option<serde_json::Value>,
    #[serde(rename = "locationLongitude", alias = "longitude", alias = "lng", default)]
    pub longitude: Option<serde_json::Value>,
    #[serde(rename = "locationID", alias = "id", default)]
    pub id: Option<serde_json::Value>,
    #[serde(rename = "zipCode", alias = "zip", alias = "postal_code", default)]
    pub postal_code: Option<serde_json::Value>,
    /// Pre-rendered card markup. Passed through untouched.
    #[serde(default)]
    pub description: Option<String>,
}

impl LocationRecord {
    /// Latitude as a number, accepting JSON numbers and trimmed numeric strings.
    #[must_use]
    pub fn latitude_value(&self) -> Option<f64> {
        self.latitude.as_ref().and_then(numeric)
    }

    #[must_use]
    pub fn longitude_value(&self) -> Option<f64> {
        self.longitude.as_ref().and_then(numeric)
    }

    /// Identifier as text; numeric ids are rendered without quotes.
    #[must_use]
    pub fn id_value(&self) -> Option<String> {
        self.id.as_ref().and_then(text).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn postal_code_value(&self) -> String {
        self.postal_code.as_ref().and_then(text).unwrap_or_default()
    }
}

fn numeric(v: &serde_json::Value) -> Option<f64> {
    v.as_f64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
        .filter(|n| n.is_finite())
}

fn text(v: &serde_json::Value) -> Option<String> {
    match v {
        serde_json::Value::String(s) => Some(s.trim().to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordsFile {
    Bare(Vec<LocationRecord>),
    Wrapped { locations: Vec<LocationRecord> },
}

/// Load location records from a JSON or YAML file.
///
/// The format is picked by extension (`.yaml`/`.yml` for YAML, anything else
/// is JSON). The file may hold a bare array or `{ "locations": [...] }`.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_records(path: &Path) -> Result<Vec<LocationRecord>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RecordsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    let file: RecordsFile = if is_yaml {
        serde_yaml::from_str(&content).map_err(ConfigError::RecordsYamlParse)?
    } else {
        serde_json::from_str(&content).map_err(ConfigError::RecordsJsonParse)?
    };

    Ok(match file {
        RecordsFile::Wrapped { locations } => locations,
        RecordsFile::Bare(records) => records,
    })
}
