//! Lifts location records out of the HTML page the locator is embedded in.

use std::sync::LazyLock;

use regex::Regex;
use storefinder_core::LocationRecord;

use crate::error::LocatorError;

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>(.*?)</script>").expect("valid regex"));

/// An array whose first object carries a coordinate field.
static CANDIDATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\[\s*\{[^}]*"(?:locationLatitude|latitude|lat)"\s*:"#).expect("valid regex")
});

/// Find the first `<script>` array of location records in `html`.
///
/// # Errors
///
/// Returns [`LocatorError::NoEmbeddedRecords`] when no candidate array is
/// present, or [`LocatorError::EmbeddedRecordsParse`] when the only candidates
/// found are not valid record arrays.
pub fn extract_page_records(html: &str) -> Result<Vec<LocationRecord>, LocatorError> {
    let mut last_parse_error = None;

    for cap in SCRIPT_RE.captures_iter(html) {
        let Some(content) = cap.get(1).map(|m| m.as_str()) else {
            continue;
        };

        for m in CANDIDATE_RE.find_iter(content) {
            let Some(array) = balanced_array(&content[m.start()..]) else {
                continue;
            };
            match serde_json::from_str::<Vec<LocationRecord>>(array) {
                Ok(records) if !records.is_empty() => {
                    tracing::debug!(records = records.len(), "found embedded location records");
                    return Ok(records);
                }
                Ok(_) => {}
                Err(e) => last_parse_error = Some(e),
            }
        }
    }

    Err(last_parse_error.map_or(
        LocatorError::NoEmbeddedRecords,
        LocatorError::EmbeddedRecordsParse,
    ))
}

/// The shortest prefix of `s` that is a complete `[...]`, honouring string
/// literals and escapes. `s` must start with `[`.
fn balanced_array(s: &str) -> Option<&str> {
    if !s.starts_with('[') {
        return None;
    }
    let mut depth: i32 = 0;
    let mut in_string = false;
    let mut escape = false;
    for (i, c) in s.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        if in_string {
            match c {
                '\\' => escape = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' | '{' => depth += 1,
            '}' => depth -= 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"
<html><head>
<script src="/vendor/map.js"></script>
<script>var theme = { colors: ["#eebe49"] };</script>
<script type="text/javascript">
  var locations = [
    {"locationLatitude": "32.7157", "locationLongitude": "-117.1611",
     "locationID": "sd-1", "zipCode": "92101",
     "description": "<h3>Downtown [main]</h3><p>Say \"hi\"</p>"},
    {"locationLatitude": 34.0522, "locationLongitude": -118.2437,
     "locationID": 2, "zipCode": "90012", "description": "<h3>LA</h3>"}
  ];
</script>
</head></html>"##;

    #[test]
    fn extracts_records_from_script_block() {
        let records = extract_page_records(PAGE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id_value().as_deref(), Some("sd-1"));
        assert_eq!(records[0].latitude_value(), Some(32.7157));
        assert_eq!(
            records[0].description.as_deref(),
            Some("<h3>Downtown [main]</h3><p>Say \"hi\"</p>")
        );
        assert_eq!(records[1].id_value().as_deref(), Some("2"));
    }

    #[test]
    fn page_without_records_is_an_error() {
        let err = extract_page_records("<html><script>var x = [1, 2];</script></html>")
            .unwrap_err();
        assert!(matches!(err, LocatorError::NoEmbeddedRecords));
    }

    #[test]
    fn malformed_candidate_reports_parse_error() {
        let html = r#"<script>var l = [{"lat": 1, "lng": }];</script>"#;
        let err = extract_page_records(html).unwrap_err();
        assert!(matches!(err, LocatorError::EmbeddedRecordsParse(_)));
    }

    #[test]
    fn balanced_array_ignores_brackets_in_strings() {
        let s = r#"["a]b", ["c"]] trailing"#;
        assert_eq!(balanced_array(s), Some(r#"["a]b", ["c"]]"#));
    }

    #[test]
    fn balanced_array_rejects_unterminated_input() {
        assert_eq!(balanced_array("[1, 2"), None);
        assert_eq!(balanced_array("{}"), None);
    }
}
