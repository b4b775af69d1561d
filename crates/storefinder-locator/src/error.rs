use thiserror::Error;

/// Errors from resolving a postal code to a coordinate.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from geocoder")]
    UnexpectedStatus { status: u16 },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The geocoder answered but returned no features for the query.
    #[error("no location found for \"{query}\"")]
    NoMatch { query: String },

    #[error("invalid geocoder base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// Reasons a search is rejected before any network call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("postal code is empty")]
    EmptyPostalCode,

    #[error("\"{0}\" is not a 5-digit or ZIP+4 postal code")]
    InvalidPostalCode(String),

    #[error("radius must be a positive number of miles, got {0}")]
    InvalidRadius(f64),
}

/// Errors from lifting location records out of a host page.
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("no embedded location records found in page")]
    NoEmbeddedRecords,

    #[error("embedded location records are not valid JSON: {0}")]
    EmbeddedRecordsParse(#[source] serde_json::Error),
}
