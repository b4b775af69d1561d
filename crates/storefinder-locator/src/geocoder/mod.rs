//! Postal code to coordinate resolution.
//!
//! The locator only depends on the [`Geocoder`] trait. [`MapboxGeocoder`] is
//! the HTTP implementation used by the CLI; tests substitute their own.

mod response;

use std::future::Future;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Url};
use storefinder_core::{AppConfig, Coordinate};

use crate::error::GeocodeError;
use crate::retry::retry_with_backoff;
use response::GeocodeResponse;

const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/";

/// Characters a browser's `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Resolves a postal code (or free-text place) to a coordinate.
///
/// One call is one lookup; nothing is cached and a pending call cannot be
/// cancelled.
pub trait Geocoder {
    fn resolve(
        &self,
        postal_code: &str,
    ) -> impl Future<Output = Result<Coordinate, GeocodeError>>;
}

/// Client for the Mapbox forward-geocoding endpoint.
///
/// Use [`MapboxGeocoder::new`] for production or
/// [`MapboxGeocoder::with_base_url`] to point at a mock server in tests.
pub struct MapboxGeocoder {
    client: Client,
    access_token: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl MapboxGeocoder {
    /// Creates a geocoder pointed at the public Mapbox API, without retries.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodeError> {
        Self::with_base_url(access_token, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a geocoder with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the client cannot be constructed, or
    /// [`GeocodeError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| GeocodeError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            base_url: parsed,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Builds a geocoder from application config, including its retry policy.
    ///
    /// # Errors
    ///
    /// See [`MapboxGeocoder::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, GeocodeError> {
        Ok(Self::with_base_url(
            &config.geocoder_access_token,
            config.geocoder_timeout_secs,
            &config.user_agent,
            &config.geocoder_base_url,
        )?
        .with_retries(config.geocoder_max_retries, config.geocoder_backoff_ms))
    }

    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// `{base}/geocoding/v5/mapbox.places/{query}.json?access_token=…`
    fn build_url(&self, query: &str) -> Result<Url, GeocodeError> {
        let encoded = utf8_percent_encode(query, COMPONENT);
        let mut url = self
            .base_url
            .join(&format!("geocoding/v5/mapbox.places/{encoded}.json"))
            .map_err(|e| GeocodeError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token);
        Ok(url)
    }

    async fn lookup_once(&self, url: &Url, query: &str) -> Result<Coordinate, GeocodeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: GeocodeResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("geocode(query={query})"),
                source: e,
            })?;

        parsed.first_coordinate().ok_or_else(|| GeocodeError::NoMatch {
            query: query.to_owned(),
        })
    }
}

impl Geocoder for MapboxGeocoder {
    async fn resolve(&self, postal_code: &str) -> Result<Coordinate, GeocodeError> {
        let url = self.build_url(postal_code)?;
        tracing::debug!(postal_code, "geocoding postal code");
        let coordinate = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.lookup_once(&url, postal_code)
        })
        .await?;
        tracing::debug!(postal_code, %coordinate, "geocoded postal code");
        Ok(coordinate)
    }
}
