//! Subcommand handlers.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use storefinder_core::{AppConfig, Coordinate, LocationRecord};
use storefinder_locator::{
    extract_page_records, proximity, validate_postal_code, FeatureStore, InMemoryMap,
    InMemoryPanel, InputMode, MapEvent, MapboxGeocoder, PopupSlot, SearchOutcome, StoreLocator,
};

use crate::console::{distance_line, feature_line, ConsoleNotifier};

pub(crate) const DEFAULT_RECORDS_PATH: &str = "./config/locations.json";

/// Width the in-memory map is mounted at; only picks the zoom level.
const CONSOLE_WIDTH_PX: u32 = 1024;

/// Where location records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RecordSource {
    /// A records file, or the configured default when `None`.
    File(Option<PathBuf>),
    /// An HTML page carrying the records in a script block.
    Page(PathBuf),
}

impl RecordSource {
    pub(crate) fn from_args(records: Option<PathBuf>, page: Option<PathBuf>) -> Self {
        match page {
            Some(page) => RecordSource::Page(page),
            None => RecordSource::File(records),
        }
    }

    fn load(&self, fallback: &Path) -> anyhow::Result<Vec<LocationRecord>> {
        match self {
            RecordSource::File(path) => {
                let path = path.as_deref().unwrap_or(fallback);
                Ok(storefinder_core::load_records(path)?)
            }
            RecordSource::Page(path) => {
                let html = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read page {}", path.display()))?;
                Ok(extract_page_records(&html)?)
            }
        }
    }
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSource::File(Some(path)) => write!(f, "{}", path.display()),
            RecordSource::File(None) => f.write_str("default records file"),
            RecordSource::Page(path) => write!(f, "page {}", path.display()),
        }
    }
}

fn build_store(source: &RecordSource, fallback: &Path) -> anyhow::Result<FeatureStore> {
    let records = source.load(fallback)?;
    let (store, report) = FeatureStore::build(&records);
    if !report.skipped.is_empty() || !report.duplicates.is_empty() {
        tracing::warn!(
            %source,
            skipped = report.skipped.len(),
            duplicates = report.duplicates.len(),
            "some location records were not used"
        );
    }
    if store.is_empty() {
        tracing::warn!(%source, "no usable location records");
    }
    Ok(store)
}

/// Geocode `postal_code` and print the stores within `radius` miles.
///
/// # Errors
///
/// Returns an error if the records cannot be loaded, the geocoder cannot be
/// built, or the search does not produce a result set.
pub(crate) async fn run_search(
    config: &AppConfig,
    source: &RecordSource,
    postal_code: &str,
    radius: Option<f64>,
    select: Option<&str>,
) -> anyhow::Result<()> {
    let store = Arc::new(build_store(source, &config.records_path)?);
    let geocoder = MapboxGeocoder::from_config(config)?;
    let locator = StoreLocator::new(
        config.locator.clone(),
        store,
        InMemoryMap::default(),
        InMemoryPanel::default(),
        geocoder,
        ConsoleNotifier,
        InputMode::Pointer,
    );
    locator.mount(CONSOLE_WIDTH_PX);

    let radius = radius.unwrap_or(config.locator.default_radius_miles);
    match locator.search(postal_code, radius).await {
        SearchOutcome::Applied(count) => {
            println!("{count} store(s) within {radius} miles of {postal_code}:");
            for feature in locator.map().state().visible() {
                println!("  {}", feature_line(feature));
            }
        }
        // The notice has already been printed.
        SearchOutcome::NoResults => return Ok(()),
        other => anyhow::bail!("search for \"{postal_code}\" did not complete: {other:?}"),
    }

    if let Some(id) = select {
        locator.dispatch(&MapEvent::click(id));
        let map = locator.map();
        let popup = map
            .display()
            .popup(PopupSlot::Selected)
            .ok_or_else(|| anyhow::anyhow!("store '{id}' is not in the results"))?;
        println!();
        println!("{}", popup.html);
    }

    Ok(())
}

/// Print the stores within `radius` miles of a coordinate, nearest first.
///
/// # Errors
///
/// Returns an error for an out-of-range coordinate, a non-positive radius, or
/// unreadable records.
pub(crate) fn run_nearby(
    source: &RecordSource,
    lat: f64,
    lng: f64,
    radius: f64,
) -> anyhow::Result<()> {
    let origin = Coordinate::new(lat, lng);
    if !origin.is_valid() {
        anyhow::bail!("coordinate {origin} is out of range");
    }
    if !radius.is_finite() || radius <= 0.0 {
        anyhow::bail!("radius must be a positive number of miles, got {radius}");
    }

    let store = build_store(source, Path::new(DEFAULT_RECORDS_PATH))?;
    let results = proximity::rank(origin, radius, &store);
    if results.is_empty() {
        println!("No locations found within {radius} miles of {origin}.");
        return Ok(());
    }
    for result in &results {
        println!("{}", distance_line(result));
    }
    Ok(())
}

/// Print the master set in page order.
///
/// # Errors
///
/// Returns an error if the records cannot be loaded.
pub(crate) fn run_list(source: &RecordSource) -> anyhow::Result<()> {
    let store = build_store(source, Path::new(DEFAULT_RECORDS_PATH))?;
    for feature in &store {
        println!("{}", feature_line(feature));
    }
    println!("{} store(s)", store.len());
    Ok(())
}

/// # Errors
///
/// Returns an error when `postal_code` is blank or not a US postal code.
pub(crate) fn run_check(postal_code: &str) -> anyhow::Result<()> {
    let code = validate_postal_code(postal_code, true)?;
    println!("{code}: valid");
    Ok(())
}
