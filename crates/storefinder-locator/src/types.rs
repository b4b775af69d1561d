//! Domain types for the locator's feature index.

use storefinder_core::Coordinate;

/// A single geolocated store built from one page record.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Feature {
    /// Unique within a [`FeatureStore`](crate::FeatureStore).
    pub id: String,
    pub coordinate: Coordinate,
    /// Pre-rendered card markup, shown verbatim in popups.
    pub description: String,
    pub postal_code: String,
    /// Position of the source record on the page; indexes the side-panel entry.
    pub ordinal: usize,
}

/// A feature paired with its distance from a search origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceResult<'a> {
    pub feature: &'a Feature,
    pub distance_km: f64,
}
