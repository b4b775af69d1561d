//! Radius search over the master set.
//!
//! Distances are great-circle (haversine) on a sphere of radius
//! [`EARTH_RADIUS_KM`]. The radius boundary is inclusive.

use storefinder_core::Coordinate;

use crate::store::FeatureStore;
use crate::types::{DistanceResult, Feature};

pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const KM_PER_MILE: f64 = 1.609_34;

#[must_use]
pub fn miles_to_km(miles: f64) -> f64 {
    miles * KM_PER_MILE
}

/// Great-circle distance between two coordinates in kilometres.
#[must_use]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push h just past 1 for near-antipodal pairs.
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Features within `radius_miles` of `origin`, nearest first, with distances.
///
/// Ties keep page order. A negative or NaN radius matches nothing.
#[must_use]
pub fn rank(
    origin: Coordinate,
    radius_miles: f64,
    source: &FeatureStore,
) -> Vec<DistanceResult<'_>> {
    let radius_km = miles_to_km(radius_miles);
    let mut kept: Vec<DistanceResult<'_>> = source
        .iter()
        .map(|feature| DistanceResult {
            feature,
            distance_km: haversine_km(origin, feature.coordinate),
        })
        .filter(|r| r.distance_km <= radius_km)
        .collect();

    // Stable sort; the store is already in ordinal order.
    kept.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then(a.feature.ordinal.cmp(&b.feature.ordinal))
    });
    kept
}

/// Like [`rank`] but returns owned features, ready to hand to the map.
#[must_use]
pub fn filter(origin: Coordinate, radius_miles: f64, source: &FeatureStore) -> Vec<Feature> {
    rank(origin, radius_miles, source)
        .into_iter()
        .map(|r| r.feature.clone())
        .collect()
}

#[cfg(test)]
#[path = "proximity_test.rs"]
mod tests;
