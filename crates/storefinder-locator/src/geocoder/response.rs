//! Wire types for the Mapbox forward-geocoding response.
//!
//! Only the first feature's position is consumed; everything else in the
//! payload is ignored.

use serde::Deserialize;
use storefinder_core::Coordinate;

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    #[serde(default)]
    pub features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeFeature {
    /// `[lng, lat]`.
    #[serde(default)]
    pub center: Option<[f64; 2]>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl GeocodeResponse {
    /// Position of the first feature, preferring `center` over point geometry.
    pub(crate) fn first_coordinate(&self) -> Option<Coordinate> {
        let first = self.features.first()?;
        if let Some(center) = first.center {
            return Some(Coordinate::from_lng_lat(center));
        }
        match first.geometry.as_ref()?.coordinates.as_slice() {
            [lng, lat, ..] => Some(Coordinate::new(*lat, *lng)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: serde_json::Value) -> GeocodeResponse {
        serde_json::from_value(body).expect("response should deserialize")
    }

    #[test]
    fn reads_center_of_first_feature() {
        let resp = parse(serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                { "center": [-117.16, 32.71], "place_name": "92101, San Diego" },
                { "center": [0.0, 0.0] }
            ]
        }));
        let c = resp.first_coordinate().unwrap();
        assert!((c.lat - 32.71).abs() < 1e-9);
        assert!((c.lng - (-117.16)).abs() < 1e-9);
    }

    #[test]
    fn falls_back_to_point_geometry() {
        let resp = parse(serde_json::json!({
            "features": [{ "geometry": { "type": "Point", "coordinates": [-118.24, 34.05] } }]
        }));
        let c = resp.first_coordinate().unwrap();
        assert!((c.lat - 34.05).abs() < 1e-9);
    }

    #[test]
    fn empty_or_missing_features_yield_none() {
        assert!(parse(serde_json::json!({ "features": [] }))
            .first_coordinate()
            .is_none());
        assert!(parse(serde_json::json!({})).first_coordinate().is_none());
    }
}
