//! Turns raw page records into the deduplicated master set.
//!
//! Records without usable coordinates or an identifier are skipped without
//! raising anything. When two records share an identifier the first one wins.
//! Both outcomes are listed in the [`IngestReport`] for logging only.

use std::collections::HashSet;

use storefinder_core::{Coordinate, LocationRecord};

use crate::store::FeatureStore;
use crate::types::Feature;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingCoordinate,
    /// Numeric but outside the latitude/longitude ranges.
    OutOfRange,
    MissingIdentifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub position: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateRecord {
    pub position: usize,
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub accepted: usize,
    pub skipped: Vec<SkippedRecord>,
    pub duplicates: Vec<DuplicateRecord>,
}

#[derive(Debug, Default)]
pub struct Ingestor;

impl Ingestor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build the master set from `records` in page order.
    ///
    /// Each feature's `ordinal` is its record's index in `records`, counting
    /// skipped and duplicate records, so it always lines up with the page's
    /// side-panel entries.
    #[must_use]
    pub fn ingest(&self, records: &[LocationRecord]) -> (FeatureStore, IngestReport) {
        let mut report = IngestReport::default();
        let mut seen = HashSet::new();
        let mut features = Vec::with_capacity(records.len());

        for (position, record) in records.iter().enumerate() {
            let feature = match build_feature(position, record) {
                Ok(feature) => feature,
                Err(reason) => {
                    tracing::debug!(position, ?reason, "skipping location record");
                    report.skipped.push(SkippedRecord { position, reason });
                    continue;
                }
            };

            if !seen.insert(feature.id.clone()) {
                tracing::debug!(position, id = %feature.id, "dropping duplicate location id");
                report.duplicates.push(DuplicateRecord {
                    position,
                    id: feature.id,
                });
                continue;
            }

            features.push(feature);
        }

        report.accepted = features.len();
        tracing::info!(
            accepted = report.accepted,
            skipped = report.skipped.len(),
            duplicates = report.duplicates.len(),
            "built feature store"
        );

        (FeatureStore::from_features(features), report)
    }
}

fn build_feature(position: usize, record: &LocationRecord) -> Result<Feature, SkipReason> {
    let (Some(lat), Some(lng)) = (record.latitude_value(), record.longitude_value()) else {
        return Err(SkipReason::MissingCoordinate);
    };
    let coordinate = Coordinate::new(lat, lng);
    if !coordinate.is_valid() {
        return Err(SkipReason::OutOfRange);
    }
    let id = record.id_value().ok_or(SkipReason::MissingIdentifier)?;

    Ok(Feature {
        id,
        coordinate,
        description: record.description.clone().unwrap_or_default(),
        postal_code: record.postal_code_value(),
        ordinal: position,
    })
}
