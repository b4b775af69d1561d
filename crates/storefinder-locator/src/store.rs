//! The master set of features, built once and never edited.

use std::collections::HashMap;

use storefinder_core::LocationRecord;

use crate::ingest::{IngestReport, Ingestor};
use crate::types::Feature;

/// Ordered, deduplicated features. Insertion order is page order.
///
/// There is no way to add or remove features after construction; searches
/// produce filtered copies instead.
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    features: Vec<Feature>,
    by_id: HashMap<String, usize>,
}

impl FeatureStore {
    /// Ingest `records` and return the store together with what was dropped.
    #[must_use]
    pub fn build(records: &[LocationRecord]) -> (Self, IngestReport) {
        Ingestor::new().ingest(records)
    }

    pub(crate) fn from_features(features: Vec<Feature>) -> Self {
        let by_id = features
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id.clone(), i))
            .collect();
        Self { features, by_id }
    }

    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.by_id.get(id).map(|&i| &self.features[i])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl<'a> IntoIterator for &'a FeatureStore {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
