use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{FeatureType, MileMarker, River};

#[derive(Debug, Clone, Serialize)]
pub struct RiverEntry {
    pub metadata: River,
    pub mile_markers: Vec<MileMarker>,
}

/// Read-only view over one run's output: markers grouped under their river,
/// plus the per-type and access-point tallies.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub rivers: BTreeMap<String, RiverEntry>,
    pub feature_counts: BTreeMap<FeatureType, usize>,
    pub access_point_count: usize,
}

impl Catalog {
    /// Markers pointing at an unknown river id are tallied but not grouped.
    /// A repeated river id keeps the last metadata seen.
    pub fn build(rivers: &[River], markers: &[MileMarker]) -> Self {
        let mut entries: BTreeMap<String, RiverEntry> = rivers
            .iter()
            .map(|r| {
                (
                    r.id.clone(),
                    RiverEntry {
                        metadata: r.clone(),
                        mile_markers: Vec::new(),
                    },
                )
            })
            .collect();

        let mut feature_counts = BTreeMap::new();
        let mut access_point_count = 0;

        for m in markers {
            *feature_counts.entry(m.feature_type).or_insert(0) += 1;
            if m.flags.is_access_point {
                access_point_count += 1;
            }
            if let Some(entry) = entries.get_mut(&m.river_id) {
                entry.mile_markers.push(m.clone());
            }
        }

        for entry in entries.values_mut() {
            entry.mile_markers.sort_by(|a, b| a.mile.total_cmp(&b.mile));
        }

        Catalog {
            rivers: entries,
            feature_counts,
            access_point_count,
        }
    }

    pub fn marker_count(&self) -> usize {
        self.feature_counts.values().sum()
    }

    /// Feature counts, most frequent first.
    pub fn ranked_features(&self) -> Vec<(FeatureType, usize)> {
        let mut ranked: Vec<_> = self.feature_counts.iter().map(|(ft, n)| (*ft, *n)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}
