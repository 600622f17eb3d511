use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::Catalog;
use crate::model::{FeatureType, MileMarker, River};

pub const RIVERS_FILE: &str = "floatmissouri_rivers.json";
pub const MARKERS_FILE: &str = "floatmissouri_mile_markers.json";
pub const COMBINED_FILE: &str = "floatmissouri_combined.json";
pub const SUMMARY_FILE: &str = "floatmissouri_summary.json";

#[derive(Debug, Serialize, Deserialize)]
pub struct Summary {
    pub generated_at: DateTime<Utc>,
    pub river_count: usize,
    pub marker_count: usize,
    pub feature_counts: BTreeMap<FeatureType, usize>,
    pub access_point_count: usize,
}

impl Summary {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Summary {
            generated_at: Utc::now(),
            river_count: catalog.rivers.len(),
            marker_count: catalog.marker_count(),
            feature_counts: catalog.feature_counts.clone(),
            access_point_count: catalog.access_point_count,
        }
    }
}

/// Write all four run documents into `dir`. Returns the paths written.
pub fn write_all(
    dir: &Path,
    rivers: &[River],
    markers: &[MileMarker],
    catalog: &Catalog,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let written = vec![
        write_json(&dir.join(RIVERS_FILE), &rivers)?,
        write_json(&dir.join(MARKERS_FILE), &markers)?,
        write_json(&dir.join(COMBINED_FILE), &catalog.rivers)?,
        write_json(&dir.join(SUMMARY_FILE), &Summary::from_catalog(catalog))?,
    ];
    Ok(written)
}

/// Reload the rivers and markers of an earlier run.
pub fn load_run(dir: &Path) -> Result<(Vec<River>, Vec<MileMarker>)> {
    let rivers = read_json(&dir.join(RIVERS_FILE))?;
    let markers = read_json(&dir.join(MARKERS_FILE))?;
    Ok((rivers, markers))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Saved: {}", path.display());
    Ok(path.to_path_buf())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Malformed JSON in {}", path.display()))
}

pub fn print_summary(catalog: &Catalog) {
    println!("Total rivers:       {}", catalog.rivers.len());
    println!("Total mile markers: {}", catalog.marker_count());
    println!();
    println!("Mile markers by feature type:");
    println!("{}", "-".repeat(30));
    for (ft, count) in catalog.ranked_features() {
        println!("  {:<12} {:>6}", ft, count);
    }
    println!("\nTotal access points: {}", catalog.access_point_count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::markers;

    #[test]
    fn write_then_reload_rebuilds_same_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let mut river = River::new("current-river", "Current River", "u");
        river.counties = vec!["Dent".into(), "Shannon".into()];
        river.gradient_general = Some(3.4);
        let rivers = vec![river];
        let marks = markers::extract(
            "<p>26.1 Hwy 19 bridge on left</p><p>0.0 Montauk access and campground</p>",
            "current-river",
        );
        let catalog = Catalog::build(&rivers, &marks);

        let written = write_all(dir.path(), &rivers, &marks, &catalog).unwrap();
        assert_eq!(written.len(), 4);
        assert!(written.iter().all(|p| p.exists()));

        let (r2, m2) = load_run(dir.path()).unwrap();
        assert_eq!(r2, rivers);
        assert_eq!(m2, marks);

        let combined: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(COMBINED_FILE)).unwrap())
                .unwrap();
        let miles: Vec<f64> = combined["current-river"]["mile_markers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["mile"].as_f64().unwrap())
            .collect();
        assert_eq!(miles, vec![0.0, 26.1]);

        let summary: Summary =
            serde_json::from_str(&fs::read_to_string(dir.path().join(SUMMARY_FILE)).unwrap())
                .unwrap();
        assert_eq!(summary.marker_count, 2);
        assert_eq!(summary.access_point_count, 1);
        assert_eq!(summary.feature_counts[&FeatureType::Bridge], 1);
    }

    #[test]
    fn load_run_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_run(dir.path()).unwrap_err();
        assert!(err.to_string().contains(RIVERS_FILE));
    }
}
