use std::fmt;

use serde::{Deserialize, Serialize};

/// River-level metadata scraped from one guide page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct River {
    pub id: String,
    pub name: String,
    pub url: String,
    pub difficulty: Option<String>,
    pub gradient_general: Option<f64>,
    pub gradient_details: Option<String>,
    #[serde(default)]
    pub counties: Vec<String>,
    pub description: Option<String>,
}

impl River {
    pub fn new(id: &str, name: &str, url: &str) -> Self {
        River {
            id: id.to_string(),
            name: name.to_string(),
            url: url.to_string(),
            difficulty: None,
            gradient_general: None,
            gradient_details: None,
            counties: Vec::new(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MileMarker {
    pub river_id: String,
    pub mile: f64,
    pub description: String,
    pub raw_text: String,
    pub feature_type: FeatureType,
    #[serde(flatten)]
    pub flags: FeatureFlags,
    pub side: Option<Side>,
    pub highway: Option<String>,
    /// Reserved for downstream enrichment, never set by extraction.
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureType {
    Hazard,
    Access,
    Campground,
    Spring,
    Bridge,
    Creek,
    Landmark,
    Other,
}

impl FeatureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureType::Hazard => "hazard",
            FeatureType::Access => "access",
            FeatureType::Campground => "campground",
            FeatureType::Spring => "spring",
            FeatureType::Bridge => "bridge",
            FeatureType::Creek => "creek",
            FeatureType::Landmark => "landmark",
            FeatureType::Other => "other",
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bank of the river, facing downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Independent per-category flags. Several may be set on one marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub is_access_point: bool,
    pub is_campground: bool,
    pub has_spring: bool,
    pub has_bridge: bool,
    pub is_hazard: bool,
}

/// Result of classifying one description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureInfo {
    pub feature_type: FeatureType,
    pub side: Option<Side>,
    pub highway: Option<String>,
    pub flags: FeatureFlags,
}
