use std::sync::LazyLock;

use regex::Regex;

use crate::model::{FeatureFlags, FeatureInfo, FeatureType, Side};

static HIGHWAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Hwy\.?|Highway|State Hwy\.?|U\.?S\.? Hwy\.?)\s*([A-Z0-9-]+)").unwrap()
});

const LEFT_PHRASES: &[&str] = &[" on left", " on the left", ", left"];
const RIGHT_PHRASES: &[&str] = &[" on right", " on the right", ", right"];

const HAZARD_KEYWORDS: &[&str] = &["dam", "portage", "do not run", "dangerous", "impassable"];
const ACCESS_KEYWORDS: &[&str] = &[
    "access", "put-in", "take-out", "takeout", "put in", "take out", "ramp", "landing",
];
const CAMPGROUND_KEYWORDS: &[&str] = &[
    "campground", "campsite", "camp site", "camping", "camp area", "recreation area",
];
const BRIDGE_KEYWORDS: &[&str] = &["bridge", "r.r.", "railroad"];
const CREEK_KEYWORDS: &[&str] = &["creek", "fork", "branch", "river", "hollow"];
const LANDMARK_KEYWORDS: &[&str] = &[
    "bluff", "cave", "rock", "island", "mountain", "falls", "shut-in",
];

/// How a precedence rung decides whether it applies.
#[derive(Clone, Copy)]
pub enum Rule {
    /// Applies when the derived flag is set.
    Flag(fn(&FeatureFlags) -> bool),
    /// Applies when the lowercased text contains any keyword.
    Keywords(&'static [&'static str]),
}

/// Feature-type precedence, highest first. The first rung that applies wins;
/// nothing matching means `Other`.
pub static PRECEDENCE: &[(FeatureType, Rule)] = &[
    (FeatureType::Hazard, Rule::Flag(|f: &FeatureFlags| f.is_hazard)),
    (FeatureType::Access, Rule::Flag(|f: &FeatureFlags| f.is_access_point)),
    (FeatureType::Campground, Rule::Flag(|f: &FeatureFlags| f.is_campground)),
    (FeatureType::Spring, Rule::Flag(|f: &FeatureFlags| f.has_spring)),
    (FeatureType::Bridge, Rule::Flag(|f: &FeatureFlags| f.has_bridge)),
    (FeatureType::Creek, Rule::Keywords(CREEK_KEYWORDS)),
    (FeatureType::Landmark, Rule::Keywords(LANDMARK_KEYWORDS)),
];

/// Classify a marker description. Total over any input.
pub fn classify_feature(text: &str) -> FeatureInfo {
    let lower = text.to_lowercase();
    let flags = derive_flags(&lower);

    FeatureInfo {
        feature_type: feature_type(&lower, &flags),
        side: detect_side(&lower),
        highway: HIGHWAY_RE.captures(text).map(|c| c[1].to_string()),
        flags,
    }
}

/// Flags are set per category regardless of which feature type wins.
pub fn derive_flags(lower: &str) -> FeatureFlags {
    FeatureFlags {
        is_hazard: contains_any(lower, HAZARD_KEYWORDS),
        is_access_point: contains_any(lower, ACCESS_KEYWORDS),
        is_campground: contains_any(lower, CAMPGROUND_KEYWORDS),
        has_spring: lower.contains("spring") && !lower.contains("spring branch"),
        has_bridge: contains_any(lower, BRIDGE_KEYWORDS),
    }
}

pub fn feature_type(lower: &str, flags: &FeatureFlags) -> FeatureType {
    PRECEDENCE
        .iter()
        .find(|(_, rule)| match rule {
            Rule::Flag(f) => f(flags),
            Rule::Keywords(kws) => contains_any(lower, kws),
        })
        .map(|(ft, _)| *ft)
        .unwrap_or(FeatureType::Other)
}

fn detect_side(lower: &str) -> Option<Side> {
    if contains_any(lower, LEFT_PHRASES) {
        Some(Side::Left)
    } else if contains_any(lower, RIGHT_PHRASES) {
        Some(Side::Right)
    } else {
        None
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
