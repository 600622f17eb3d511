use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::classify::classify_feature;
use super::noise::is_valid_description;
use crate::model::MileMarker;

// An ASCII mile figure, then everything up to the next tag opener.
static MILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+\.[0-9]+)\s+([^<]+)").unwrap());

const DEDUP_PREFIX_CHARS: usize = 50;

/// Scan raw page markup for `<mile> <description>` runs.
///
/// Returns markers sorted by mile, with at most one marker per
/// (mile, description prefix) on the page.
pub fn extract(html: &str, river_id: &str) -> Vec<MileMarker> {
    let mut seen: HashSet<(u64, String)> = HashSet::new();
    let mut markers = Vec::new();

    for caps in MILE_RE.captures_iter(html) {
        let mile_str = &caps[1];
        let desc = caps[2].trim();

        if !is_valid_description(desc) {
            continue;
        }

        let Ok(mile) = mile_str.parse::<f64>() else {
            continue;
        };
        if !mile.is_finite() {
            continue;
        }

        let key = (
            mile.to_bits(),
            desc.chars().take(DEDUP_PREFIX_CHARS).collect::<String>(),
        );
        if !seen.insert(key) {
            continue;
        }

        let info = classify_feature(desc);
        markers.push(MileMarker {
            river_id: river_id.to_string(),
            mile,
            description: desc.to_string(),
            raw_text: format!("{} {}", mile_str, desc),
            feature_type: info.feature_type,
            flags: info.flags,
            side: info.side,
            highway: info.highway,
            notes: None,
        });
    }

    markers.sort_by(|a, b| a.mile.total_cmp(&b.mile));
    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FeatureType, Side};

    #[test]
    fn access_ramp_scenario() {
        let m = extract("12.50 Access ramp on right", "current-river");
        assert_eq!(m.len(), 1);
        assert_eq!(m[0].mile, 12.5);
        assert_eq!(m[0].river_id, "current-river");
        assert_eq!(m[0].side, Some(Side::Right));
        assert_eq!(m[0].feature_type, FeatureType::Access);
        assert!(m[0].flags.is_access_point);
        assert_eq!(m[0].raw_text, "12.50 Access ramp on right");
        assert!(m[0].notes.is_none());
    }

    #[test]
    fn spring_scenario() {
        let m = extract("3.00 Big Spring", "current-river");
        assert_eq!(m.len(), 1);
        assert!(m[0].flags.has_spring);
        assert_eq!(m[0].feature_type, FeatureType::Spring);
    }

    #[test]
    fn dam_scenario() {
        let m = extract("45.10 Low water dam - portage required", "r");
        assert_eq!(m.len(), 1);
        assert!(m[0].flags.is_hazard);
        assert!(!m[0].flags.is_access_point);
        assert_eq!(m[0].feature_type, FeatureType::Hazard);
    }

    #[test]
    fn highway_bridge_scenario() {
        let m = extract("7.25 Hwy 19 bridge on left", "r");
        assert_eq!(m.len(), 1);
        assert_eq!(m[0].side, Some(Side::Left));
        assert_eq!(m[0].highway.as_deref(), Some("19"));
        assert!(m[0].flags.has_bridge);
        assert_eq!(m[0].feature_type, FeatureType::Bridge);
    }

    #[test]
    fn script_noise_yields_nothing() {
        assert!(extract("1.0 function() { return true; }", "r").is_empty());
        assert!(extract("<script>var x = 2.5 function() { return true; }</script>", "r").is_empty());
    }

    #[test]
    fn description_stops_at_next_tag() {
        let m = extract("<p>10.4 Gravel bar on the right<br>more</p>", "r");
        assert_eq!(m.len(), 1);
        assert_eq!(m[0].description, "Gravel bar on the right");
    }

    #[test]
    fn sorted_by_mile() {
        let html = "<p>20.5 Mouth of Sinking Creek</p><p>2.25 Tall bluff on left</p><p>11.0 Gravel bar and riffle</p>";
        let miles: Vec<f64> = extract(html, "r").iter().map(|m| m.mile).collect();
        assert_eq!(miles, vec![2.25, 11.0, 20.5]);
    }

    #[test]
    fn duplicates_collapse() {
        let html = "<li>5.50 Cedar Grove access on left</li><li>5.50 Cedar Grove access on left</li>";
        assert_eq!(extract(html, "r").len(), 1);
    }

    #[test]
    fn dedup_uses_numeric_mile() {
        let html = "<li>5.50 Cedar Grove access on left</li><li>5.5 Cedar Grove access on left</li>";
        let m = extract(html, "r");
        assert_eq!(m.len(), 1);
        assert_eq!(m[0].raw_text, "5.50 Cedar Grove access on left");
    }

    #[test]
    fn dedup_only_compares_first_fifty_chars() {
        let base = "Long stretch of gravel bar that keeps going along the bank";
        assert!(base.chars().count() >= 50);
        let html = format!("<p>8.0 {} and on</p><p>8.0 {} forever</p>", base, base);
        assert_eq!(extract(&html, "r").len(), 1);
    }

    #[test]
    fn same_text_at_different_miles_is_kept() {
        let html = "<p>1.0 Gravel bar on the right</p><p>2.0 Gravel bar on the right</p>";
        assert_eq!(extract(html, "r").len(), 2);
    }

    #[test]
    fn idempotent() {
        let html = "<p>3.1 Big Spring on left</p><p>1.2 Hwy 19 bridge on left</p><p>3.1 Alley Spring access</p>";
        assert_eq!(extract(html, "r"), extract(html, "r"));
    }

    #[test]
    fn equal_miles_keep_page_order() {
        let html = "<p>4.0 Upper gravel bar on left</p><p>4.0 Lower gravel bar on right</p>";
        let m = extract(html, "r");
        assert_eq!(m[0].description, "Upper gravel bar on left");
        assert_eq!(m[1].description, "Lower gravel bar on right");
    }

    #[test]
    fn every_marker_passes_the_noise_filter() {
        let html = "<p>1.5 -dash leading text here</p><p>2.5 short</p><p>3.5 Rocky Falls shut-in on right</p>";
        let m = extract(html, "r");
        assert_eq!(m.len(), 1);
        for marker in &m {
            assert!(marker.description.chars().count() >= 10);
            assert!(!marker.description.starts_with('-'));
        }
    }

    #[test]
    fn non_ascii_digits_are_not_miles() {
        let html = "<p>\u{0663}.\u{0665} Gravel bar on the right</p><p>4.5 Gravel bar on the left</p>";
        let m = extract(html, "r");
        assert_eq!(m.len(), 1);
        assert_eq!(m[0].mile, 4.5);
    }

    #[test]
    fn overflowing_mile_is_dropped() {
        let html = format!("<p>{}.0 Gravel bar on the right</p>", "9".repeat(400));
        assert!(extract(&html, "r").is_empty());
    }

    #[test]
    fn extracted_markers_survive_json() {
        let html = format!(
            "<p>{}.0 Gravel bar on the right</p><p>2.5 Gravel bar on the left</p>",
            "9".repeat(400)
        );
        let m = extract(&html, "r");
        let json = serde_json::to_string(&m).unwrap();
        let back: Vec<MileMarker> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn empty_input() {
        assert!(extract("", "r").is_empty());
        assert!(extract("no miles here at all", "r").is_empty());
    }
}
