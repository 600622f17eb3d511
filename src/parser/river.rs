use std::sync::LazyLock;

use regex::Regex;

use crate::model::River;

static DIFFICULTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Difficulty:\s*([IVX,\s]+(?:occasionally\s+[IVX]+)?)").unwrap()
});
static GRADIENT_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Gradients?:").unwrap());
static COUNTIES_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Counties").unwrap());
static GENERAL_GRADIENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)general\s*[-–]\s*(\d+\.?\d*)").unwrap());
static COUNTIES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Counties?:\s*([A-Za-z,\s]+?)(?:\.|$|\n)").unwrap());

const MAX_DESCRIPTION_CHARS: usize = 500;

/// Identity of the page a river was scraped from.
pub struct PageMeta<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub url: &'a str,
    pub og_description: Option<&'a str>,
}

/// Pull river-level attributes out of the page's plain text. Every field is
/// optional; a page with none of the labels still yields a `River`.
pub fn extract(text: &str, meta: &PageMeta) -> River {
    let mut river = River::new(meta.id, meta.name, meta.url);

    river.difficulty = DIFFICULTY_RE
        .captures(text)
        .map(|c| c[1].trim().to_string())
        .filter(|d| !d.is_empty());

    if let Some(details) = gradient_block(text) {
        river.gradient_general = GENERAL_GRADIENT_RE
            .captures(&details)
            .and_then(|c| c[1].parse::<f64>().ok());
        river.gradient_details = Some(details);
    }

    if let Some(caps) = COUNTIES_RE.captures(text) {
        river.counties = caps[1]
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect();
    }

    river.description = meta
        .og_description
        .map(|d| d.chars().take(MAX_DESCRIPTION_CHARS).collect());

    river
}

/// Everything between the gradient label and the next counties label.
fn gradient_block(text: &str) -> Option<String> {
    let label = GRADIENT_LABEL_RE.find(text)?;
    let rest = &text[label.end()..];
    let end = COUNTIES_LABEL_RE.find(rest).map(|m| m.start()).unwrap_or(rest.len());
    let block = rest[..end].trim();
    if block.is_empty() {
        None
    } else {
        Some(block.to_string())
    }
}
