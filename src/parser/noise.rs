/// Substrings that mark a regex hit as page chrome (scripts, styles, plugin
/// markup) rather than guide prose. Matched against the lowercased text.
static NOISE_TOKENS: &[&str] = &[
    "http", "woo", "plugin", "responsive", "schema", "yoast",
    "mobile", "slider", "wordpress", "jquery", "css", "font",
    "script", "widget", "theme", "ajax", "admin", "content",
    "px", "em", "rem", "%", "rgb", "rgba", "var(", "calc(",
    "function", "return", "const", "let", "var ", "{", "}",
    "true", "false", "null", "undefined",
];

const MIN_DESCRIPTION_CHARS: usize = 10;

/// Whether a candidate description reads like prose worth keeping.
pub fn is_valid_description(desc: &str) -> bool {
    if desc.chars().count() < MIN_DESCRIPTION_CHARS {
        return false;
    }
    if desc.starts_with('-') {
        return false;
    }
    let lower = desc.to_lowercase();
    !NOISE_TOKENS.iter().any(|t| lower.contains(t))
}
