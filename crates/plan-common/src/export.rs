//! Plain-text export of a generated plan.
//!
//! Prefers the "DOWNLOADABLE TEXT VERSION" section the prompt asks the model
//! to produce. When the model left it out, falls back to stripping markdown
//! from the whole response.

use std::sync::LazyLock;

use regex::Regex;

pub const TEXT_EXPORT_FILENAME: &str = "study-plan.txt";

static DOWNLOADABLE_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)DOWNLOADABLE TEXT VERSION[:\s]*\n([\s\S]*?)(?:\n\n---|\n\n\*\*|$)")
        .expect("static regex")
});

/// Markdown rewrites applied in order when no downloadable section exists.
static MARKDOWN_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\*\*(.*?)\*\*", "$1"),
        (r"\*(.*?)\*", "$1"),
        (r"#{1,6}\s", ""),
        (r"\[([^\]]+)\]\([^)]+\)", "$1"),
        (r"\|[^\n]*\|", ""),
        (r"[-=]{3,}", ""),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).expect("static regex"), replacement))
    .collect()
});

pub fn extract_plain_text(content: &str) -> String {
    if let Some(section) = DOWNLOADABLE_SECTION
        .captures(content)
        .and_then(|c| c.get(1))
    {
        return section.as_str().trim().to_string();
    }

    MARKDOWN_RULES
        .iter()
        .fold(content.to_string(), |text, (re, replacement)| {
            re.replace_all(&text, *replacement).into_owned()
        })
        .trim()
        .to_string()
}
