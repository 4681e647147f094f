use std::sync::LazyLock;

use regex::Regex;

// Heading-shaped line: capitalised, 4-40 chars of letters, digits, spaces, hyphens.
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[A-Z][A-Za-z0-9\- ]{3,39}$").unwrap());

/// Splits text at heading-like lines. Each heading opens the section that
/// follows it; text before the first heading is its own section. Text
/// without headings comes back as a single section.
///
/// Best effort: body lines that look like headings also split.
pub fn split_sections(text: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut last_start = 0;

    for heading in HEADING.find_iter(text) {
        let start = heading.start();
        if start > last_start {
            push_section(&mut sections, &text[last_start..start]);
        }
        last_start = start;
    }

    if last_start < text.len() {
        push_section(&mut sections, &text[last_start..]);
    }

    if sections.is_empty() {
        sections.push(text.to_string());
    }

    sections
}

fn push_section(sections: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        sections.push(trimmed.to_string());
    }
}
