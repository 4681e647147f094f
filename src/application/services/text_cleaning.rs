use std::sync::LazyLock;

use regex::Regex;

/// Navigation and promotional phrases that mark scraped boilerplate.
pub const SPAM_PHRASES: [&str; 7] = [
    "click here",
    "follow us",
    "back to",
    "prize",
    "winner",
    "submit",
    "feature",
];

const PROMPT_ECHO_PREFIXES: [&str; 2] = ["abstract —", "write an academic abstract"];
const SUPPORT_HOTLINE: &str = "for confidential support";

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:https?://|www\.)\S*").unwrap());
static HANDLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\w+").unwrap());
static SPAM_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:click here|follow us|back to|prize|winner|submit|feature).*").unwrap()
});
static HYPHEN_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<prefix>\w)-[ \t]*\r?\n[ \t]*(?P<suffix>\w)").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SENTENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]*").unwrap());
static FENCED_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`]*`").unwrap());

/// Line-level boilerplate test: prompt echoes, hotline footers, links,
/// handles and spam phrases.
pub fn is_meta_line(line: &str) -> bool {
    let lowered = line.trim().to_lowercase();

    PROMPT_ECHO_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
        || lowered.contains(SUPPORT_HOTLINE)
        || URL.is_match(&lowered)
        || HANDLE.is_match(&lowered)
        || SPAM_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}

/// Removes links, handles and everything after a spam phrase on the same line.
pub fn strip_boilerplate(text: &str) -> String {
    let without_handles = HANDLE.replace_all(text, "");
    let without_urls = URL.replace_all(&without_handles, "");
    SPAM_TAIL.replace_all(&without_urls, "").into_owned()
}

/// Cleans raw extracted text while keeping one line per source line, so
/// heading detection still works downstream. Never grows the input.
pub fn normalize_text(raw: &str) -> String {
    let joined = HYPHEN_BREAK.replace_all(raw, "$prefix$suffix");

    joined
        .lines()
        .filter(|line| !is_meta_line(line))
        .map(|line| collapse_whitespace(&strip_boilerplate(line)))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Drops trailing separators and terminal punctuation, then closes with a period.
pub fn ensure_period(text: &str) -> String {
    let trimmed = text
        .trim_end_matches([' ', ',', ';', ':', '\n'])
        .trim_end_matches(['.', '!', '?']);
    format!("{}.", trimmed)
}

/// Cuts everything after the last sentence terminator.
pub fn trim_trailing_fragment(text: &str) -> &str {
    match text.rfind(['.', '!', '?']) {
        Some(idx) => &text[..=idx],
        None => text,
    }
}

pub fn ensure_terminated(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.ends_with(['.', '!', '?']) {
        trimmed.to_string()
    } else {
        format!("{}.", trimmed)
    }
}

/// Sentences with their terminators, trimmed; empty pieces are skipped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .collect()
}

/// The first `count` ". "-separated sentences, period-terminated.
pub fn leading_sentences(text: &str, count: usize) -> Option<String> {
    let extract = text
        .split(". ")
        .take(count)
        .collect::<Vec<_>>()
        .join(". ");
    let extract = extract.trim();

    if extract.is_empty() {
        return None;
    }

    if extract.ends_with('.') {
        Some(extract.to_string())
    } else {
        Some(format!("{}.", extract))
    }
}

/// Flashcard input cleanup: code spans removed, whitespace flattened.
pub fn strip_code_and_collapse(text: &str) -> String {
    let without_blocks = FENCED_CODE.replace_all(text, " ");
    let without_inline = INLINE_CODE.replace_all(&without_blocks, " ");
    collapse_whitespace(&without_inline)
}
