const PREVIEW_CHARS: usize = 200;

const SECRET_MARKERS: [(&str, &str); 4] = [
    ("Bearer ", "Bearer [REDACTED]"),
    ("api_key=", "api_key=[REDACTED]"),
    ("password=", "password=[REDACTED]"),
    ("token=", "token=[REDACTED]"),
];

/// Log-safe rendering of user text: the first characters plus the total
/// length, with credentials masked.
pub fn preview(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total = trimmed.chars().count();
    let visible = if total > PREVIEW_CHARS {
        let head: String = trimmed.chars().take(PREVIEW_CHARS).collect();
        format!("{head}... ({total} chars total)")
    } else {
        trimmed.to_string()
    };

    redact_secrets(&visible)
}

fn redact_secrets(text: &str) -> String {
    let mut result = text.to_string();
    for (marker, replacement) in SECRET_MARKERS {
        if let Some(idx) = result.find(marker) {
            let value_start = idx + marker.len();
            let end = result[value_start..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| value_start + i)
                .unwrap_or(result.len());
            result = format!("{}{}{}", &result[..idx], replacement, &result[end..]);
        }
    }
    result
}
