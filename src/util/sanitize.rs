use regex::Regex;
use std::sync::LazyLock;

static ANSI_CSI: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;?]*[ -/]*[@-~]").ok());

// Remove ANSI escape sequences and non-printable control chars from untrusted text
// Collapse newlines/tabs to spaces and truncate to a reasonable length for terminal display.
pub fn sanitize_for_terminal(s: &str) -> String {
    let no_ansi = match ANSI_CSI.as_ref() {
        Some(r) => r.replace_all(s, "").into_owned(),
        None => s.to_string(),
    };

    let collapsed = no_ansi.replace(['\n', '\r', '\t'], " ");
    let cleaned: String = collapsed
        .chars()
        .filter(|ch| !ch.is_control())
        .collect();

    // Truncate to 200 chars to avoid overly wide UI
    cleaned.trim().chars().take(200).collect()
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
