//! Text normalization helpers.

use std::sync::LazyLock;

use regex::Regex;

/// Matches synthetic day separators such as `7 August 2021`.
static DATE_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,2} [A-Za-z]+ [0-9]{4}$").expect("date heading pattern is valid")
});

/// Collapses every whitespace run into a single space and trims both ends.
///
/// # Example
///
/// ```rust
/// use chatpage::parsing::normalize_text;
///
/// assert_eq!(normalize_text("  Hello\n\t world  "), "Hello world");
/// assert_eq!(normalize_text("\u{a0}\n"), "");
/// ```
pub fn normalize_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns `true` if `text` is a whole-string calendar heading.
///
/// The export inserts these as service messages between days; they carry no
/// content of their own.
pub fn is_date_heading(text: &str) -> bool {
    DATE_HEADING_RE.is_match(text)
}

/// Returns the prefix of `s` holding at most `max_chars` code points.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
