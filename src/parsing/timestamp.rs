//! Parsing of the export's fixed-format timestamps.
//!
//! Message date nodes carry a `title` attribute such as `07.08.2021 14:05:09`
//! (day first, local wall-clock time, no offset). Anything that deviates from
//! that exact shape is treated as "no timestamp" rather than guessed at.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

static EXPORT_DATETIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}\.[0-9]{2}\.[0-9]{4} [0-9]{2}:[0-9]{2}:[0-9]{2}$")
        .expect("export datetime pattern is valid")
});

const EXPORT_DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";
const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parses an export timestamp (`DD.MM.YYYY HH:MM:SS`).
///
/// Returns `None` for absent input, surrounding whitespace, and any value that
/// is not a valid calendar date and time in exactly that format.
///
/// # Example
///
/// ```rust
/// use chatpage::parsing::{format_timestamp, parse_export_timestamp};
///
/// let ts = parse_export_timestamp(Some("07.08.2021 14:05:09")).unwrap();
/// assert_eq!(format_timestamp(&ts), "2021-08-07T14:05:09");
///
/// assert!(parse_export_timestamp(Some(" 07.08.2021 14:05:09")).is_none());
/// assert!(parse_export_timestamp(None).is_none());
/// ```
pub fn parse_export_timestamp(raw: Option<&str>) -> Option<NaiveDateTime> {
    let raw = raw?;
    if !EXPORT_DATETIME_RE.is_match(raw) {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, EXPORT_DATETIME_FORMAT).ok()
}

/// Canonical ISO-8601 form used in manifests (`2021-08-07T14:05:09`).
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(CANONICAL_FORMAT).to_string()
}

/// Day-precision form used in the search index (`2021-08-07`).
pub fn format_day(ts: &NaiveDateTime) -> String {
    ts.format(DAY_FORMAT).to_string()
}
