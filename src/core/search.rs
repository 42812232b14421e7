//! Lightweight per-chat search index.

use super::models::SearchEntry;
use crate::Message;
use crate::parsing::{format_day, truncate_chars};

/// Builds search entries for every non-service message with text.
///
/// Dates are reduced to day precision and text is cut to `text_limit` code
/// points.
pub fn build_search_index(messages: &[Message], text_limit: usize) -> Vec<SearchEntry> {
    messages
        .iter()
        .filter(|m| !m.is_service && m.has_text())
        .map(|m| SearchEntry {
            id: m.message_id.clone(),
            dt: m.timestamp.as_ref().map(format_day),
            from: m.from_name.clone(),
            text: truncate_chars(&m.plain_text, text_limit).to_string(),
        })
        .collect()
}
