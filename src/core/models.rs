//! Output data models: conversations, pages, manifests and search entries.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::Message;

/// File name of the per-chat search index, relative to the chat's data dir.
pub const SEARCH_FILE: &str = "search.json";

/// One exported conversation with all of its messages in encounter order.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    /// Directory name of the chat (`chat_001`)
    pub chat_id: String,
    /// Resolved display title
    pub title: String,
    /// Messages as encountered across the chat's documents, never re-sorted
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new(chat_id: impl Into<String>, title: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            chat_id: chat_id.into(),
            title: title.into(),
            messages,
        }
    }

    /// Number of messages that were not forwarded from elsewhere.
    pub fn original_message_count(&self) -> usize {
        self.messages.iter().filter(|m| !m.is_forwarded()).count()
    }
}

/// Description of one chunk file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// `chunk_0001.json`, `chunk_0002.json`, ...
    pub filename: String,
    pub message_count: usize,
    pub start_id: String,
    pub end_id: String,
    /// Earliest timestamp in the chunk, ignoring untimed messages
    pub start_date: Option<NaiveDateTime>,
    /// Latest timestamp in the chunk, ignoring untimed messages
    pub end_date: Option<NaiveDateTime>,
}

/// Per-chat manifest written to `data/<chat_id>/manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatManifest {
    pub chat_id: String,
    pub title: String,
    /// Messages without `forwarded_from`; pages and search still include forwards
    pub message_count: usize,
    pub chunk_count: usize,
    pub chunks: Vec<Page>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub search_file: String,
}

impl ChatManifest {
    /// Condensed entry for the global manifest.
    pub fn summary(&self) -> ChatSummary {
        ChatSummary {
            chat_id: self.chat_id.clone(),
            title: self.title.clone(),
            message_count: self.message_count,
            chunk_count: self.chunk_count,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Entry of the global manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub chat_id: String,
    pub title: String,
    pub message_count: usize,
    pub chunk_count: usize,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}

/// Global manifest written to `data/manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalManifest {
    /// Sorted by `message_count`, largest first
    pub chats: Vec<ChatSummary>,
    pub total_chats: usize,
    pub total_messages: usize,
    pub generated_at: NaiveDateTime,
}

/// One searchable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub id: String,
    /// Day of the message (`2021-08-07`)
    pub dt: Option<String>,
    pub from: Option<String>,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_message_count_excludes_forwards() {
        let conv = Conversation::new(
            "chat_001",
            "Chat",
            vec![
                Message::new("message1").with_text("a"),
                Message::new("message2").with_forwarded_from("Channel"),
                Message::new("message3").service(),
            ],
        );
        assert_eq!(conv.original_message_count(), 2);
    }

    #[test]
    fn test_summary_copies_fields() {
        let manifest = ChatManifest {
            chat_id: "chat_001".into(),
            title: "Chat".into(),
            message_count: 5,
            chunk_count: 1,
            chunks: vec![],
            start_date: None,
            end_date: None,
            search_file: SEARCH_FILE.into(),
        };
        let summary = manifest.summary();
        assert_eq!(summary.chat_id, "chat_001");
        assert_eq!(summary.message_count, 5);
        assert_eq!(summary.chunk_count, 1);
    }

    #[test]
    fn test_search_entry_serialization_keys() {
        let entry = SearchEntry {
            id: "message1".into(),
            dt: Some("2021-08-07".into()),
            from: None,
            text: "hi".into(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"id":"message1","dt":"2021-08-07","from":null,"text":"hi"}"#);
    }
}
