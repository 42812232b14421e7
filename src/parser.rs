//! Conversation assembly from a chat directory.
//!
//! A chat directory holds a base document `messages.html` and, for long
//! chats, numbered continuations `messages2.html`, `messages3.html`, ...
//! [`ExportParser`] reads them in numeric order, threads one
//! [`SenderState`] through all of them, and resolves the chat's title.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> chatpage::Result<()> {
//! use chatpage::parser::ExportParser;
//! use std::path::Path;
//!
//! let parser = ExportParser::new().with_title_override("chat_002", "Project notes");
//!
//! if let Some(conversation) = parser.parse_chat(Path::new("Files/chats/chat_002"))? {
//!     println!("{}: {} messages", conversation.title, conversation.messages.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use scraper::Html;
use tracing::{debug, warn};

use crate::Message;
use crate::core::models::Conversation;
use crate::error::{IoContext, Result};
use crate::markup::{MarkupNode, parse_document, select_all};
use crate::parsing::{SenderState, normalize_text, parse_message};

const DOCUMENT_PREFIX: &str = "messages";
const DOCUMENT_EXTENSION: &str = ".html";

/// Sequence number of a message document, from its file name.
///
/// `messages.html` is 0, `messages<N>.html` is N; anything else is not a
/// message document.
///
/// ```rust
/// use chatpage::parser::document_sequence;
///
/// assert_eq!(document_sequence("messages.html"), Some(0));
/// assert_eq!(document_sequence("messages12.html"), Some(12));
/// assert_eq!(document_sequence("messages_backup.html"), None);
/// ```
pub fn document_sequence(file_name: &str) -> Option<u32> {
    let digits = file_name
        .strip_prefix(DOCUMENT_PREFIX)?
        .strip_suffix(DOCUMENT_EXTENSION)?;

    if digits.is_empty() {
        return Some(0);
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Message documents of a chat directory, base document first, then
/// continuations in ascending numeric order.
pub fn list_documents(chat_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut documents: Vec<(u32, PathBuf)> = Vec::new();

    for entry in fs::read_dir(chat_dir).at_path(chat_dir)? {
        let entry = entry.at_path(chat_dir)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let sequence = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(document_sequence);
        if let Some(sequence) = sequence {
            documents.push((sequence, path));
        }
    }

    documents.sort_by_key(|(sequence, _)| *sequence);
    Ok(documents.into_iter().map(|(_, path)| path).collect())
}

/// Header text of a document (`.page_header .text.bold`), if non-empty.
pub fn header_title(html: &Html) -> Option<String> {
    select_all(html, ".page_header .text.bold")
        .first()
        .map(|node| normalize_text(&node.text_content()))
        .filter(|title| !title.is_empty())
}

/// Parser for Telegram Desktop HTML chat exports.
#[derive(Debug, Clone, Default)]
pub struct ExportParser {
    title_overrides: BTreeMap<String, String>,
}

impl ExportParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a title override for one chat.
    #[must_use]
    pub fn with_title_override(mut self, chat_id: impl Into<String>, title: impl Into<String>) -> Self {
        self.title_overrides.insert(chat_id.into(), title.into());
        self
    }

    /// Replaces the whole override table.
    #[must_use]
    pub fn with_title_overrides(mut self, overrides: BTreeMap<String, String>) -> Self {
        self.title_overrides = overrides;
        self
    }

    /// Parses every message of one document.
    ///
    /// `senders` carries the last explicit sender in and out, so consecutive
    /// documents of one chat must share it.
    pub fn parse_document(&self, html: &Html, chat_id: &str, senders: &mut SenderState) -> Vec<Message> {
        select_all(html, "div.history div.message")
            .iter()
            .filter_map(|node| parse_message(node, chat_id, senders))
            .collect()
    }

    /// Parses one document from a string.
    pub fn parse_str(&self, content: &str, chat_id: &str, senders: &mut SenderState) -> Vec<Message> {
        self.parse_document(&parse_document(content), chat_id, senders)
    }

    /// Assembles the conversation stored in `chat_dir`.
    ///
    /// Returns `Ok(None)` when the directory contains no message documents.
    pub fn parse_chat(&self, chat_dir: &Path) -> Result<Option<Conversation>> {
        let chat_id = chat_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let documents = list_documents(chat_dir)?;
        if documents.is_empty() {
            warn!(chat_id = %chat_id, "no messages.html found, skipping");
            return Ok(None);
        }

        let mut senders = SenderState::new();
        let mut messages = Vec::new();
        let mut header = None;

        for (idx, path) in documents.iter().enumerate() {
            let bytes = fs::read(path).at_path(path)?;
            let html = parse_document(&String::from_utf8_lossy(&bytes));

            if idx == 0 {
                header = header_title(&html);
            }

            let parsed = self.parse_document(&html, &chat_id, &mut senders);
            debug!(
                chat_id = %chat_id,
                document = %path.display(),
                messages = parsed.len(),
                "parsed document"
            );
            messages.extend(parsed);
        }

        let title = self.resolve_title(&chat_id, header);
        Ok(Some(Conversation::new(chat_id, title, messages)))
    }

    /// Title precedence: override table, document header, directory name.
    pub fn resolve_title(&self, chat_id: &str, header: Option<String>) -> String {
        self.title_overrides
            .get(chat_id)
            .cloned()
            .or(header)
            .unwrap_or_else(|| chat_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn doc(header: &str, body: &str) -> String {
        format!(
            r#"<html><body><div class="page_wrap">
                 <div class="page_header"><div class="content"><div class="text bold">{header}</div></div></div>
                 <div class="page_body chat_page"><div class="history">{body}</div></div>
               </div></body></html>"#
        )
    }

    #[test]
    fn test_document_sequence() {
        assert_eq!(document_sequence("messages.html"), Some(0));
        assert_eq!(document_sequence("messages2.html"), Some(2));
        assert_eq!(document_sequence("messages10.html"), Some(10));
        assert_eq!(document_sequence("messages.htm"), None);
        assert_eq!(document_sequence("messages-2.html"), None);
        assert_eq!(document_sequence("photos.html"), None);
    }

    #[test]
    fn test_list_documents_numeric_order() {
        let dir = tempdir().unwrap();
        for name in ["messages10.html", "messages2.html", "messages.html", "messages3.html", "notes.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("photos")).unwrap();

        let names: Vec<_> = list_documents(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["messages.html", "messages2.html", "messages3.html", "messages10.html"]
        );
    }

    #[test]
    fn test_header_title() {
        let html = parse_document(&doc("  Alice   Smith ", ""));
        assert_eq!(header_title(&html).as_deref(), Some("Alice Smith"));

        let html = parse_document(&doc("   ", ""));
        assert_eq!(header_title(&html), None);
    }

    #[test]
    fn test_resolve_title_precedence() {
        let parser = ExportParser::new().with_title_override("chat_002", "Override");
        assert_eq!(parser.resolve_title("chat_002", Some("Header".into())), "Override");
        assert_eq!(parser.resolve_title("chat_001", Some("Header".into())), "Header");
        assert_eq!(parser.resolve_title("chat_001", None), "chat_001");
    }

    #[test]
    fn test_parse_chat_threads_sender_across_documents() {
        let dir = tempdir().unwrap();
        let chat_dir = dir.path().join("chat_005");
        fs::create_dir(&chat_dir).unwrap();
        fs::write(
            chat_dir.join("messages.html"),
            doc(
                "Bob",
                r#"<div class="message default" id="message1"><div class="from_name">Bob</div><div class="text">one</div></div>"#,
            ),
        )
        .unwrap();
        fs::write(
            chat_dir.join("messages2.html"),
            doc(
                "Bob",
                r#"<div class="message default joined" id="message2"><div class="text">two</div></div>"#,
            ),
        )
        .unwrap();

        let conv = ExportParser::new().parse_chat(&chat_dir).unwrap().unwrap();
        assert_eq!(conv.chat_id, "chat_005");
        assert_eq!(conv.title, "Bob");
        assert_eq!(conv.messages.len(), 2);
        assert_eq!(conv.messages[1].from_name.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_parse_chat_without_documents() {
        let dir = tempdir().unwrap();
        assert!(ExportParser::new().parse_chat(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_parse_chat_tolerates_invalid_utf8() {
        let dir = tempdir().unwrap();
        let chat_dir = dir.path().join("chat_006");
        fs::create_dir(&chat_dir).unwrap();
        let mut bytes = doc("", r#"<div class="message default" id="message1"><div class="text">ok"#)
            .into_bytes();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b"</div></div>");
        fs::write(chat_dir.join("messages.html"), bytes).unwrap();

        let conv = ExportParser::new().parse_chat(&chat_dir).unwrap().unwrap();
        assert_eq!(conv.title, "chat_006");
        assert_eq!(conv.messages.len(), 1);
        assert!(conv.messages[0].plain_text.starts_with("ok"));
    }
}
