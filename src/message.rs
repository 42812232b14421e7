//! Normalized message model for exported conversations.
//!
//! This module provides [`Message`] and [`Attachment`], the lossless
//! representation every parsed message node is converted into. The same
//! structs are serialized verbatim into chunk files, so the field names here
//! are the public output schema.
//!
//! # Examples
//!
//! ## Builder Pattern
//!
//! ```
//! use chatpage::Message;
//!
//! let msg = Message::new("message42")
//!     .with_sender("Alice")
//!     .with_text("Hello, world!");
//!
//! assert_eq!(msg.message_id, "message42");
//! assert_eq!(msg.from_name.as_deref(), Some("Alice"));
//! assert!(msg.has_text());
//! ```
//!
//! ## Serialization
//!
//! Every field is always present in JSON; absent values become `null`:
//!
//! ```
//! use chatpage::Message;
//!
//! let json = serde_json::to_string(&Message::new("message1"))?;
//! assert!(json.contains(r#""dt_iso":null"#));
//! assert!(json.contains(r#""attachments":[]"#));
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Identifier used when a message node carries no usable `id` attribute.
pub const UNKNOWN_MESSAGE_ID: &str = "unknown";

/// Kind of media attached to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Photo,
    Video,
    File,
    Sticker,
    Voice,
    RoundVideo,
}

impl std::fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachmentKind::Photo => write!(f, "photo"),
            AttachmentKind::Video => write!(f, "video"),
            AttachmentKind::File => write!(f, "file"),
            AttachmentKind::Sticker => write!(f, "sticker"),
            AttachmentKind::Voice => write!(f, "voice"),
            AttachmentKind::RoundVideo => write!(f, "round_video"),
        }
    }
}

/// A media file referenced by a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub kind: AttachmentKind,

    /// Path relative to the output root, e.g. `media/chat_001/photos/photo_1.jpg`.
    pub href: String,

    /// Normalized link text, when the link had any.
    #[serde(default)]
    pub title: Option<String>,

    /// Duration label as displayed in the export (e.g. `0:12`).
    #[serde(default)]
    pub duration: Option<String>,
}

impl Attachment {
    /// Creates an attachment with no title or duration.
    pub fn new(kind: AttachmentKind, href: impl Into<String>) -> Self {
        Self {
            kind,
            href: href.into(),
            title: None,
            duration: None,
        }
    }
}

/// Outcome of a call recorded in the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallType {
    Incoming,
    Outgoing,
    Missed,
    Cancelled,
}

/// A normalized chat message.
///
/// | Field | Description |
/// |-------|-------------|
/// | `message_id` | Source identifier (`message123`), never empty |
/// | `timestamp` | Naive local send time, serialized as `dt_iso` |
/// | `from_name` | Explicit or inherited sender |
/// | `html_text` | Raw inner markup of the text node |
/// | `plain_text` | Whitespace-normalized text, possibly empty |
/// | `reply_to` | Identifier of the message replied to |
/// | `forwarded_from` / `forwarded_date` | Forward provenance |
/// | `call_type` / `call_duration` | Call metadata, duration in seconds |
/// | `attachments` | Media files, unique by `href` |
/// | `is_service` | Structural/system message flag |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: String,

    #[serde(rename = "dt_iso", default)]
    pub timestamp: Option<NaiveDateTime>,

    #[serde(default)]
    pub from_name: Option<String>,

    /// Absent exactly when the message had no text node.
    #[serde(default)]
    pub html_text: Option<String>,

    #[serde(default)]
    pub plain_text: String,

    #[serde(default)]
    pub reply_to: Option<String>,

    #[serde(default)]
    pub forwarded_from: Option<String>,

    #[serde(default)]
    pub forwarded_date: Option<String>,

    #[serde(default)]
    pub call_type: Option<CallType>,

    #[serde(default)]
    pub call_duration: Option<u32>,

    #[serde(default)]
    pub attachments: Vec<Attachment>,

    #[serde(default)]
    pub is_service: bool,
}

impl Message {
    /// Creates an empty message with the given identifier.
    ///
    /// A blank identifier is replaced with [`UNKNOWN_MESSAGE_ID`].
    pub fn new(message_id: impl Into<String>) -> Self {
        let message_id = message_id.into();
        let message_id = if message_id.trim().is_empty() {
            UNKNOWN_MESSAGE_ID.to_string()
        } else {
            message_id
        };

        Self {
            message_id,
            timestamp: None,
            from_name: None,
            html_text: None,
            plain_text: String::new(),
            reply_to: None,
            forwarded_from: None,
            forwarded_date: None,
            call_type: None,
            call_duration: None,
            attachments: Vec::new(),
            is_service: false,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    #[must_use]
    pub fn with_timestamp(mut self, ts: NaiveDateTime) -> Self {
        self.timestamp = Some(ts);
        self
    }

    #[must_use]
    pub fn with_sender(mut self, name: impl Into<String>) -> Self {
        self.from_name = Some(name.into());
        self
    }

    /// Sets both the plain text and an identical HTML body.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.html_text = Some(text.clone());
        self.plain_text = text;
        self
    }

    #[must_use]
    pub fn with_forwarded_from(mut self, name: impl Into<String>) -> Self {
        self.forwarded_from = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    #[must_use]
    pub fn service(mut self) -> Self {
        self.is_service = true;
        self
    }

    // =========================================================================
    // Utility methods
    // =========================================================================

    /// Returns `true` if the normalized text is non-empty.
    pub fn has_text(&self) -> bool {
        !self.plain_text.is_empty()
    }

    /// Returns `true` if the message was forwarded from elsewhere.
    pub fn is_forwarded(&self) -> bool {
        self.forwarded_from.is_some()
    }
}
