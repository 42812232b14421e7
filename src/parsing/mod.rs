//! Parsing of Telegram Desktop HTML export markup.
//!
//! Leaf-first:
//! - [`text`] - whitespace normalization, calendar heading detection
//! - [`timestamp`] - the export's `DD.MM.YYYY HH:MM:SS` timestamps
//! - [`attachments`] - media links and inline images of one message
//! - [`message`] - one message node into a [`Message`](crate::Message)

pub mod attachments;
pub mod message;
pub mod text;
pub mod timestamp;

// Re-export commonly used items
pub use attachments::{
    MEDIA_FOLDERS, THUMBNAIL_MARKER, classify_href, extract_attachments, is_media_path,
    rewrite_media_href,
};
pub use message::{SenderState, parse_message};
pub use text::{is_date_heading, normalize_text, truncate_chars};
pub use timestamp::{format_day, format_timestamp, parse_export_timestamp};
