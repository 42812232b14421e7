//! # Chatpage
//!
//! A Rust library for turning Telegram Desktop HTML chat exports into a
//! paginated, statically servable JSON dataset.
//!
//! ## Overview
//!
//! An export root looks like `Files/chats/chat_001/messages.html`,
//! `messages2.html`, ... plus media folders. Chatpage parses every chat into
//! normalized [`Message`] records and writes, per chat, a manifest, fixed-size
//! chunk files and a search index, plus a global manifest listing all chats.
//! Referenced media is copied next to the data so the output tree can be
//! served by any static file server.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatpage::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = BuildConfig::new("Files", "site")
//!         .with_title_override("chat_002", "Project notes");
//!
//!     let report = build_site(&config)?;
//!     println!("{} messages", report.manifest.total_messages);
//!     Ok(())
//! }
//! ```
//!
//! ## Parsing a Single Document
//!
//! ```rust
//! use chatpage::parser::ExportParser;
//! use chatpage::parsing::SenderState;
//!
//! let html = r#"<div class="history">
//!   <div class="message default" id="message1">
//!     <div class="from_name">Alice</div><div class="text">Hi</div>
//!   </div>
//!   <div class="message default joined" id="message2"><div class="text">Again</div></div>
//! </div>"#;
//!
//! let mut senders = SenderState::new();
//! let messages = ExportParser::new().parse_str(html, "chat_001", &mut senders);
//!
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[1].from_name.as_deref(), Some("Alice"));
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - Field-level parsing of message nodes
//!   - [`parse_message`](parsing::parse_message), [`SenderState`](parsing::SenderState)
//!   - timestamps, attachments, text normalization
//! - [`markup`] - [`MarkupNode`](markup::MarkupNode), the markup access interface
//! - [`parser`] - [`ExportParser`](parser::ExportParser), one chat directory at a time
//! - [`core`] - Paging, search index, manifests and JSON writers
//! - [`media`] - Media relocation and asset copying
//! - [`pipeline`] - [`SiteBuilder`](pipeline::SiteBuilder), the whole-export build
//! - [`config`] - [`BuildConfig`](config::BuildConfig)
//! - [`progress`] - Per-chat progress callbacks
//! - [`cli`] - CLI arguments (feature `cli`)
//! - [`error`] - Unified error types ([`ChatpageError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod markup;
pub mod media;
pub mod message;
pub mod parser;
pub mod parsing;
pub mod pipeline;
pub mod progress;

// Re-export the main types at the crate root for convenience
pub use error::{ChatpageError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatpage::prelude::*;
/// ```
pub mod prelude {
    // Core message types
    pub use crate::Message;
    pub use crate::message::{Attachment, AttachmentKind, CallType};

    // Error types
    pub use crate::error::{ChatpageError, Result};

    // Configuration
    pub use crate::config::BuildConfig;

    // Parsing
    pub use crate::parser::ExportParser;
    pub use crate::parsing::SenderState;

    // Models and builders
    pub use crate::core::{
        ChatManifest, ChatSummary, Conversation, GlobalManifest, Page, SearchEntry,
        build_chat_manifest, build_global_manifest, build_search_index, paginate,
    };

    // Pipeline
    pub use crate::pipeline::{BuildReport, SiteBuilder, build_site};
    pub use crate::progress::{Progress, ProgressCallback};
}
