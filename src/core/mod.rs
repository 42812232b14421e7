//! Paging, indexing and manifest building.
//!
//! This module contains:
//! - [`models`] - Conversations, pages, manifests and search entries
//! - [`pager`] - Fixed-capacity chunking of a message list
//! - [`search`] - The per-chat search index
//! - [`manifest`] - Chat and global manifests
//! - [`output`] - JSON artifact writers
//!
//! # Quick Start
//!
//! ```rust
//! use chatpage::core::{Conversation, build_chat_manifest, build_search_index, paginate};
//! use chatpage::Message;
//!
//! let conv = Conversation::new(
//!     "chat_001",
//!     "Notes",
//!     vec![Message::new("message1").with_text("hi"), Message::new("message2")],
//! );
//!
//! let chunks = paginate(&conv.messages, 1);
//! let manifest = build_chat_manifest(&conv, &chunks);
//! let search = build_search_index(&conv.messages, 500);
//!
//! assert_eq!(manifest.chunk_count, 2);
//! assert_eq!(search.len(), 1);
//! ```

pub mod manifest;
pub mod models;
pub mod output;
pub mod pager;
pub mod search;

// Re-export main types for convenience
pub use manifest::{build_chat_manifest, build_global_manifest};
pub use models::{ChatManifest, ChatSummary, Conversation, GlobalManifest, Page, SearchEntry};
pub use pager::{Chunk, chunk_filename, date_range, paginate};
pub use search::build_search_index;

// Re-export Message from the crate root
pub use crate::Message;
