//! Output artifact writers.
//!
//! - [`write_chat`] - per-chat manifest, chunk files and search index
//! - [`write_global_manifest`] - the global manifest
//! - [`to_json`] / [`to_json_pretty`] - the same encodings as strings
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> chatpage::Result<()> {
//! use chatpage::core::{Conversation, build_chat_manifest, build_search_index, paginate};
//! use chatpage::core::output::write_chat;
//! use chatpage::Message;
//!
//! let conv = Conversation::new("chat_001", "Notes", vec![Message::new("message1").with_text("hi")]);
//! let chunks = paginate(&conv.messages, 10_000);
//! let manifest = build_chat_manifest(&conv, &chunks);
//! let search = build_search_index(&conv.messages, 500);
//!
//! write_chat("site/data".as_ref(), &manifest, &chunks, &search)?;
//! # Ok(())
//! # }
//! ```

mod json_writer;

pub use json_writer::{
    CHUNKS_DIR, MANIFEST_FILE, to_json, to_json_pretty, write_chat, write_global_manifest,
    write_json, write_json_pretty,
};
