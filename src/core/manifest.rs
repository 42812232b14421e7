//! Chat and global manifest construction.

use chrono::NaiveDateTime;

use super::models::{ChatManifest, ChatSummary, Conversation, GlobalManifest, SEARCH_FILE};
use super::pager::{Chunk, date_range};

/// Builds the manifest of one conversation from its full message list.
///
/// `message_count` counts only messages that were not forwarded, while the
/// chunk list (and the search index) cover every message.
pub fn build_chat_manifest(conversation: &Conversation, chunks: &[Chunk<'_>]) -> ChatManifest {
    let (start_date, end_date) = date_range(&conversation.messages);

    ChatManifest {
        chat_id: conversation.chat_id.clone(),
        title: conversation.title.clone(),
        message_count: conversation.original_message_count(),
        chunk_count: chunks.len(),
        chunks: chunks.iter().map(|c| c.page.clone()).collect(),
        start_date,
        end_date,
        search_file: SEARCH_FILE.to_string(),
    }
}

/// Aggregates chat summaries into the global manifest.
///
/// Chats are ordered by `message_count`, largest first; equal counts keep
/// their input order.
pub fn build_global_manifest(
    mut chats: Vec<ChatSummary>,
    generated_at: NaiveDateTime,
) -> GlobalManifest {
    chats.sort_by(|a, b| b.message_count.cmp(&a.message_count));

    GlobalManifest {
        total_chats: chats.len(),
        total_messages: chats.iter().map(|c| c.message_count).sum(),
        chats,
        generated_at,
    }
}
