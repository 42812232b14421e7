//! Attachment extraction from a single message node.
//!
//! Media is referenced two ways in the export: links (`<a href>`) into one of
//! the chat's media folders, and inline `<img class="sticker|photo">`
//! elements. Both are collected, their paths rewritten into the output
//! `media/<chat_id>/...` scheme, deduplicated by final path, and stripped of
//! thumbnail previews.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::text::normalize_text;
use crate::markup::MarkupNode;
use crate::message::{Attachment, AttachmentKind};

/// Media folder names a chat directory may contain.
///
/// The media relocator copies exactly these folders, so the rewritten hrefs
/// and the copied tree always agree.
pub const MEDIA_FOLDERS: [&str; 6] = [
    "photos",
    "files",
    "video_files",
    "stickers",
    "voice_messages",
    "round_video_messages",
];

/// Leading segment of every rewritten href.
const MEDIA_PREFIX: &str = "media/";

/// Substring marking thumbnail previews, compared case-insensitively.
pub const THUMBNAIL_MARKER: &str = "_thumb";

static CHAT_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"chats/([^/]+)/(.+)").expect("chat path pattern is valid")
});

/// Folder → kind, checked in this order. `video_files` precedes `files` so
/// the longer name wins.
const FOLDER_KINDS: [(&str, AttachmentKind); 6] = [
    ("photos", AttachmentKind::Photo),
    ("video_files", AttachmentKind::Video),
    ("stickers", AttachmentKind::Sticker),
    ("voice_messages", AttachmentKind::Voice),
    ("round_video_messages", AttachmentKind::RoundVideo),
    ("files", AttachmentKind::File),
];

const PHOTO_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".webp", ".gif"];
const VIDEO_EXTENSIONS: [&str; 4] = [".mp4", ".mov", ".webm", ".mkv"];

/// Returns `true` if `path` points into one of the [`MEDIA_FOLDERS`].
pub fn is_media_path(path: &str) -> bool {
    MEDIA_FOLDERS
        .iter()
        .any(|folder| path.contains(&format!("{folder}/")))
}

/// Rewrites `.../chats/<chat_id>/<rest>` to `media/<chat_id>/<rest>`.
///
/// Paths already under `media/` and paths of any other shape are returned
/// unchanged, so the rewrite is idempotent.
///
/// # Example
///
/// ```rust
/// use chatpage::parsing::rewrite_media_href;
///
/// assert_eq!(
///     rewrite_media_href("../../chats/chat_001/photos/photo_1.jpg"),
///     "media/chat_001/photos/photo_1.jpg"
/// );
/// assert_eq!(rewrite_media_href("photos/photo_1.jpg"), "photos/photo_1.jpg");
/// ```
pub fn rewrite_media_href(href: &str) -> String {
    if href.starts_with(MEDIA_PREFIX) {
        return href.to_string();
    }
    match CHAT_PATH_RE.captures(href) {
        Some(caps) => format!("media/{}/{}", &caps[1], &caps[2]),
        None => href.to_string(),
    }
}

/// Classifies a media path by folder segment, then by file extension.
pub fn classify_href(href: &str) -> AttachmentKind {
    let h = href.to_lowercase();

    for (folder, kind) in FOLDER_KINDS {
        if h.contains(&format!("/{folder}/")) || h.starts_with(&format!("{folder}/")) {
            return kind;
        }
    }

    if PHOTO_EXTENSIONS.iter().any(|ext| h.ends_with(ext)) {
        AttachmentKind::Photo
    } else if VIDEO_EXTENSIONS.iter().any(|ext| h.ends_with(ext)) {
        AttachmentKind::Video
    } else if h.ends_with(".ogg") {
        AttachmentKind::Voice
    } else {
        AttachmentKind::File
    }
}

fn is_thumbnail(href: &str) -> bool {
    href.to_lowercase().contains(THUMBNAIL_MARKER)
}

/// Collects the attachments of one message node.
///
/// Never fails; a message without media yields an empty list. Order follows
/// first appearance of each final href, links before inline images.
pub fn extract_attachments<N: MarkupNode>(node: &N, chat_id: &str) -> Vec<Attachment> {
    let mut found: Vec<Attachment> = Vec::new();

    for link in node.find_all("a[href]") {
        let href = link.attribute("href").unwrap_or_default().trim();
        if href.is_empty() || !is_media_path(href) {
            continue;
        }

        let title = Some(normalize_text(&link.text_content())).filter(|t| !t.is_empty());
        let duration = link
            .find(".video_duration, .duration")
            .map(|d| normalize_text(&d.text_content()));

        found.push(Attachment {
            kind: classify_href(href),
            href: rewrite_media_href(href),
            title,
            duration,
        });
    }

    for img in node.find_all("img.sticker, img.photo") {
        let src = img.attribute("src").unwrap_or_default().trim();
        if src.is_empty() || !is_media_path(src) {
            continue;
        }

        let kind = if src.to_lowercase().contains("sticker") {
            AttachmentKind::Sticker
        } else {
            AttachmentKind::Photo
        };
        found.push(Attachment::new(kind, rewrite_media_href(src)));
    }

    let mut unique: Vec<Attachment> = Vec::with_capacity(found.len());
    let mut positions: HashMap<String, usize> = HashMap::new();
    for attachment in found {
        match positions.get(&attachment.href) {
            Some(&idx) => unique[idx] = attachment,
            None => {
                positions.insert(attachment.href.clone(), unique.len());
                unique.push(attachment);
            }
        }
    }

    unique.retain(|a| {
        let keep = !is_thumbnail(&a.href);
        if !keep {
            trace!(chat_id, href = %a.href, "dropping thumbnail attachment");
        }
        keep
    });
    unique
}
