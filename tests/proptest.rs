//! Property-based tests for chatpage.
//!
//! These tests generate random inputs to find edge cases.

use proptest::prelude::*;

use chatpage::Message;
use chatpage::core::{ChatSummary, build_global_manifest, paginate};
use chatpage::markup::{parse_document, select_all};
use chatpage::parser::ExportParser;
use chatpage::parsing::{
    SenderState, THUMBNAIL_MARKER, extract_attachments, format_timestamp, parse_export_timestamp,
    rewrite_media_href,
};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Generate a random message (fast strategies, no regex)
fn arb_message() -> impl Strategy<Value = Message> {
    (
        0u32..100_000,
        prop::option::of(0i64..1_000_000),
        prop::sample::select(vec!["Alice", "Bob", "Иван", ""]),
    )
        .prop_map(|(id, minutes, sender)| {
            let mut msg = Message::new(format!("message{id}")).with_sender(sender);
            if let Some(minutes) = minutes {
                let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
                msg = msg.with_timestamp(base + chrono::Duration::minutes(minutes));
            }
            msg
        })
}

/// Explicit sender name, or `None` for a joined continuation.
fn arb_sender_step() -> impl Strategy<Value = Option<&'static str>> {
    prop::option::of(prop::sample::select(vec!["Alice", "Bob", "Мария", "村上"]))
}

fn message_html(id: usize, sender: Option<&str>) -> String {
    match sender {
        Some(name) => format!(
            r#"<div class="message default" id="message{id}"><div class="from_name">{name}</div><div class="text">t{id}</div></div>"#
        ),
        None => format!(
            r#"<div class="message default joined" id="message{id}"><div class="text">t{id}</div></div>"#
        ),
    }
}

fn history(body: &str) -> String {
    format!(r#"<div class="history">{body}</div>"#)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // TIMESTAMP PROPERTIES
    // ============================================

    /// Every valid export timestamp parses back to the same instant
    #[test]
    fn timestamp_roundtrip(
        year in 1000i32..=9999,
        month in 1u32..=12,
        day in 1u32..=28,
        hour in 0u32..24,
        minute in 0u32..60,
        second in 0u32..60,
    ) {
        let ts = NaiveDate::from_ymd_opt(year, month, day).unwrap().and_hms_opt(hour, minute, second).unwrap();
        let raw = ts.format("%d.%m.%Y %H:%M:%S").to_string();

        prop_assert_eq!(parse_export_timestamp(Some(&raw)), Some(ts));
        prop_assert_eq!(
            format_timestamp(&ts),
            format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}")
        );
        let padded = format!(" {raw}");
        prop_assert_eq!(parse_export_timestamp(Some(&padded)), None);
    }

    /// Anything that parses must be exactly in export format
    #[test]
    fn timestamp_parse_is_strict(raw in any::<String>()) {
        if let Some(ts) = parse_export_timestamp(Some(&raw)) {
            prop_assert_eq!(ts.format("%d.%m.%Y %H:%M:%S").to_string(), raw);
        }
    }

    // ============================================
    // SENDER PROPERTIES
    // ============================================

    /// Joined messages inherit the closest preceding explicit sender, across
    /// document boundaries
    #[test]
    fn joined_messages_inherit_sender(
        steps in prop::collection::vec(arb_sender_step(), 1..30),
        split in 0usize..30,
    ) {
        let split = split.min(steps.len());
        let parser = ExportParser::new();
        let mut senders = SenderState::new();

        let render = |range: std::ops::Range<usize>| {
            range.map(|i| message_html(i, steps[i])).collect::<String>()
        };
        let mut parsed = parser.parse_str(&history(&render(0..split)), "chat_001", &mut senders);
        parsed.extend(parser.parse_str(&history(&render(split..steps.len())), "chat_001", &mut senders));

        prop_assert_eq!(parsed.len(), steps.len());
        let mut last: Option<&str> = None;
        for (msg, step) in parsed.iter().zip(&steps) {
            if step.is_some() {
                last = *step;
            }
            prop_assert_eq!(msg.from_name.as_deref(), last);
        }
    }

    // ============================================
    // HREF PROPERTIES
    // ============================================

    /// Rewriting is deterministic and idempotent
    #[test]
    fn href_rewrite_idempotent(
        prefix in prop::sample::select(vec!["", "../../", "./", "/abs/"]),
        chat in prop::sample::select(vec!["chat_001", "chat_42", "chats", "x"]),
        folder in prop::sample::select(vec!["photos", "files", "video_files", "chats/chat_9"]),
        name in "[a-z0-9_]{1,12}\\.(jpg|mp4|ogg|pdf)",
    ) {
        let href = format!("{prefix}chats/{chat}/{folder}/{name}");
        let once = rewrite_media_href(&href);
        prop_assert_eq!(&once, &rewrite_media_href(&href));
        prop_assert_eq!(rewrite_media_href(&once), once.clone());
        prop_assert!(once.starts_with("media/"));
    }

    /// Attachments are unique per message and never thumbnails
    #[test]
    fn attachments_unique_without_thumbnails(
        items in prop::collection::vec(
            (
                prop::sample::select(vec!["photos", "files", "stickers", "voice_messages"]),
                0u8..4,
                prop::sample::select(vec!["", "_thumb", "_THUMB"]),
                any::<bool>(),
            ),
            0..12,
        ),
    ) {
        let body: String = items
            .iter()
            .map(|(folder, n, suffix, as_link)| {
                let path = format!("../../chats/chat_001/{folder}/f{n}{suffix}.jpg");
                if *as_link {
                    format!(r#"<a href="{path}">f{n}</a>"#)
                } else {
                    format!(r#"<img class="photo" src="{path}"/>"#)
                }
            })
            .collect();
        let html = parse_document(&format!(r#"<div class="message" id="message1">{body}</div>"#));
        let node = select_all(&html, "div.message")[0];

        let attachments = extract_attachments(&node, "chat_001");
        let mut seen = HashSet::new();
        for att in &attachments {
            prop_assert!(seen.insert(att.href.clone()), "duplicate href {}", att.href);
            prop_assert!(!att.href.to_lowercase().contains(THUMBNAIL_MARKER));
        }
    }

    // ============================================
    // PAGING PROPERTIES
    // ============================================

    /// Concatenating chunks reproduces the input, each within capacity
    #[test]
    fn paging_is_lossless(
        messages in prop::collection::vec(arb_message(), 0..60),
        size in 1usize..20,
    ) {
        let chunks = paginate(&messages, size);

        prop_assert_eq!(chunks.len(), messages.len().div_ceil(size));
        let rejoined: Vec<Message> = chunks.iter().flat_map(|c| c.messages.to_vec()).collect();
        prop_assert_eq!(&rejoined, &messages);

        for chunk in &chunks {
            prop_assert!(chunk.messages.len() <= size);
            prop_assert_eq!(chunk.page.message_count, chunk.messages.len());
            prop_assert_eq!(&chunk.page.start_id, &chunk.messages[0].message_id);
            if let (Some(start), Some(end)) = (chunk.page.start_date, chunk.page.end_date) {
                prop_assert!(start <= end);
            }
        }
    }

    // ============================================
    // DATE HEADING PROPERTIES
    // ============================================

    /// Day separators never survive parsing
    #[test]
    fn date_headings_are_dropped(
        entries in prop::collection::vec(
            prop_oneof![
                (1u32..=31, prop::sample::select(vec!["January", "August", "December"]), 1990u32..2030)
                    .prop_map(|(d, m, y)| (true, format!("{d} {m} {y}"))),
                prop::sample::select(vec!["Alice joined the group", "Bob pinned a message", "7 August"])
                    .prop_map(|s| (false, s.to_string())),
            ],
            0..20,
        ),
    ) {
        let body: String = entries
            .iter()
            .enumerate()
            .map(|(i, (_, text))| {
                format!(r#"<div class="message service" id="message{i}"><div class="body details">{text}</div></div>"#)
            })
            .collect();
        let parsed = ExportParser::new().parse_str(&history(&body), "chat_001", &mut SenderState::new());

        let expected: Vec<&str> = entries.iter().filter(|(h, _)| !h).map(|(_, t)| t.as_str()).collect();
        let texts: Vec<&str> = parsed.iter().map(|m| m.plain_text.as_str()).collect();
        prop_assert_eq!(texts, expected);
        prop_assert!(parsed.iter().all(|m| m.is_service));
    }

    // ============================================
    // GLOBAL MANIFEST PROPERTIES
    // ============================================

    /// Chats are non-increasing by message count, ties in input order
    #[test]
    fn global_manifest_sorted_stably(counts in prop::collection::vec(0usize..5, 0..20)) {
        let summaries: Vec<ChatSummary> = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| ChatSummary {
                chat_id: format!("chat_{i:03}"),
                title: String::new(),
                message_count: count,
                chunk_count: 0,
                start_date: None,
                end_date: None,
            })
            .collect();
        let generated_at = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let manifest = build_global_manifest(summaries, generated_at);

        prop_assert_eq!(manifest.total_chats, counts.len());
        prop_assert_eq!(manifest.total_messages, counts.iter().sum::<usize>());
        for pair in manifest.chats.windows(2) {
            prop_assert!(pair[0].message_count >= pair[1].message_count);
            if pair[0].message_count == pair[1].message_count {
                prop_assert!(pair[0].chat_id < pair[1].chat_id);
            }
        }
    }
}
