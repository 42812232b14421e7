//! Per-message decoding.
//!
//! [`parse_message`] turns one `div.message` node into a [`Message`]. Every
//! field is resolved independently and best-effort: a missing or malformed
//! sub-node leaves that field absent and never aborts the message.

use std::sync::LazyLock;

use regex::Regex;

use super::attachments::extract_attachments;
use super::text::{is_date_heading, normalize_text};
use super::timestamp::parse_export_timestamp;
use crate::markup::MarkupNode;
use crate::message::{CallType, Message};

static GO_TO_MESSAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"GoToMessage\(([0-9]+)\)").expect("reply pattern is valid")
});

static CALL_DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(([0-9]+)\s+seconds?\)").expect("call duration pattern is valid")
});

/// Status phrase markers, checked in order.
const CALL_MARKERS: [(&str, CallType); 4] = [
    ("Incoming", CallType::Incoming),
    ("Outgoing", CallType::Outgoing),
    ("Cancelled", CallType::Cancelled),
    ("Missed", CallType::Missed),
];

/// Most recent explicit sender seen in a conversation.
///
/// Owned by whoever walks a conversation and passed to every
/// [`parse_message`] call, so "joined" messages can inherit the sender across
/// document boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SenderState {
    last_sender: Option<String>,
}

impl SenderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recent explicit sender, if any.
    pub fn last_sender(&self) -> Option<&str> {
        self.last_sender.as_deref()
    }

    fn remember(&mut self, name: &str) {
        self.last_sender = Some(name.to_string());
    }
}

/// Parses one message node.
///
/// Returns `None` when the node is a synthetic day separator (a service
/// message whose only text is a heading like `7 August 2021`); such nodes are
/// not content and are dropped entirely.
pub fn parse_message<N: MarkupNode>(
    node: &N,
    chat_id: &str,
    senders: &mut SenderState,
) -> Option<Message> {
    let mut msg = Message::new(node.attribute("id").unwrap_or_default().trim());

    msg.is_service = node.has_class("service");
    let is_joined = node.has_class("joined");

    msg.timestamp = parse_export_timestamp(
        node.find("div.date.details[title]")
            .as_ref()
            .and_then(|d| d.attribute("title")),
    );

    msg.from_name = resolve_sender(node, is_joined, senders);
    msg.reply_to = resolve_reply(node);

    if let Some((from, date)) = resolve_forward(node) {
        msg.forwarded_from = from;
        msg.forwarded_date = date;
    }

    if let Some((call_type, duration)) = resolve_call(node) {
        msg.call_type = call_type;
        msg.call_duration = duration;
    }

    if let Some(text) = node.find("div.text") {
        let inner = text.inner_markup();
        let inner = inner.trim();
        msg.html_text = (!inner.is_empty()).then(|| inner.to_string());
        msg.plain_text = normalize_text(&text.text_content());
    } else if msg.is_service {
        if let Some(details) = node.find("div.body.details") {
            msg.plain_text = normalize_text(&details.text_content());
            if is_date_heading(&msg.plain_text) {
                return None;
            }
        }
    }

    msg.attachments = extract_attachments(node, chat_id);

    Some(msg)
}

fn resolve_sender<N: MarkupNode>(
    node: &N,
    is_joined: bool,
    senders: &mut SenderState,
) -> Option<String> {
    match node.find_outside("div.from_name", "div.forwarded") {
        Some(from) => {
            let name = normalize_text(&from.text_content());
            if name.is_empty() {
                return None;
            }
            senders.remember(&name);
            Some(name)
        }
        None if is_joined => senders.last_sender().map(ToString::to_string),
        None => None,
    }
}

fn resolve_reply<N: MarkupNode>(node: &N) -> Option<String> {
    let link = node.find("div.reply_to a")?;
    let onclick = link.attribute("onclick")?;
    let caps = GO_TO_MESSAGE_RE.captures(onclick)?;
    Some(format!("message{}", &caps[1]))
}

/// Forwarding actor name, plus the detail/date suffix split off from it.
///
/// A name node holding nothing but the date yields no actor.
fn resolve_forward<N: MarkupNode>(node: &N) -> Option<(Option<String>, Option<String>)> {
    let forwarded = node.find("div.forwarded.body")?;
    let name_node = forwarded.find("div.from_name")?;

    let mut name = name_node.text_content();
    let date = name_node
        .find("span.details")
        .map(|d| normalize_text(&d.text_content()));

    if let Some(date) = date.as_deref() {
        name = name.replace(date, "").trim().to_string();
    }

    let name = normalize_text(&name);
    Some(((!name.is_empty()).then_some(name), date))
}

/// Call type (if the status phrase is recognized) and duration in seconds.
///
/// Calls without the `success` class that are not cancelled are demoted to
/// missed; missed calls carry no duration.
fn resolve_call<N: MarkupNode>(node: &N) -> Option<(Option<CallType>, Option<u32>)> {
    let call = node.find("div.media_call")?;
    let status = call.find("div.status.details")?;
    let status = normalize_text(&status.text_content());

    let mut call_type = CALL_MARKERS
        .iter()
        .find(|(marker, _)| status.contains(*marker))
        .map(|&(_, kind)| kind);

    if !call.has_class("success") && call_type.is_some_and(|t| t != CallType::Cancelled) {
        call_type = Some(CallType::Missed);
    }

    let duration = if call_type == Some(CallType::Missed) {
        None
    } else {
        CALL_DURATION_RE
            .captures(&status)
            .and_then(|caps| caps[1].parse::<u32>().ok())
    };

    Some((call_type, duration))
}
