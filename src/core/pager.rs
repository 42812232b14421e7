//! Partitioning of a conversation into fixed-capacity chunks.
//!
//! Chunks are consecutive slices of the message list in encounter order.
//! Concatenating every chunk in file name order reproduces the input exactly.

use chrono::NaiveDateTime;

use super::models::Page;
use crate::Message;

/// A page description together with the messages it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk<'a> {
    pub page: Page,
    pub messages: &'a [Message],
}

/// File name of the `number`-th chunk (1-based).
///
/// ```rust
/// use chatpage::core::pager::chunk_filename;
///
/// assert_eq!(chunk_filename(1), "chunk_0001.json");
/// assert_eq!(chunk_filename(12), "chunk_0012.json");
/// ```
pub fn chunk_filename(number: usize) -> String {
    format!("chunk_{number:04}.json")
}

/// Earliest and latest timestamps among `messages`, skipping untimed ones.
pub fn date_range(messages: &[Message]) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
    let timestamps = || messages.iter().filter_map(|m| m.timestamp);
    (timestamps().min(), timestamps().max())
}

/// Splits `messages` into chunks of at most `chunk_size` messages.
///
/// A `chunk_size` of zero is treated as one. An empty input yields no chunks.
pub fn paginate(messages: &[Message], chunk_size: usize) -> Vec<Chunk<'_>> {
    messages
        .chunks(chunk_size.max(1))
        .enumerate()
        .map(|(idx, slice)| {
            let (start_date, end_date) = date_range(slice);
            Chunk {
                page: Page {
                    filename: chunk_filename(idx + 1),
                    message_count: slice.len(),
                    start_id: slice[0].message_id.clone(),
                    end_id: slice[slice.len() - 1].message_id.clone(),
                    start_date,
                    end_date,
                },
                messages: slice,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 8, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn numbered(count: usize) -> Vec<Message> {
        (0..count)
            .map(|i| Message::new(format!("message{i}")))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(paginate(&[], 10).is_empty());
    }

    #[test]
    fn test_exact_and_partial_chunks() {
        let msgs = numbered(25);
        let chunks = paginate(&msgs, 10);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].page.filename, "chunk_0001.json");
        assert_eq!(chunks[2].page.filename, "chunk_0003.json");
        assert_eq!(chunks[0].page.message_count, 10);
        assert_eq!(chunks[2].page.message_count, 5);
        assert_eq!(chunks[1].page.start_id, "message10");
        assert_eq!(chunks[1].page.end_id, "message19");
        assert_eq!(chunks[2].messages.len(), 5);
    }

    #[test]
    fn test_exact_multiple_has_no_empty_chunk() {
        let msgs = numbered(20);
        assert_eq!(paginate(&msgs, 10).len(), 2);
    }

    #[test]
    fn test_zero_chunk_size_treated_as_one() {
        let msgs = numbered(3);
        assert_eq!(paginate(&msgs, 0).len(), 3);
    }

    #[test]
    fn test_date_range_ignores_untimed_and_order() {
        let msgs = vec![
            Message::new("message1").with_timestamp(ts(9, 10)),
            Message::new("message2"),
            Message::new("message3").with_timestamp(ts(7, 8)),
            Message::new("message4").with_timestamp(ts(8, 12)),
        ];
        let (start, end) = date_range(&msgs);
        assert_eq!(start, Some(ts(7, 8)));
        assert_eq!(end, Some(ts(9, 10)));
    }

    #[test]
    fn test_date_range_none_when_untimed() {
        let msgs = numbered(4);
        let chunks = paginate(&msgs, 2);
        assert_eq!(chunks[0].page.start_date, None);
        assert_eq!(chunks[0].page.end_date, None);
    }
}
