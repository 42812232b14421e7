//! Progress reporting for site builds.
//!
//! A build walks the export one chat at a time. Library users who want
//! push-based updates pass a [`ProgressCallback`] to
//! [`SiteBuilder`](crate::pipeline::SiteBuilder); it is invoked once after
//! every chat directory, including skipped ones.
//!
//! # Example
//!
//! ```rust
//! use chatpage::progress::{Progress, ProgressCallback};
//! use std::sync::Arc;
//!
//! let callback: ProgressCallback = Arc::new(|progress| {
//!     if let Some(pct) = progress.percentage() {
//!         println!("Progress: {:.1}%", pct);
//!     }
//! });
//!
//! let total_chats = 4;
//! for i in 0..total_chats {
//!     callback(Progress::new(i + 1, total_chats, (i + 1) * 250));
//! }
//! ```

use std::sync::Arc;

/// Progress of a running build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    /// Chat directories handled so far, skipped ones included.
    pub chats_processed: usize,

    /// Chat directories found in the export.
    pub total_chats: usize,

    /// Messages parsed so far across all chats.
    pub messages_processed: usize,
}

impl Progress {
    pub fn new(chats_processed: usize, total_chats: usize, messages_processed: usize) -> Self {
        Self {
            chats_processed,
            total_chats,
            messages_processed,
        }
    }

    /// Returns the progress as a percentage (0.0 - 100.0).
    ///
    /// An export without chats counts as complete.
    ///
    /// ```rust
    /// use chatpage::progress::Progress;
    ///
    /// assert_eq!(Progress::new(1, 4, 10).percentage(), Some(25.0));
    /// assert_eq!(Progress::new(0, 0, 0).percentage(), Some(100.0));
    /// ```
    pub fn percentage(&self) -> Option<f64> {
        if self.total_chats == 0 {
            return Some(100.0);
        }
        Some((self.chats_processed as f64 / self.total_chats as f64) * 100.0)
    }

    pub fn is_complete(&self) -> bool {
        self.chats_processed >= self.total_chats
    }

    pub fn remaining_chats(&self) -> usize {
        self.total_chats.saturating_sub(self.chats_processed)
    }
}

/// Thread-safe callback receiving [`Progress`] updates.
pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

/// Creates a no-op progress callback.
///
/// ```rust
/// use chatpage::progress::no_progress;
///
/// let callback = no_progress();
/// callback(chatpage::progress::Progress::default()); // Does nothing
/// ```
pub fn no_progress() -> ProgressCallback {
    Arc::new(|_| {})
}

/// Creates a progress callback that prints to stderr.
///
/// ```rust
/// use chatpage::progress::stderr_progress;
///
/// let callback = stderr_progress();
/// // Prints "Progress: 1/2 chats (50.0%), 120 messages"
/// callback(chatpage::progress::Progress::new(1, 2, 120));
/// ```
pub fn stderr_progress() -> ProgressCallback {
    Arc::new(|progress| {
        if let Some(pct) = progress.percentage() {
            eprintln!(
                "Progress: {}/{} chats ({:.1}%), {} messages",
                progress.chats_processed, progress.total_chats, pct, progress.messages_processed
            );
        }
    })
}
