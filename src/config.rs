//! Build configuration.
//!
//! [`BuildConfig`] is a plain serde struct with builder methods, usable from
//! library code without any CLI framework.
//!
//! # Example
//!
//! ```rust
//! use chatpage::config::BuildConfig;
//!
//! let config = BuildConfig::new("Files", "site")
//!     .with_chunk_size(5_000)
//!     .with_title_override("chat_002", "Project notes")
//!     .with_copy_media(false);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.chats_dir(), std::path::Path::new("Files/chats"));
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ChatpageError, IoContext, Result};

/// Messages per chunk file.
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Maximum code points of message text kept in the search index.
pub const DEFAULT_SEARCH_TEXT_LIMIT: usize = 500;

/// Configuration for one build run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Export root; chats are read from `<export_dir>/chats` (default: `Files`)
    pub export_dir: PathBuf,

    /// Output root, wiped at the start of every run (default: `site`)
    pub output_dir: PathBuf,

    /// Maximum messages per chunk file (default: 10,000)
    pub chunk_size: usize,

    /// Maximum code points of text per search entry (default: 500)
    pub search_text_limit: usize,

    /// Display titles keyed by chat directory name
    pub title_overrides: BTreeMap<String, String>,

    /// Static frontend copied into the output root, if it exists
    pub frontend_dir: Option<PathBuf>,

    /// Copy media folders into `media/<chat_id>/` (default: true)
    pub copy_media: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("Files"),
            output_dir: PathBuf::from("site"),
            chunk_size: DEFAULT_CHUNK_SIZE,
            search_text_limit: DEFAULT_SEARCH_TEXT_LIMIT,
            title_overrides: BTreeMap::new(),
            frontend_dir: None,
            copy_media: true,
        }
    }
}

impl BuildConfig {
    /// Creates a configuration for the given export and output roots.
    pub fn new(export_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Sets the chunk capacity.
    #[must_use]
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets the search text limit.
    #[must_use]
    pub fn with_search_text_limit(mut self, limit: usize) -> Self {
        self.search_text_limit = limit;
        self
    }

    /// Adds a single title override.
    #[must_use]
    pub fn with_title_override(
        mut self,
        chat_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        self.title_overrides.insert(chat_id.into(), title.into());
        self
    }

    /// Merges title overrides, replacing existing entries.
    #[must_use]
    pub fn with_title_overrides(mut self, overrides: BTreeMap<String, String>) -> Self {
        self.title_overrides.extend(overrides);
        self
    }

    /// Sets the frontend asset directory.
    #[must_use]
    pub fn with_frontend_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.frontend_dir = Some(dir.into());
        self
    }

    /// Enables or disables media copying.
    #[must_use]
    pub fn with_copy_media(mut self, enabled: bool) -> Self {
        self.copy_media = enabled;
        self
    }

    /// Directory holding one subdirectory per chat.
    pub fn chats_dir(&self) -> PathBuf {
        self.export_dir.join("chats")
    }

    /// Optional wallpaper directory of the export.
    pub fn wallpaper_dir(&self) -> PathBuf {
        self.export_dir.join("wallpaper")
    }

    /// Output directory for JSON artifacts.
    pub fn data_dir(&self) -> PathBuf {
        self.output_dir.join("data")
    }

    /// Output directory for relocated media.
    pub fn media_dir(&self) -> PathBuf {
        self.output_dir.join("media")
    }

    /// Checks values that would make a build meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ChatpageError::invalid_config(
                "chunk size must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Loads title overrides from a JSON object of `chat_id -> title`.
///
/// ```json
/// { "chat_002": "Project notes" }
/// ```
pub fn load_title_overrides(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = fs::read_to_string(path).at_path(path)?;
    serde_json::from_str(&content).map_err(|e| {
        ChatpageError::invalid_config(format!(
            "title overrides in {} must be a JSON object of strings: {e}",
            path.display()
        ))
    })
}
