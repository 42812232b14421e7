//! Whole-export build pipeline.
//!
//! [`SiteBuilder`] turns an export root into a static site tree:
//!
//! ```text
//! <output>/data/manifest.json
//! <output>/data/<chat_id>/{manifest.json, search.json, chunks/chunk_NNNN.json}
//! <output>/media/<chat_id>/<folder>/...
//! <output>/images/wallpaper/...      (when the export has a wallpaper dir)
//! <output>/...                       (frontend assets, when configured)
//! ```
//!
//! The output root is wiped at the start of every run. Chats are processed
//! one at a time, in directory name order.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> chatpage::Result<()> {
//! use chatpage::config::BuildConfig;
//! use chatpage::pipeline::SiteBuilder;
//! use chatpage::progress::stderr_progress;
//!
//! let config = BuildConfig::new("Files", "site").with_chunk_size(5_000);
//! let report = SiteBuilder::new(config)
//!     .with_progress(stderr_progress())
//!     .build()?;
//!
//! println!("{} chats, {} messages", report.manifest.total_chats, report.manifest.total_messages);
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{info, warn};

use crate::config::BuildConfig;
use crate::core::output::{write_chat, write_global_manifest};
use crate::core::{
    ChatSummary, Conversation, GlobalManifest, build_chat_manifest, build_global_manifest,
    build_search_index, paginate,
};
use crate::error::{ChatpageError, IoContext, Result};
use crate::media::{WALLPAPER_DIR, overlay_dir, relocate_media, replace_dir};
use crate::parser::ExportParser;
use crate::progress::{Progress, ProgressCallback, no_progress};

/// Prefix shared by every chat directory name.
pub const CHAT_DIR_PREFIX: &str = "chat_";

/// Outcome of a successful build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    /// The global manifest as written to `data/manifest.json`.
    pub manifest: GlobalManifest,

    /// Chat directories without any message document.
    pub skipped_chats: Vec<String>,

    /// Messages parsed across all chats, forwarded ones included.
    pub parsed_messages: usize,

    /// Media files copied into `media/`.
    pub media_files: usize,
}

/// Drives a full build for one [`BuildConfig`].
pub struct SiteBuilder {
    config: BuildConfig,
    parser: ExportParser,
    progress: ProgressCallback,
}

impl SiteBuilder {
    pub fn new(config: BuildConfig) -> Self {
        let parser = ExportParser::new().with_title_overrides(config.title_overrides.clone());
        Self {
            config,
            parser,
            progress: no_progress(),
        }
    }

    /// Sets the callback invoked after every chat directory.
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Runs the build.
    ///
    /// # Errors
    ///
    /// - [`ChatpageError::InvalidConfig`] if the configuration does not validate
    /// - [`ChatpageError::MissingExportRoot`] if `<export_dir>/chats` does not
    ///   exist; the empty `data/` and `media/` directories are already created
    /// - I/O and JSON errors from reading documents or writing artifacts
    pub fn build(&self) -> Result<BuildReport> {
        self.config.validate()?;

        let data_dir = self.config.data_dir();
        let media_dir = self.config.media_dir();
        prepare_output(&self.config.output_dir, &data_dir, &media_dir)?;

        let chats_dir = self.config.chats_dir();
        if !chats_dir.is_dir() {
            return Err(ChatpageError::missing_export_root(chats_dir));
        }

        let chat_dirs = list_chat_dirs(&chats_dir)?;
        info!(chats = chat_dirs.len(), path = %chats_dir.display(), "found chats to process");

        let mut summaries = Vec::with_capacity(chat_dirs.len());
        let mut skipped_chats = Vec::new();
        let mut parsed_messages = 0;
        let mut media_files = 0;

        for (idx, chat_dir) in chat_dirs.iter().enumerate() {
            match self.parser.parse_chat(chat_dir)? {
                Some(conversation) => {
                    parsed_messages += conversation.messages.len();
                    summaries.push(self.write_conversation(&conversation)?);
                    if self.config.copy_media {
                        media_files += relocate_media(chat_dir, &media_dir, &conversation.chat_id)?;
                    }
                }
                None => skipped_chats.push(dir_name(chat_dir)),
            }
            (self.progress)(Progress::new(idx + 1, chat_dirs.len(), parsed_messages));
        }

        let manifest = build_global_manifest(summaries, Local::now().naive_local());
        write_global_manifest(&data_dir, &manifest)?;

        self.copy_frontend()?;
        self.copy_wallpaper()?;

        info!(
            chats = manifest.total_chats,
            messages = manifest.total_messages,
            skipped = skipped_chats.len(),
            "build complete"
        );

        Ok(BuildReport {
            manifest,
            skipped_chats,
            parsed_messages,
            media_files,
        })
    }

    /// Pages, indexes and writes one conversation.
    fn write_conversation(&self, conversation: &Conversation) -> Result<ChatSummary> {
        let chunks = paginate(&conversation.messages, self.config.chunk_size);
        let search = build_search_index(&conversation.messages, self.config.search_text_limit);
        let manifest = build_chat_manifest(conversation, &chunks);

        write_chat(&self.config.data_dir(), &manifest, &chunks, &search)?;

        info!(
            chat_id = %manifest.chat_id,
            title = %manifest.title,
            messages = conversation.messages.len(),
            chunks = manifest.chunk_count,
            "processed chat"
        );
        Ok(manifest.summary())
    }

    fn copy_frontend(&self) -> Result<()> {
        let Some(frontend) = &self.config.frontend_dir else {
            return Ok(());
        };
        if !frontend.is_dir() {
            warn!(path = %frontend.display(), "frontend directory not found, skipping");
            return Ok(());
        }
        let files = overlay_dir(frontend, &self.config.output_dir)?;
        info!(path = %frontend.display(), files, "copied frontend");
        Ok(())
    }

    fn copy_wallpaper(&self) -> Result<()> {
        let wallpaper = self.config.wallpaper_dir();
        if !wallpaper.is_dir() {
            warn!(path = %wallpaper.display(), "wallpaper directory not found, skipping");
            return Ok(());
        }
        let files = replace_dir(&wallpaper, &self.config.output_dir.join(WALLPAPER_DIR))?;
        info!(path = %wallpaper.display(), files, "copied wallpaper");
        Ok(())
    }
}

/// Builds the site described by `config` without progress reporting.
pub fn build_site(config: &BuildConfig) -> Result<BuildReport> {
    SiteBuilder::new(config.clone()).build()
}

/// Wipes the output root and recreates its `data/` and `media/` shells.
fn prepare_output(output_dir: &Path, data_dir: &Path, media_dir: &Path) -> Result<()> {
    if output_dir.exists() {
        info!(path = %output_dir.display(), "cleaning previous output");
        fs::remove_dir_all(output_dir).at_path(output_dir)?;
    }
    fs::create_dir_all(data_dir).at_path(data_dir)?;
    fs::create_dir_all(media_dir).at_path(media_dir)?;
    Ok(())
}

/// Subdirectories of `chats_dir` named `chat_*`, sorted by name.
pub fn list_chat_dirs(chats_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(chats_dir).at_path(chats_dir)? {
        let path = entry.at_path(chats_dir)?.path();
        if path.is_dir() && dir_name(&path).starts_with(CHAT_DIR_PREFIX) {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
