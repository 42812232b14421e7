//! Command-line interface definition using clap.
//!
//! [`Args`] maps one-to-one onto [`BuildConfig`]; see
//! [`Args::to_config`].
//!
//! ```rust
//! use chatpage::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatpage", "-i", "export", "--chunk-size", "500", "--no-media"]);
//! let config = args.to_config().unwrap();
//!
//! assert_eq!(config.chunk_size, 500);
//! assert!(!config.copy_media);
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::config::{BuildConfig, DEFAULT_CHUNK_SIZE, load_title_overrides};
use crate::error::Result;

/// Build a browsable static site from a Telegram Desktop HTML export.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatpage")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatpage
    chatpage -i ~/Downloads/Telegram/ChatExport -o public
    chatpage --chunk-size 5000 --titles titles.json
    chatpage --no-media --frontend web")]
pub struct Args {
    /// Export root containing the `chats` directory
    #[arg(short, long, value_name = "DIR", default_value = "Files")]
    pub input: PathBuf,

    /// Output root (wiped before every run)
    #[arg(short, long, value_name = "DIR", default_value = "site")]
    pub output: PathBuf,

    /// Maximum messages per chunk file
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// JSON file mapping chat directory names to display titles
    #[arg(long, value_name = "FILE")]
    pub titles: Option<PathBuf>,

    /// Static frontend copied into the output root (skipped if missing)
    #[arg(long, value_name = "DIR", default_value = "frontend")]
    pub frontend: PathBuf,

    /// Do not copy media folders
    #[arg(long)]
    pub no_media: bool,

    /// Log every parsed document
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the run configuration, loading title overrides if given.
    pub fn to_config(&self) -> Result<BuildConfig> {
        let mut config = BuildConfig::new(&self.input, &self.output)
            .with_chunk_size(self.chunk_size)
            .with_frontend_dir(&self.frontend)
            .with_copy_media(!self.no_media);

        if let Some(path) = &self.titles {
            config = config.with_title_overrides(load_title_overrides(path)?);
        }

        Ok(config)
    }

    /// Default log filter directive.
    pub fn log_directive(&self) -> &'static str {
        if self.verbose { "chatpage=debug" } else { "chatpage=info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["chatpage"]);
        assert_eq!(args.input, PathBuf::from("Files"));
        assert_eq!(args.output, PathBuf::from("site"));
        assert_eq!(args.chunk_size, 10_000);
        assert_eq!(args.frontend, PathBuf::from("frontend"));
        assert!(!args.no_media);
        assert_eq!(args.log_directive(), "chatpage=info");

        let config = args.to_config().unwrap();
        assert!(config.copy_media);
        assert_eq!(config.frontend_dir, Some(PathBuf::from("frontend")));
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "chatpage", "--input", "in", "-o", "out", "--chunk-size", "7", "--no-media", "-v",
        ]);
        assert_eq!(args.log_directive(), "chatpage=debug");

        let config = args.to_config().unwrap();
        assert_eq!(config.export_dir, PathBuf::from("in"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.chunk_size, 7);
        assert!(!config.copy_media);
    }

    #[test]
    fn test_titles_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("titles.json");
        fs::write(&path, r#"{"chat_004": "Family"}"#).unwrap();

        let args = Args::parse_from([OsStr::new("chatpage"), OsStr::new("--titles"), path.as_os_str()]);
        let config = args.to_config().unwrap();
        assert_eq!(config.title_overrides["chat_004"], "Family");
    }

    #[test]
    fn test_rejects_non_numeric_chunk_size() {
        assert!(Args::try_parse_from(["chatpage", "--chunk-size", "many"]).is_err());
    }
}
