//! Media relocation and static asset copying.
//!
//! Each chat's media folders are copied wholesale into
//! `<output>/media/<chat_id>/<folder>`, matching the hrefs rewritten by
//! [`rewrite_media_href`](crate::parsing::rewrite_media_href). The same
//! recursive copy also places the frontend and the export's wallpaper.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{IoContext, Result};
use crate::parsing::MEDIA_FOLDERS;

/// Output subdirectory receiving the export's wallpaper.
pub const WALLPAPER_DIR: &str = "images/wallpaper";

/// Copies every file under `src` into `dest`, preserving relative paths.
///
/// `dest` and any missing parents are created. Symlinks are skipped.
/// Returns the number of files copied.
pub fn copy_dir_contents(src: &Path, dest: &Path) -> Result<usize> {
    fs::create_dir_all(dest).at_path(dest)?;

    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(io::Error::from).at_path(src)?;
        let file_type = entry.file_type();
        if file_type.is_symlink() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
            .at_path(entry.path())?;
        let target = dest.join(relative);

        if file_type.is_dir() {
            fs::create_dir_all(&target).at_path(&target)?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target).at_path(&target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Replaces `dest` with a fresh recursive copy of `src`.
pub fn replace_dir(src: &Path, dest: &Path) -> Result<usize> {
    if dest.exists() {
        fs::remove_dir_all(dest).at_path(dest)?;
    }
    copy_dir_contents(src, dest)
}

/// Copies the top-level entries of `src` into `dest`.
///
/// Each subdirectory replaces its counterpart in `dest`; plain files
/// overwrite. Entries of `dest` with no counterpart in `src` are left alone.
/// Returns the number of files copied.
pub fn overlay_dir(src: &Path, dest: &Path) -> Result<usize> {
    fs::create_dir_all(dest).at_path(dest)?;

    let mut copied = 0;
    for entry in fs::read_dir(src).at_path(src)? {
        let entry = entry.at_path(src)?;
        let file_type = entry.file_type().at_path(entry.path())?;
        let target = dest.join(entry.file_name());

        if file_type.is_dir() {
            copied += replace_dir(&entry.path(), &target)?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target).at_path(&target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Copies the media folders present in `chat_dir` into `media_dir/<chat_id>/`.
///
/// Folders absent from the chat are ignored. Returns the number of files
/// copied.
pub fn relocate_media(chat_dir: &Path, media_dir: &Path, chat_id: &str) -> Result<usize> {
    let chat_media = media_dir.join(chat_id);
    let mut copied = 0;

    for folder in MEDIA_FOLDERS {
        let src = chat_dir.join(folder);
        if !src.is_dir() {
            continue;
        }
        let count = replace_dir(&src, &chat_media.join(folder))?;
        debug!(chat_id, folder, files = count, "relocated media folder");
        copied += count;
    }

    Ok(copied)
}
