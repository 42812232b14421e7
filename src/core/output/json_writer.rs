//! JSON output writer.
//!
//! Manifests are pretty-printed for humans; chunk and search files are
//! compact because the frontend fetches them. Non-ASCII text is written as
//! UTF-8, never `\u` escaped.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::models::{ChatManifest, GlobalManifest, SEARCH_FILE, SearchEntry};
use crate::core::pager::Chunk;
use crate::error::{IoContext, Result};

/// File name of both the global and the per-chat manifest.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Subdirectory of a chat's data dir holding chunk files.
pub const CHUNKS_DIR: &str = "chunks";

/// Converts a value to a compact JSON string.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Converts a value to a pretty-printed JSON string (two-space indent).
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn write_file(path: &Path, json: &str) -> Result<()> {
    let file = File::create(path).at_path(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(json.as_bytes()).at_path(path)?;
    writer.flush().at_path(path)?;
    Ok(())
}

/// Writes a value as compact JSON.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    write_file(path, &to_json(value)?)
}

/// Writes a value as pretty-printed JSON.
pub fn write_json_pretty<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    write_file(path, &to_json_pretty(value)?)
}

/// Writes every artifact of one chat under `data_dir/<chat_id>/`.
///
/// Layout:
/// ```text
/// <chat_id>/manifest.json        pretty
/// <chat_id>/search.json          compact
/// <chat_id>/chunks/chunk_0001.json compact
/// ```
///
/// Returns the chat's output directory.
pub fn write_chat(
    data_dir: &Path,
    manifest: &ChatManifest,
    chunks: &[Chunk<'_>],
    search: &[SearchEntry],
) -> Result<PathBuf> {
    let chat_dir = data_dir.join(&manifest.chat_id);
    let chunks_dir = chat_dir.join(CHUNKS_DIR);
    fs::create_dir_all(&chunks_dir).at_path(&chunks_dir)?;

    for chunk in chunks {
        write_json(chunk.messages, &chunks_dir.join(&chunk.page.filename))?;
    }

    write_json(search, &chat_dir.join(SEARCH_FILE))?;
    write_json_pretty(manifest, &chat_dir.join(MANIFEST_FILE))?;

    Ok(chat_dir)
}

/// Writes `data_dir/manifest.json`.
pub fn write_global_manifest(data_dir: &Path, manifest: &GlobalManifest) -> Result<()> {
    fs::create_dir_all(data_dir).at_path(data_dir)?;
    write_json_pretty(manifest, &data_dir.join(MANIFEST_FILE))
}
