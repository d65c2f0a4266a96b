use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;

/// Extensions accepted as audio (compared case-insensitively, without dot).
pub const AUDIO_EXTENSIONS: [&str; 5] = ["mp3", "wav", "flac", "aac", "ogg"];

/// Video container extensions, rejected everywhere.
pub const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "avi", "mkv", "mov", "wmv"];

fn has_extension(path: &Path, exts: &[&str]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| *e == ext)
        })
        .unwrap_or(false)
}

pub fn is_audio_file(path: &Path) -> bool {
    has_extension(path, &AUDIO_EXTENSIONS)
}

pub fn is_video_file(path: &Path) -> bool {
    has_extension(path, &VIDEO_EXTENSIONS)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Collect the audio files directly inside `dir`, sorted by path.
///
/// Subdirectories are not descended into.
pub fn scan_folder(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .min_depth(1)
        .max_depth(1);

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(Result::ok)
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file() && (settings.include_hidden || !is_hidden(path)) && is_audio_file(path)
        })
        .collect();

    files.sort();
    files
}
