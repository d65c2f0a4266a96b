use std::path::Path;
use std::time::Duration;

/// Name shown for a queue entry: the file name, or the whole path when it has none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format a `Duration` as `MM:SS`.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Format a track length, using a placeholder when it is unknown.
pub fn format_total(total: Option<Duration>) -> String {
    match total {
        Some(d) if !d.is_zero() => format_mmss(d),
        _ => "--:--".to_string(),
    }
}
