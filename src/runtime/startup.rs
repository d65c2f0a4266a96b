use std::path::Path;

use tracing::warn;

use crate::app::describe_load;
use crate::audio::{AudioEngine, MetadataReader};
use crate::config::Settings;
use crate::player::Player;
use crate::queue::QUEUE_FILE_EXTENSION;

/// Open the command-line argument: a folder, a saved queue, or a single file.
///
/// Returns a line for the status bar.
pub fn open_initial_path<E: AudioEngine, M: MetadataReader>(
    player: &mut Player<E, M>,
    path: &Path,
    settings: &Settings,
) -> String {
    let is_queue_file = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(QUEUE_FILE_EXTENSION));

    let result = if path.is_dir() {
        player
            .open_folder(path, &settings.library)
            .map(|count| format!("Opened {count} tracks from {}", path.display()))
            .map_err(|e| e.to_string())
    } else if is_queue_file {
        player
            .load_queue(path)
            .map(|report| describe_load(&report))
            .map_err(|e| e.to_string())
    } else {
        player
            .open_file(path.to_path_buf())
            .map(|()| format!("Opened {}", path.display()))
            .map_err(|e| e.to_string())
    };

    result.unwrap_or_else(|msg| {
        warn!(path = %path.display(), "{msg}");
        msg
    })
}
