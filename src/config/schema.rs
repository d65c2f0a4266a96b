use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/landplayer/config.toml` or `~/.config/landplayer/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `LANDPLAYER__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub library: LibrarySettings,
    pub queue: QueueSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Loop mode at startup.
    pub loop_mode: LoopModeSetting,
    /// Progress tick period (milliseconds).
    pub tick_ms: u64,
    /// "Previous" restarts the current track once this much of it has played (milliseconds).
    pub restart_threshold_ms: u64,
    /// Initial volume in percent (0-100).
    pub volume: u8,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            loop_mode: LoopModeSetting::None,
            tick_ms: 100,
            restart_threshold_ms: 3000,
            volume: 100,
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoopModeSetting {
    #[serde(alias = "off", alias = "no_loop", alias = "no-loop")]
    None,
    #[serde(
        alias = "track",
        alias = "loop_one",
        alias = "loop-one",
        alias = "repeat-one"
    )]
    Media,
    #[serde(
        alias = "all",
        alias = "loop_all",
        alias = "loop-all",
        alias = "repeat-all"
    )]
    Queue,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to seek with the arrow keys.
    pub seek_seconds: u64,
    /// Volume change per key press, in percent.
    pub volume_step: u8,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_seconds: 5,
            volume_step: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Whether to follow symlinks when reading a folder.
    pub follow_links: bool,
    /// Whether to include hidden files (dotfiles).
    pub include_hidden: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            follow_links: true,
            include_hidden: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QueueSettings {
    /// Where `w`/`e` save and load the queue. Defaults to
    /// `$XDG_DATA_HOME/landplayer/queue.lukyland`.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive used when `LANDPLAYER_LOG` is unset.
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/landplayer/landplayer.log`.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
