//! Small enums shared by the player and the UI.

use crate::config::LoopModeSetting;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LoopMode {
    /// Stop after the last track.
    #[default]
    None,
    /// Repeat the current track when it ends.
    Media,
    /// Wrap around to the start of the queue.
    Queue,
}

impl LoopMode {
    /// `None -> Media -> Queue -> None`.
    pub fn cycled(self) -> Self {
        match self {
            Self::None => Self::Media,
            Self::Media => Self::Queue,
            Self::Queue => Self::None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Media => "Media",
            Self::Queue => "Queue",
        }
    }
}

impl From<LoopModeSetting> for LoopMode {
    fn from(setting: LoopModeSetting) -> Self {
        match setting {
            LoopModeSetting::None => Self::None,
            LoopModeSetting::Media => Self::Media,
            LoopModeSetting::Queue => Self::Queue,
        }
    }
}

/// Engine-facing playback status.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackState {
    /// Text for the play/pause control.
    pub fn button_label(self) -> &'static str {
        match self {
            Self::Stopped => "Play",
            Self::Playing => "Pause",
            Self::Paused => "Resume",
        }
    }
}
