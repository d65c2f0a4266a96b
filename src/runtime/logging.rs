use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Settings;

/// Environment variable holding a `tracing` filter that overrides `log.level`.
pub const LOG_ENV: &str = "LANDPLAYER_LOG";

/// Send `tracing` output to the configured log file.
///
/// The terminal belongs to the UI, so there is no console fallback: when the
/// file cannot be opened, logging stays off. Returns the file in use.
pub fn init(settings: &Settings) -> Option<PathBuf> {
    let path = settings.log_file()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.log.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(path)
}
