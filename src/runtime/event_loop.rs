use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;

use crate::app::{App, describe_load};
use crate::audio::{AudioEngine, MetadataReader};
use crate::config;
use crate::library::display_name;
use crate::player::{PlaybackState, Player, PlayerEvent};
use crate::ui;

/// Longest wait for input while no tick is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Main terminal event loop: runs due ticks, folds player events into `app`,
/// draws, and handles one key. Returns `Ok(())` when quit is requested.
pub fn run<E: AudioEngine, M: MetadataReader>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player<E, M>,
    events: &Receiver<PlayerEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        player.poll();
        for event in events.try_iter() {
            app.apply(event);
        }

        terminal.draw(|f| ui::draw(f, app, &settings.controls))?;

        let wait = player.time_until_tick().map_or(IDLE_POLL, |d| d.min(IDLE_POLL));
        if event::poll(wait)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, player) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press. Returns true when the app should quit.
fn handle_key_event<E: AudioEngine, M: MetadataReader>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player<E, M>,
) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            player.stop();
            return true;
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            if player.state() == PlaybackState::Stopped {
                if app.has_tracks() {
                    player.play_at(app.selected);
                }
            } else {
                player.toggle_pause();
            }
        }
        KeyCode::Enter => {
            if app.has_tracks() {
                player.play_at(app.selected);
            }
        }
        KeyCode::Char('n') => player.next(),
        KeyCode::Char('b') => player.previous(),
        KeyCode::Left => player.seek_by(-seek_step(settings)),
        KeyCode::Right => player.seek_by(seek_step(settings)),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('J') => {
            let from = app.selected;
            if from + 1 < app.tracks.len() && player.move_track(from, from + 1).is_ok() {
                app.selected = from + 1;
            }
        }
        KeyCode::Char('K') => {
            let from = app.selected;
            if from > 0 && player.move_track(from, from - 1).is_ok() {
                app.selected = from - 1;
            }
        }
        KeyCode::Char('d') => {
            if app.has_tracks() {
                if let Ok(removed) = player.remove(app.selected) {
                    app.set_notice(format!("Removed {}", display_name(&removed)));
                }
            }
        }
        KeyCode::Char('s') => player.shuffle(),
        KeyCode::Char('r') => player.cycle_loop_mode(),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            player.set_volume(player.volume().saturating_add(settings.controls.volume_step));
        }
        KeyCode::Char('-') => {
            player.set_volume(player.volume().saturating_sub(settings.controls.volume_step));
        }
        KeyCode::Char('w') => save_queue(settings, app, player),
        KeyCode::Char('e') => load_queue(settings, app, player),
        _ => {}
    }

    false
}

fn seek_step(settings: &config::Settings) -> i64 {
    i64::try_from(settings.controls.seek_seconds).unwrap_or(i64::MAX)
}

fn save_queue<E: AudioEngine, M: MetadataReader>(
    settings: &config::Settings,
    app: &mut App,
    player: &Player<E, M>,
) {
    let Some(path) = settings.queue_file() else {
        app.set_notice("No queue file configured");
        return;
    };
    match player.save_queue(&path) {
        Ok(()) => app.set_notice(format!("Queue saved to {}", path.display())),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "saving queue failed");
            app.set_notice(e.to_string());
        }
    }
}

fn load_queue<E: AudioEngine, M: MetadataReader>(
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player<E, M>,
) {
    let Some(path) = settings.queue_file() else {
        app.set_notice("No queue file configured");
        return;
    };
    match player.load_queue(&path) {
        Ok(report) => {
            app.set_selected(0);
            app.set_notice(describe_load(&report));
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "loading queue failed");
            app.set_notice(e.to_string());
        }
    }
}
