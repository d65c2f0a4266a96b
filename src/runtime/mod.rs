use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::{LoftyMetadata, RodioEngine};
use crate::player::{Player, PlayerEvent, PlayerOptions};

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, settings_problem) = settings::load_settings();
    let log_file = logging::init(&settings);
    info!(log_file = ?log_file, "landplayer starting");
    if let Some(problem) = &settings_problem {
        warn!("{problem}");
    }

    let engine = RodioEngine::open_default()?;
    let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();
    let mut player = Player::new(
        engine,
        LoftyMetadata,
        PlayerOptions::from(&settings.playback),
        Box::new(event_tx),
    );

    let mut app = App::new(player.loop_mode(), player.volume());
    if let Some(problem) = settings_problem {
        app.set_notice(problem);
    }
    if let Some(path) = env::args_os().nth(1).map(PathBuf::from) {
        let notice = startup::open_initial_path(&mut player, &path, &settings);
        app.set_notice(notice);
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut player, &event_rx);
    player.stop();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("landplayer exiting");
    run_result
}
