//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use std::{collections::BTreeMap, sync::LazyLock};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::config::ControlsSettings;
use crate::library::display_name;

const NOW_PLAYING_MARKER: &str = "► ";

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "select");
    map.insert("J/K", "move track");
    map.insert("enter", "play selected");
    map.insert("space/p", "play/pause");
    map.insert("b/n", "prev/next");
    // ←/→ is filled from config.
    map.insert("s", "shuffle");
    map.insert("r", "loop mode");
    map.insert("d", "remove");
    map.insert("w/e", "save/load queue");
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating seek and volume steps.
fn controls_text(controls: &ControlsSettings) -> String {
    let order = [
        "j/k", "enter", "space/p", "b/n", "←/→", "+/-", "J/K", "d", "s", "r", "w/e", "q",
    ];
    order
        .iter()
        .filter_map(|k| match *k {
            "←/→" => Some(format!("[←/→] seek -/+{}s", controls.seek_seconds)),
            "+/-" => Some(format!("[+/-] volume ±{}%", controls.volume_step)),
            _ => CONTROLS_MAP.get(k).map(|v| format!("[{k}] {v}")),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

fn status_text(app: &App) -> String {
    let mut parts = vec![
        format!("[{}] {}", app.state.button_label(), app.now_playing_text()),
        format!("LOOP: {}", app.loop_mode.label()),
        format!("VOL: {}%", app.volume),
    ];
    if let Some(notice) = &app.notice {
        parts.push(notice.clone());
    }
    parts.join(" • ")
}

/// Render the entire UI into the provided `frame`.
pub fn draw(frame: &mut Frame, app: &App, controls: &ControlsSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let status = Paragraph::new(status_text(app))
        .block(
            Block::bordered()
                .padding(Padding::left(1))
                .title(" landplayer ")
                .title_alignment(Alignment::Center),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[0]);

    let gauge = Gauge::default()
        .block(Block::bordered().title(" progress "))
        .gauge_style(Style::default().add_modifier(Modifier::BOLD))
        .ratio(app.progress_ratio())
        .label(app.time_text());
    frame.render_widget(gauge, chunks[1]);

    // Only build items for the visible window, centred on the cursor when possible.
    {
        let total = app.tracks.len();
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let (start, end) = if total <= list_height || list_height == 0 {
            (0, total)
        } else {
            let half = list_height / 2;
            let start = app.selected.saturating_sub(half).min(total - list_height);
            (start, start + list_height)
        };

        let items: Vec<ListItem> = app.tracks[start..end]
            .iter()
            .enumerate()
            .map(|(offset, path)| {
                let index = start + offset;
                let marker = if app.current == Some(index) {
                    NOW_PLAYING_MARKER
                } else {
                    "  "
                };
                ListItem::new(format!("{marker}{:>3}. {}", index + 1, display_name(path)))
            })
            .collect();

        let title = format!(" queue ({}) ", total);
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(app.selected - start));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    let footer = Paragraph::new(controls_text(controls))
        .dim()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding::left(1)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
