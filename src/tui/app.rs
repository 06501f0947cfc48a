//! Application loop: draws the survey and routes key presses into it.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use tracing::info;

use crate::config::Config;
use crate::storage::Storage;

use super::palette::Palette;
use super::screens::SurveyScreen;

/// How long to wait for input when nothing on screen is scheduled to change.
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Runs the TUI event loop until the user quits.
pub fn run(config: &Config, storage: &Storage) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, config, storage);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, config: &Config, storage: &Storage) -> io::Result<()> {
    let palette = Palette::for_theme(config.theme);
    let mut screen = SurveyScreen::new(config.analysis_delay());
    info!(theme = %config.theme, "survey started");

    loop {
        terminal.draw(|frame| screen.render(frame, &palette))?;

        // Wake up in time to reveal the summary message.
        let timeout = screen.next_wakeup(Instant::now()).unwrap_or(IDLE_POLL);
        if !event::poll(timeout)? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(());
        }

        let submission = match key.code {
            KeyCode::Char('q') if screen.accepts_quit() => return Ok(()),
            KeyCode::Up => {
                screen.move_up();
                None
            }
            KeyCode::Down => {
                screen.move_down();
                None
            }
            KeyCode::Left => {
                screen.on_left();
                None
            }
            KeyCode::Right => {
                screen.on_right();
                None
            }
            KeyCode::Tab => screen.on_next(),
            KeyCode::BackTab | KeyCode::Esc => {
                screen.on_back();
                None
            }
            KeyCode::Enter => screen.on_enter(),
            KeyCode::Backspace => {
                screen.on_backspace();
                None
            }
            KeyCode::Char(c) => screen.on_char(c),
            _ => None,
        };

        if let Some(submission) = submission {
            storage.append(&submission).map_err(io::Error::other)?;
        }
    }
}
