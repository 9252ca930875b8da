use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::Duration;
use tracing::{debug, info};

use crate::app::AppState;
use crate::app::keymap::{KeyAction, KeyInput};
use crate::ui;

/// Whether the event loop keeps going after a key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Apply one key press to the view. The search box is live in every phase.
pub fn handle_key(app: &mut AppState, key: &KeyEvent) -> Flow {
    let Some(input) = app.keymap.interpret(key) else {
        return Flow::Continue;
    };
    let page = app.rows_per_page.max(1) as isize;
    match input {
        KeyInput::Insert(c) => app.push_query_char(c),
        KeyInput::Action(KeyAction::Quit) => return Flow::Quit,
        KeyInput::Action(KeyAction::DeleteBackward) => app.pop_query_char(),
        KeyInput::Action(KeyAction::ClearQuery) => app.clear_query(),
        KeyInput::Action(KeyAction::MoveUp) => app.move_selection(-1),
        KeyInput::Action(KeyAction::MoveDown) => app.move_selection(1),
        KeyInput::Action(KeyAction::PageUp) => app.move_selection(-page),
        KeyInput::Action(KeyAction::PageDown) => app.move_selection(page),
        KeyInput::Action(KeyAction::Ignore) => {}
    }
    Flow::Continue
}

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        if app.poll_fetch() {
            debug!(phase = app.view.label(), "phase changed");
        }

        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, &key) == Flow::Quit {
                    info!("quit requested");
                    break;
                }
            }
        }
    }
    Ok(())
}
