//! user-directory binary entry point.
//!
//! Parses arguments, starts the runtime that carries the fetch, runs the TUI
//! event loop in raw mode and restores the terminal on exit.
//!
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::sync::Arc;
use tracing::info;

use user_directory::app::{self, AppState, Theme, keymap::Keymap};
use user_directory::config::Args;
use user_directory::error::{Context, Result};
use user_directory::net::HttpUserSource;
use user_directory::logging;

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        logging::init(path)?;
    }
    info!(url = %args.url, "starting user-directory");

    let runtime = tokio::runtime::Runtime::new().with_ctx(|| "start async runtime".to_string())?;
    let theme = Theme::load(args.theme.as_deref());
    let keymap = Keymap::load(args.keybinds.as_deref());
    let source = Arc::new(HttpUserSource::new(args.url.clone()));

    let mut terminal = init_terminal().map_err(|e| format!("init terminal: {}", e))?;

    let mut state = AppState::mount(runtime.handle(), source, theme, keymap);
    state.set_query(args.query.clone());
    let res = app::run(&mut terminal, &mut state);
    // Unmount before the runtime goes away so a pending fetch is aborted.
    drop(state);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        eprintln!("application error: {err}");
    }
    Ok(())
}
