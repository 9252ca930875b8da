//! Application state types and entry glue.
//!
//! Models the directory view as a single tagged `ViewState`, owns the one
//! in-flight fetch, and re-exports the event loop as `run`.
//!
pub mod keymap;
pub mod update;

use ratatui::style::Color;
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Handle;
use tracing::{info, warn};

use crate::net::{FetchOutcome, FetchTask, UserRecord, UserSource};
use crate::search;
use keymap::Keymap;

/// Lifecycle phase of the directory view. Exactly one is active at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Error(String),
    Ready(Vec<UserRecord>),
}

impl ViewState {
    pub fn label(&self) -> &'static str {
        match self {
            ViewState::Loading => "LOADING",
            ViewState::Error(_) => "ERROR",
            ViewState::Ready(_) => "READY",
        }
    }
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub error: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
}

impl Theme {
    /// Plain 16-color theme.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            error: Color::Red,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
        }
    }

    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            error: Color::Rgb(0xf3, 0x8b, 0xa8),        // red
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
        }
    }

    /// Parse a theme from `key = value` lines. Unknown keys or bad colors fall back to `mocha`.
    pub fn parse(contents: &str) -> Self {
        let mut theme = Self::mocha();
        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let key = parts.next().map(|s| s.trim()).unwrap_or("");
            let val = parts.next().map(|s| s.trim()).unwrap_or("");
            if key.is_empty() || val.is_empty() {
                continue;
            }
            if let Some(color) = Self::parse_color(val) {
                match key {
                    "text" => theme.text = color,
                    "muted" => theme.muted = color,
                    "title" => theme.title = color,
                    "border" => theme.border = color,
                    "error" => theme.error = color,
                    "status_bg" => theme.status_bg = color,
                    "status_fg" => theme.status_fg = color,
                    "highlight_fg" => theme.highlight_fg = color,
                    "highlight_bg" => theme.highlight_bg = color,
                    _ => {}
                }
            }
        }
        theme
    }

    /// Load a theme file; `None` if it cannot be read.
    pub fn from_file(path: &std::path::Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Load from `path` when given, falling back to `mocha` if absent or unreadable.
    pub fn load(path: Option<&std::path::Path>) -> Self {
        match path {
            Some(p) => Self::from_file(p).unwrap_or_else(|| {
                warn!(path = %p.display(), "theme file unreadable, using defaults");
                Self::mocha()
            }),
            None => Self::mocha(),
        }
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or the name "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(lower.as_str());
        if hex.len() == 6 && hex.is_ascii() {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Some(Color::Rgb(r, g, b));
            }
        }
        None
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

pub struct AppState {
    pub started_at: Instant,
    pub view: ViewState,
    pub search_query: String,
    pub selected_index: usize,
    pub rows_per_page: usize,
    pub theme: Theme,
    pub keymap: Keymap,
    fetch: Option<FetchTask>,
}

impl AppState {
    /// A view in the `Loading` phase with no fetch attached.
    pub fn new(theme: Theme, keymap: Keymap) -> Self {
        Self {
            started_at: Instant::now(),
            view: ViewState::Loading,
            search_query: String::new(),
            selected_index: 0,
            rows_per_page: 10,
            theme,
            keymap,
            fetch: None,
        }
    }

    /// Mount the view: enter `Loading` and launch the one fetch it will ever make.
    pub fn mount(handle: &Handle, source: Arc<dyn UserSource>, theme: Theme, keymap: Keymap) -> Self {
        let mut app = Self::new(theme, keymap);
        app.fetch = Some(FetchTask::spawn(handle, source));
        app
    }

    /// Drain the fetch if it has finished. Returns true when the phase changed.
    pub fn poll_fetch(&mut self) -> bool {
        let Some(task) = self.fetch.as_mut() else {
            return false;
        };
        match task.try_take() {
            Some(outcome) => {
                self.fetch = None;
                self.apply_outcome(outcome)
            }
            None => false,
        }
    }

    /// Move out of `Loading` according to `outcome`. Outcomes in any other phase are ignored.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) -> bool {
        if self.view != ViewState::Loading {
            warn!(phase = self.view.label(), "ignoring fetch outcome outside loading phase");
            return false;
        }
        self.view = match outcome {
            Ok(users) => {
                info!(count = users.len(), elapsed_ms = self.started_at.elapsed().as_millis() as u64, "directory ready");
                ViewState::Ready(users)
            }
            Err(message) => {
                info!(%message, "directory failed to load");
                ViewState::Error(message)
            }
        };
        search::apply_search(self, None);
        true
    }

    pub fn is_fetch_pending(&self) -> bool {
        self.fetch.is_some()
    }

    /// Every fetched record, or an empty slice outside `Ready`.
    pub fn users_all(&self) -> &[UserRecord] {
        match &self.view {
            ViewState::Ready(users) => users,
            ViewState::Loading | ViewState::Error(_) => &[],
        }
    }

    /// The records currently shown: `Ready` records narrowed by the query.
    pub fn visible_users(&self) -> Vec<&UserRecord> {
        search::filter_users(self.users_all(), &self.search_query)
    }

    pub fn selected_user(&self) -> Option<&UserRecord> {
        self.visible_users().get(self.selected_index).copied()
    }

    fn edit_query(&mut self, edit: impl FnOnce(&mut String)) {
        let anchor = self.selected_user().map(|u| u.id);
        edit(&mut self.search_query);
        search::apply_search(self, anchor);
    }

    pub fn push_query_char(&mut self, c: char) {
        self.edit_query(|q| q.push(c));
    }

    pub fn pop_query_char(&mut self) {
        self.edit_query(|q| {
            q.pop();
        });
    }

    pub fn clear_query(&mut self) {
        self.edit_query(String::clear);
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.edit_query(|q| *q = query);
    }

    /// Move the cursor by `delta` rows, clamped to the visible list.
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.visible_users().len();
        if len == 0 {
            self.selected_index = 0;
            return;
        }
        let next = self.selected_index.saturating_add_signed(delta);
        self.selected_index = next.min(len - 1);
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_app() -> AppState {
        let mut app = AppState::new(Theme::dark(), Keymap::default());
        app.apply_outcome(Ok(vec![
            UserRecord::new(1, "John Doe"),
            UserRecord::new(2, "Jane Doe"),
        ]));
        app
    }

    #[test]
    fn new_view_starts_loading_with_nothing_visible() {
        let app = AppState::new(Theme::dark(), Keymap::default());
        assert_eq!(app.view, ViewState::Loading);
        assert!(app.visible_users().is_empty());
        assert!(!app.is_fetch_pending());
    }

    #[test]
    fn query_edits_while_loading_do_not_change_phase() {
        let mut app = AppState::new(Theme::dark(), Keymap::default());
        app.push_query_char('J');
        assert_eq!(app.search_query, "J");
        assert_eq!(app.view, ViewState::Loading);
    }

    #[test]
    fn error_is_terminal() {
        let mut app = AppState::new(Theme::dark(), Keymap::default());
        assert!(app.apply_outcome(Err("boom".into())));
        assert!(!app.apply_outcome(Ok(vec![UserRecord::new(1, "x")])));
        assert_eq!(app.view, ViewState::Error("boom".into()));
        assert!(app.visible_users().is_empty());
    }

    #[test]
    fn ready_is_terminal() {
        let mut app = ready_app();
        assert!(!app.apply_outcome(Err("late".into())));
        assert_eq!(app.users_all().len(), 2);
    }

    #[test]
    fn cursor_stays_on_same_record_while_typing() {
        let mut app = ready_app();
        app.move_selection(1);
        assert_eq!(app.selected_user().map(|u| u.id), Some(2));
        app.set_query("jane");
        assert_eq!(app.selected_user().map(|u| u.id), Some(2));
        app.clear_query();
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn move_selection_clamps() {
        let mut app = ready_app();
        app.move_selection(-5);
        assert_eq!(app.selected_index, 0);
        app.move_selection(10);
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn theme_parse_overrides_known_keys_only() {
        let t = Theme::parse("# comment\ntext = #010203\nbogus = #FFFFFF\nborder = reset\ntitle = nothex\n");
        assert_eq!(t.text, Color::Rgb(1, 2, 3));
        assert_eq!(t.border, Color::Reset);
        assert_eq!(t.title, Theme::mocha().title);
    }

    #[test]
    fn missing_theme_file_falls_back_to_mocha() {
        let t = Theme::load(Some(std::path::Path::new("/nonexistent/user-directory-theme.conf")));
        assert_eq!(t, Theme::mocha());
    }
}
