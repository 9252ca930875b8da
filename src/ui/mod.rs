pub mod components;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::AppState;

/// Placeholder and title of the search box.
pub const SEARCH_PLACEHOLDER: &str = "Search users";

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3), Constraint::Length(1)].as_ref())
        .split(f.area());

    render_search_input(f, root[0], app);
    users::render_directory(f, root[1], app);
    components::render_status_bar(f, root[2], app);
}

/// The search box is drawn and focused in every phase.
fn render_search_input(f: &mut Frame, area: Rect, app: &AppState) {
    let line = if app.search_query.is_empty() {
        Line::from(Span::styled(SEARCH_PLACEHOLDER, Style::default().fg(app.theme.muted)))
    } else {
        Line::from(Span::styled(app.search_query.as_str(), Style::default().fg(app.theme.text)))
    };
    let p = Paragraph::new(line).block(
        Block::default()
            .title(SEARCH_PLACEHOLDER)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border))
            .title_style(Style::default().fg(app.theme.title)),
    );
    f.render_widget(p, area);

    let x = cursor_column(area, app.search_query.chars().count());
    f.set_cursor_position(Position::new(x, area.y.saturating_add(1)));
}

/// Column just past the typed text, pinned inside the box border.
fn cursor_column(area: Rect, typed: usize) -> u16 {
    let typed = u16::try_from(typed).unwrap_or(u16::MAX);
    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    area.x.saturating_add(1).saturating_add(typed).min(max_x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppState, Theme, keymap::Keymap};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn cursor_follows_text_and_stays_in_box() {
        let area = Rect::new(0, 0, 20, 3);
        assert_eq!(cursor_column(area, 0), 1);
        assert_eq!(cursor_column(area, 5), 6);
        assert_eq!(cursor_column(area, 500), 18);
        assert_eq!(cursor_column(area, usize::MAX), 18);
        assert_eq!(cursor_column(Rect::new(u16::MAX - 4, 0, 4, 3), 70_000), u16::MAX - 2);
    }

    #[test]
    fn very_long_query_renders() {
        let mut app = AppState::new(Theme::dark(), Keymap::default());
        app.set_query("x".repeat(70_000));
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
    }
}
