//! Shared UI components.
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Paragraph;

use crate::app::AppState;
use crate::app::keymap::KeyAction;

/// Render the bottom status bar with phase, counts and key hints.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let key = |a: KeyAction| app.keymap.key_for(a).unwrap_or_else(|| "-".to_string());
    let msg = format!(
        "phase: {}  users:{}/{}  {}: clear  {}: quit",
        app.view.label(),
        app.visible_users().len(),
        app.users_all().len(),
        key(KeyAction::ClearQuery),
        key(KeyAction::Quit),
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}
