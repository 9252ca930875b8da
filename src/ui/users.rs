use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use crate::app::{AppState, ViewState};

pub const LOADING_TEXT: &str = "Loading...";

/// Text shown in the error phase.
pub fn error_text(message: &str) -> String {
    format!("Error: {message}")
}

/// Draw the body for the current phase: loading text, error text, or the filtered list.
pub fn render_directory(f: &mut Frame, area: Rect, app: &mut AppState) {
    let block = Block::default()
        .title("Users")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    if let ViewState::Ready(_) = app.view {
        render_user_list(f, area, app, block);
        return;
    }

    match &app.view {
        ViewState::Loading => {
            let p = Paragraph::new(LOADING_TEXT)
                .style(Style::default().fg(app.theme.muted))
                .block(block);
            f.render_widget(p, area);
        }
        ViewState::Error(message) => {
            let p = Paragraph::new(error_text(message))
                .style(Style::default().fg(app.theme.error))
                .wrap(Wrap { trim: false })
                .block(block);
            f.render_widget(p, area);
        }
        ViewState::Ready(_) => {}
    }
}

fn render_user_list(f: &mut Frame, area: Rect, app: &mut AppState, block: Block) {
    let body_height = area.height.saturating_sub(2) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    let visible = app.visible_users();
    let start = (app.selected_index / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(visible.len());
    let slice = visible.get(start..end).unwrap_or(&[]);

    let items: Vec<ListItem> = slice
        .iter()
        .enumerate()
        .map(|(i, u)| {
            let style = if start + i == app.selected_index {
                Style::default()
                    .fg(app.theme.highlight_fg)
                    .bg(app.theme.highlight_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.text)
            };
            ListItem::new(u.name.as_str()).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
