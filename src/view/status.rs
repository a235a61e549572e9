//! Bottom status bar

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, UiState};

pub fn render_status_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let hints: &[(&str, &str)] = if ui_state.filter_focused {
        &[("Enter", "done"), ("Esc", "done"), ("Backspace", "erase")]
    } else if ui_state.active_section == ActiveSection::Dashboard {
        &[("Tab", "sections"), ("r", "reload"), ("L", "log out"), ("h", "help"), ("q", "quit")]
    } else {
        &[
            ("/", "filter"),
            ("s/o", "sort"),
            ("←/→", "page"),
            ("Enter", "details"),
            ("n/e/d", "new/edit/delete"),
            ("h", "help"),
        ]
    };

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(
                    format!(" {} ", key),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{}  ", action), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();

    let bar = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(bar, area);
}
