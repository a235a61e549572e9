//! Layout rendering (top bar, sidebar, login screen)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, Catalog, LoginField, LoginForm, UiState};
use super::utils::centered_rect;

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, api_url: &str, loading: bool) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Filter input
            Constraint::Length(36), // Store status
        ])
        .split(area);

    let filter_style = if ui_state.filter_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let filter_text = match ui_state.active_query() {
        None => "Nothing to filter on the dashboard".to_string(),
        Some("") if ui_state.filter_focused => String::new(),
        Some("") => "Press / to filter...".to_string(),
        Some(query) => query.to_string(),
    };

    let filter = Paragraph::new(filter_text)
        .style(filter_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Filter ")
                .padding(Padding::horizontal(1))
                .border_style(if ui_state.filter_focused {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                }),
        );
    frame.render_widget(filter, chunks[0]);

    let status = if loading {
        Paragraph::new("Loading...").style(Style::default().fg(Color::Yellow))
    } else {
        Paragraph::new(api_url.to_string()).style(Style::default().fg(Color::Cyan))
    };
    let status = status.block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Store ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(status, chunks[1]);
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, ui_state: &UiState, catalog: &Catalog) {
    let items: Vec<ListItem> = ActiveSection::ALL
        .iter()
        .map(|&section| {
            let count = match section {
                ActiveSection::Dashboard => None,
                ActiveSection::Artists => Some(catalog.artists.len()),
                ActiveSection::Albums => Some(catalog.albums.len()),
                ActiveSection::Songs => Some(catalog.songs.len()),
                ActiveSection::Playlists => Some(catalog.playlists.len()),
            };
            let text = match count {
                Some(count) => format!("{} ({})", section.title(), count),
                None => section.title().to_string(),
            };
            let style = if section == ui_state.active_section {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let sections = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Catalog ")
            .padding(Padding::horizontal(1))
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(sections, area);
}

/// Full-screen login form shown while there is no session
pub fn render_login_screen(frame: &mut Frame, login: &LoginForm) {
    let popup_area = centered_rect(frame.area(), 50, 10);

    let field_line = |label: &str, value: String, field: LoginField| {
        let focused = login.focus == field;
        let style = if focused {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let cursor = if focused && !login.submitting { "_" } else { "" };
        Line::from(vec![
            Span::styled(format!("{:>10}  ", label), Style::default().fg(Color::Cyan)),
            Span::styled(format!("{}{}", value, cursor), style),
        ])
    };

    let hint = if login.submitting {
        Span::styled("Logging in...", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            "Tab switch field · Enter log in · Esc quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    let lines = vec![
        Line::from(""),
        field_line("Username", login.username.clone(), LoginField::Username),
        Line::from(""),
        field_line("Password", "*".repeat(login.password.chars().count()), LoginField::Password),
        Line::from(""),
        Line::from(""),
        Line::from(hint),
    ];

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Music Catalog · Login ")
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(form, popup_area);
}
