//! Overlay rendering (notifications, confirmation, details, forms, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{
    song_count_label, Catalog, DetailView, Draft, FormDialog, FormField, Notification,
    NotificationKind, Provenance, SelectedAsset,
};
use super::utils::centered_rect;

/// Rows of the playlist song picker visible at once
const PICKER_ROWS: usize = 8;

pub fn render_notification(frame: &mut Frame, notification: &Notification) {
    let area = frame.area();

    let (color, title) = match notification.kind {
        NotificationKind::Success => (Color::Green, " Done (Esc to dismiss) "),
        NotificationKind::Error => (Color::Red, " Error (Esc to dismiss) "),
    };

    // Fixed width popup (responsive to screen size)
    let popup_width = 52.min(area.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(4).max(1) as usize;

    let line_count = notification.message.chars().count().div_ceil(inner_width) as u16;

    // Height: top border (1) + message lines + bottom border (1)
    let popup_height = (2 + line_count.max(1)).min(area.height.saturating_sub(4));

    // Bottom right corner so the list underneath stays readable
    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width + 1),
        y: area.height.saturating_sub(popup_height + 1),
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let widget = Paragraph::new(notification.message.clone())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title)
                .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(widget, popup_area);
}

pub fn render_confirm_delete(frame: &mut Frame, asset: &SelectedAsset) {
    let popup_area = centered_rect(frame.area(), 56, 5);
    frame.render_widget(Clear, popup_area);

    let question = format!(
        "Delete {} \"{}\"? (y/n)",
        asset.asset_type.label().to_lowercase(),
        asset.name
    );
    let widget = Paragraph::new(question)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Confirm delete ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(widget, popup_area);
}

fn label_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}  ", label), Style::default().fg(Color::Cyan)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn section_header(title: String) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
}

fn bullet_lines(entries: impl IntoIterator<Item = String>, empty: &str) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = entries
        .into_iter()
        .map(|entry| Line::from(format!("  • {}", entry)))
        .collect();
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", empty),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

fn provenance_lines(provenance: &Provenance) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(updated) = provenance.last_updated_display() {
        lines.push(label_line("Updated", updated));
    }
    if let Some(by) = &provenance.last_touch_by {
        lines.push(label_line("Updated by", by.clone()));
    }
    lines
}

pub fn render_detail(frame: &mut Frame, detail: &DetailView) {
    let mut lines = Vec::new();

    let title = match detail {
        DetailView::Artist(d) => {
            lines.push(label_line("Country", d.artist.country.clone()));
            lines.extend(provenance_lines(&d.artist.provenance));
            lines.push(Line::from(""));
            lines.push(section_header(format!("Albums ({})", d.albums.len())));
            lines.extend(bullet_lines(
                d.albums.iter().map(|a| format!("{} ({})", a.name, a.year)),
                "No albums",
            ));
            lines.push(Line::from(""));
            lines.push(section_header(song_count_label(d.songs.len())));
            lines.extend(bullet_lines(d.songs.iter().map(|s| s.display()), "No songs"));
            format!(" Artist · {} ", d.artist.name)
        }
        DetailView::Album(d) => {
            lines.push(label_line("Artist", d.artist_name.clone()));
            lines.push(label_line("Year", d.album.year.to_string()));
            lines.extend(provenance_lines(&d.album.provenance));
            lines.push(Line::from(""));
            lines.push(section_header(song_count_label(d.songs.len())));
            lines.extend(bullet_lines(d.songs.iter().map(|s| s.name.clone()), "No songs"));
            format!(" Album · {} ", d.album.name)
        }
        DetailView::Song(d) => {
            let album = match d.album_year {
                Some(year) => format!("{} ({})", d.album_name, year),
                None => d.album_name.clone(),
            };
            lines.push(label_line("Album", album));
            lines.push(label_line("Artist", d.artist_name.clone()));
            lines.extend(provenance_lines(&d.song.provenance));
            lines.push(Line::from(""));
            lines.push(section_header(format!("In playlists ({})", d.playlists.len())));
            lines.extend(bullet_lines(d.playlists.iter().cloned(), "Not in any playlist"));
            format!(" Song · {} ", d.song.name)
        }
        DetailView::Playlist(d) => {
            lines.push(label_line("Visibility", d.visibility().to_string()));
            lines.extend(provenance_lines(&d.playlist.provenance));
            lines.push(Line::from(""));
            lines.push(section_header(song_count_label(d.songs.len())));
            lines.extend(bullet_lines(d.songs.iter().map(|s| s.display()), "No songs"));
            format!(" Playlist · {} ", d.playlist.name)
        }
    };

    let area = frame.area();
    let popup_area = centered_rect(area, 70, lines.len() as u16 + 2);
    frame.render_widget(Clear, popup_area);

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(title)
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .title_bottom(" Esc to close ")
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(widget, popup_area);
}

pub fn render_form(frame: &mut Frame, form: &FormDialog, catalog: &Catalog) {
    let focused = form.focused_field();
    let mut lines = vec![Line::from("")];

    for &field in form.draft.fields() {
        let is_focused = field == focused;
        let value = form.field_value(field, catalog);
        let shown = match field {
            FormField::Artist | FormField::Album if is_focused => format!("◀ {} ▶", value),
            FormField::Year if is_focused => format!("{}_  (←/→ to adjust)", value),
            FormField::Songs => {
                let count = match &form.draft {
                    Draft::Playlist(d) => d.selected_songs.len(),
                    _ => 0,
                };
                song_count_label(count)
            }
            _ if is_focused && field.is_text() => format!("{}_", value),
            _ => value,
        };
        let style = if is_focused {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>14}  ", field.label()), Style::default().fg(Color::Cyan)),
            Span::styled(shown, style),
        ]));
    }

    if let Draft::Playlist(draft) = &form.draft {
        let candidates = draft.candidates(catalog);
        lines.push(Line::from(""));
        if candidates.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No songs match",
                Style::default().fg(Color::DarkGray),
            )));
        }
        // Keep the cursor inside the visible window
        let start = form.song_cursor.saturating_sub(PICKER_ROWS - 1);
        for (i, row) in candidates.iter().enumerate().skip(start).take(PICKER_ROWS) {
            let mark = if draft.is_selected(&row.key) { "[x]" } else { "[ ]" };
            let is_cursor = i == form.song_cursor && focused == FormField::Songs;
            let style = if is_cursor {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(format!("  {} {}", mark, row.display()), style)));
        }
    }

    lines.push(Line::from(""));
    let hint = if form.submitting {
        Span::styled("Saving...", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            "Tab next field · Space toggle · Enter save · Esc cancel",
            Style::default().fg(Color::DarkGray),
        )
    };
    lines.push(Line::from(hint));

    let popup_area = centered_rect(frame.area(), 72, lines.len() as u16 + 2);
    frame.render_widget(Clear, popup_area);

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(format!(" {} ", form.title()))
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(widget, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    // Define keybindings organized by category
    let keybindings = vec![
        ("", "── Navigation ──"),
        ("Tab / Shift+Tab", "Cycle sections"),
        ("↑ / ↓", "Move selection"),
        ("← / →", "Previous / next page"),
        ("Enter", "Show details"),
        ("", ""),
        ("", "── Lists ──"),
        ("/", "Focus filter"),
        ("Esc", "Clear filter"),
        ("S", "Cycle sort field"),
        ("O", "Toggle sort order"),
        ("", ""),
        ("", "── Editing ──"),
        ("N", "New asset"),
        ("E", "Edit selected"),
        ("D", "Delete selected"),
        ("", ""),
        ("", "── General ──"),
        ("R", "Reload catalog"),
        ("Shift+L", "Log out"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let popup_width = 62;
    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4));

    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(popup_height) / 2,
        width: popup_width.min(area.width),
        height: popup_height,
    };

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
