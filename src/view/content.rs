//! Main content area rendering (dashboard and list sections)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{
    ActiveSection, Catalog, ListView, Listable, SortField, UiState, PAGE_SIZE,
};
use super::utils::{
    calculate_num_width, column_widths, header_style, render_scrollable_list, row_style,
    truncate_string,
};

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    catalog: &Catalog,
    loading: bool,
) {
    let border_style = Style::default().fg(Color::Green);

    if loading && catalog.is_empty() {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", ui_state.active_section.title()))
                    .border_style(border_style),
            );
        frame.render_widget(loading, area);
        return;
    }

    let is_focused = !ui_state.filter_focused;
    match ui_state.active_section {
        ActiveSection::Dashboard => render_dashboard(frame, area, catalog),
        ActiveSection::Artists => render_list_section(
            frame,
            area,
            "Artists",
            &ui_state.artists,
            &catalog.artists,
            catalog,
            &[("Name", 60), ("Country", 40)],
            |artist| vec![artist.name.clone(), artist.country.clone()],
            is_focused,
        ),
        ActiveSection::Albums => render_list_section(
            frame,
            area,
            "Albums",
            &ui_state.albums,
            &catalog.albums,
            catalog,
            &[("Name", 50), ("Artist", 38), ("Year", 12)],
            |album| {
                vec![
                    album.name.clone(),
                    catalog.artist_name_of(&album.artist.key).to_string(),
                    album.year.to_string(),
                ]
            },
            is_focused,
        ),
        ActiveSection::Songs => render_list_section(
            frame,
            area,
            "Songs",
            &ui_state.songs,
            &catalog.songs,
            catalog,
            &[("Title", 40), ("Album", 30), ("Artist", 30)],
            |song| {
                let row = catalog.song_info(song);
                vec![row.song, row.album, row.artist]
            },
            is_focused,
        ),
        ActiveSection::Playlists => render_list_section(
            frame,
            area,
            "Playlists",
            &ui_state.playlists,
            &catalog.playlists,
            catalog,
            &[("Name", 60), ("Songs", 20), ("Visibility", 20)],
            |playlist| {
                vec![
                    playlist.name.clone(),
                    playlist.songs.len().to_string(),
                    if playlist.is_private { "private" } else { "public" }.to_string(),
                ]
            },
            is_focused,
        ),
    }
}

/// One page of a list section with a header row and numbered rows
#[allow(clippy::too_many_arguments)]
fn render_list_section<T, F>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    view: &ListView<F>,
    items: &[T],
    catalog: &Catalog,
    columns: &[(&str, usize)],
    cells: impl Fn(&T) -> Vec<String>,
    is_focused: bool,
) where
    T: Listable<Field = F>,
    F: SortField,
{
    let page = view.compute(items, catalog);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            " {} ({}) · {} · sort: {} {} ",
            title,
            page.total,
            page.position_label(),
            view.sort_field.label(),
            view.direction.arrow()
        ))
        .padding(Padding::horizontal(1))
        .border_style(Style::default().fg(Color::Green));

    if page.rows.is_empty() {
        let message = if items.is_empty() {
            format!("No {} yet. Press n to add one.", title.to_lowercase())
        } else if page.total == 0 {
            format!("No {} match \"{}\"", title.to_lowercase(), view.query)
        } else {
            "Nothing on this page. Press ← to go back.".to_string()
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let content_width = area.width.saturating_sub(4) as usize;
    let num_width = calculate_num_width(page.total);
    let percents: Vec<usize> = columns.iter().map(|(_, p)| *p).collect();
    let widths = column_widths(content_width, num_width, &percents);

    let format_row = |first: String, values: &[String]| {
        let mut line = format!(" {:<num_width$}", first, num_width = num_width);
        for (value, width) in values.iter().zip(&widths) {
            line.push_str("   ");
            line.push_str(&truncate_string(value, *width));
        }
        line
    };

    let headers: Vec<String> = columns.iter().map(|(h, _)| h.to_string()).collect();
    let mut list_items = vec![ListItem::new(format_row("#".to_string(), &headers)).style(header_style())];

    let offset = page.page.saturating_sub(1) * PAGE_SIZE;
    let selected = view.selected_row(page.rows.len());
    list_items.extend(page.rows.iter().enumerate().map(|(i, item)| {
        let style = row_style(i == selected, is_focused);
        ListItem::new(format_row((offset + i + 1).to_string(), &cells(item))).style(style)
    }));

    // +1 for the header row
    render_scrollable_list(frame, area, list_items, selected + 1, block);
}

fn render_dashboard(frame: &mut Frame, area: Rect, catalog: &Catalog) {
    let dashboard = catalog.dashboard();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Counts
            Constraint::Min(0),    // Recent items
        ])
        .split(area);

    let count_span = |label: &str, count: usize| {
        vec![
            Span::styled(format!("{} ", count), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(format!("{}    ", label)),
        ]
    };
    let counts = Line::from(
        [
            count_span("artists", dashboard.artist_count),
            count_span("albums", dashboard.album_count),
            count_span("songs", dashboard.song_count),
            count_span("playlists", dashboard.playlist_count),
        ]
        .concat(),
    );
    let summary = Paragraph::new(counts).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Dashboard ")
            .padding(Padding::horizontal(1))
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(summary, rows[0]);

    let grid = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(grid[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(grid[1]);

    let songs: Vec<String> = dashboard.recent_songs.iter().map(|row| row.display()).collect();
    render_recent(frame, top[0], "Recent artists", &dashboard.recent_artists);
    render_recent(frame, top[1], "Recent albums", &dashboard.recent_albums);
    render_recent(frame, bottom[0], "Recent songs", &songs);
    render_recent(frame, bottom[1], "Recent playlists", &dashboard.recent_playlists);
}

fn render_recent(frame: &mut Frame, area: Rect, title: &str, entries: &[String]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .padding(Padding::horizontal(1));

    if entries.is_empty() {
        let empty = Paragraph::new("Nothing here yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| ListItem::new(truncate_string(entry, width)))
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}
