//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (column formatting, scrollable lists, popups)
//! - `layout`: Main layout structure (top bar, sidebar, login screen)
//! - `content`: Dashboard and list sections
//! - `status`: Key hints along the bottom
//! - `overlays`: Modal overlays (notification, confirmation, details, forms, help)

mod utils;
mod layout;
mod content;
mod status;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{Catalog, Screen, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, ui_state: &UiState, catalog: &Catalog, loading: bool, api_url: &str) {
        if ui_state.screen == Screen::Login {
            layout::render_login_screen(frame, &ui_state.login);
            if let Some(notification) = &ui_state.notification {
                overlays::render_notification(frame, notification);
            }
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Filter + store status
                Constraint::Min(0),    // Main content (sidebar + content)
                Constraint::Length(3), // Key hints
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], ui_state, api_url, loading);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(22), // Sections
                Constraint::Min(0),     // Main content
            ])
            .split(chunks[1]);

        layout::render_sidebar(frame, main_chunks[0], ui_state, catalog);
        content::render_main_content(frame, main_chunks[1], ui_state, catalog, loading);
        status::render_status_bar(frame, chunks[2], ui_state);

        // At most one dialog is open at a time; the form wins over the rest
        if let Some(form) = &ui_state.form {
            overlays::render_form(frame, form, catalog);
        } else if let Some(asset) = &ui_state.pending_delete {
            overlays::render_confirm_delete(frame, asset);
        } else if let Some(detail) = &ui_state.detail {
            overlays::render_detail(frame, detail);
        } else if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }

        // Notifications sit on top of everything
        if let Some(notification) = &ui_state.notification {
            overlays::render_notification(frame, notification);
        }
    }
}
