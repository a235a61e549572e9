//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{FormField, Screen};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Ctrl+C quits from anywhere
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            model.set_should_quit(true).await;
            return Ok(());
        }

        // Esc dismisses a notification before anything else sees it
        if key.code == KeyCode::Esc && model.has_notification().await {
            model.clear_notification().await;
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;

        // Login screen
        if ui_state.screen == Screen::Login {
            match key.code {
                KeyCode::Esc => model.set_should_quit(true).await,
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                    model.ui_state.lock().await.login.focus_next();
                }
                KeyCode::Enter => {
                    drop(model);
                    let controller = self.clone();
                    tokio::spawn(async move {
                        controller.submit_login().await;
                    });
                }
                KeyCode::Backspace => model.ui_state.lock().await.login.backspace(),
                KeyCode::Char(c) => model.ui_state.lock().await.login.input_char(c),
                _ => {}
            }
            return Ok(());
        }

        // Create/edit form
        if let Some(form) = &ui_state.form {
            if form.submitting {
                return Ok(());
            }
            let field = form.focused_field();
            let catalog = model.get_catalog().await;
            match key.code {
                KeyCode::Esc => {
                    drop(model);
                    self.cancel_form().await;
                }
                KeyCode::Enter => {
                    drop(model);
                    let controller = self.clone();
                    tokio::spawn(async move {
                        controller.submit_form().await;
                    });
                }
                KeyCode::BackTab => model.update_form(|f| f.focus_prev()).await,
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        model.update_form(|f| f.focus_prev()).await;
                    } else {
                        model.update_form(|f| f.focus_next()).await;
                    }
                }
                KeyCode::Left => model.update_form(|f| f.adjust(-1, &catalog)).await,
                KeyCode::Right => model.update_form(|f| f.adjust(1, &catalog)).await,
                KeyCode::Up if field == FormField::Songs => {
                    model.update_form(|f| f.move_song_cursor(-1, &catalog)).await;
                }
                KeyCode::Down if field == FormField::Songs => {
                    model.update_form(|f| f.move_song_cursor(1, &catalog)).await;
                }
                KeyCode::Up => model.update_form(|f| f.focus_prev()).await,
                KeyCode::Down => model.update_form(|f| f.focus_next()).await,
                KeyCode::Backspace => model.update_form(|f| f.backspace()).await,
                KeyCode::Char(' ') if !field.is_text() => {
                    model.update_form(|f| f.toggle(&catalog)).await;
                }
                KeyCode::Char(c) => model.update_form(|f| f.input_char(c)).await,
                _ => {}
            }
            return Ok(());
        }

        // Delete confirmation
        if ui_state.pending_delete.is_some() {
            drop(model);
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    let controller = self.clone();
                    tokio::spawn(async move {
                        controller.confirm_delete().await;
                    });
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.cancel_delete().await;
                }
                _ => {}
            }
            return Ok(());
        }

        // Detail dialog
        if ui_state.detail.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace) {
                model.close_detail().await;
            }
            return Ok(());
        }

        // Help popup
        if ui_state.show_help_popup {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') => {
                    model.hide_help_popup().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Filter input
        if ui_state.filter_focused {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    model.set_filter_focused(false).await;
                    return Ok(());
                }
                KeyCode::Backspace => {
                    model.backspace_filter().await;
                    return Ok(());
                }
                KeyCode::Char(c) => {
                    model.append_to_filter(c).await;
                    return Ok(());
                }
                _ => {}
            }
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    model.cycle_section_backward().await;
                } else {
                    model.cycle_section_forward().await;
                }
            }
            KeyCode::BackTab => {
                model.cycle_section_backward().await;
            }
            KeyCode::Up => {
                model.move_selection_up().await;
            }
            KeyCode::Down => {
                model.move_selection_down().await;
            }
            KeyCode::Left => {
                model.prev_page().await;
            }
            KeyCode::Right => {
                model.next_page().await;
            }
            KeyCode::Esc => {
                model.clear_filter().await;
            }
            // Focus filter
            KeyCode::Char('/') => {
                model.set_filter_focused(true).await;
            }
            // Cycle sort field
            KeyCode::Char('s') | KeyCode::Char('S') => {
                model.cycle_sort_field().await;
            }
            // Toggle sort direction
            KeyCode::Char('o') | KeyCode::Char('O') => {
                model.toggle_sort_direction().await;
            }
            KeyCode::Enter => {
                drop(model);
                self.open_details().await;
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                drop(model);
                self.open_new_form().await;
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                drop(model);
                self.open_edit_form().await;
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                drop(model);
                self.request_delete().await;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                drop(model);
                self.spawn_refresh();
            }
            KeyCode::Char('L') => {
                drop(model);
                self.logout().await;
            }
            // Show help popup
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }
}
