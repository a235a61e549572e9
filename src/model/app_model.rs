//! Main application model with state management

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use super::aggregator::{Catalog, ExtendedAggregator};
use super::content::DetailView;
use super::forms::FormDialog;
use super::listing::Listable;
use super::types::{
    ActiveSection, Notification, NotificationKind, Screen, SelectedAsset, UiState,
};

/// Run `$body` against the active section's list view, and optionally its items.
/// Evaluates to `None` on the dashboard.
macro_rules! with_active_list {
    ($state:expr, |$view:ident| $body:expr) => {
        match $state.active_section {
            ActiveSection::Dashboard => None,
            ActiveSection::Artists => {
                let $view = &mut $state.artists;
                Some($body)
            }
            ActiveSection::Albums => {
                let $view = &mut $state.albums;
                Some($body)
            }
            ActiveSection::Songs => {
                let $view = &mut $state.songs;
                Some($body)
            }
            ActiveSection::Playlists => {
                let $view = &mut $state.playlists;
                Some($body)
            }
        }
    };
    ($state:expr, $catalog:expr, |$view:ident, $items:ident| $body:expr) => {
        match $state.active_section {
            ActiveSection::Dashboard => None,
            ActiveSection::Artists => {
                let $view = &mut $state.artists;
                let $items = &$catalog.artists;
                Some($body)
            }
            ActiveSection::Albums => {
                let $view = &mut $state.albums;
                let $items = &$catalog.albums;
                Some($body)
            }
            ActiveSection::Songs => {
                let $view = &mut $state.songs;
                let $items = &$catalog.songs;
                Some($body)
            }
            ActiveSection::Playlists => {
                let $view = &mut $state.playlists;
                let $items = &$catalog.playlists;
                Some($body)
            }
        }
    };
}

fn describe<T: Listable>(item: &T) -> SelectedAsset {
    SelectedAsset {
        asset_type: T::ASSET_TYPE,
        key: item.key().to_string(),
        name: item.name().to_string(),
    }
}

/// Main application model containing all state
pub struct AppModel {
    pub aggregator: ExtendedAggregator,
    pub ui_state: Arc<Mutex<UiState>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(aggregator: ExtendedAggregator, logged_in: bool) -> Self {
        Self {
            aggregator,
            ui_state: Arc::new(Mutex::new(UiState::new(logged_in))),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn get_catalog(&self) -> Catalog {
        self.aggregator.snapshot().await
    }

    pub async fn is_loading(&self) -> bool {
        self.aggregator.is_loading().await
    }

    // ========================================================================
    // Screens & sections
    // ========================================================================

    pub async fn set_screen(&self, screen: Screen) {
        let mut state = self.ui_state.lock().await;
        state.screen = screen;
    }

    /// Forget everything tied to the previous session and show the login screen
    pub async fn reset_for_login(&self) {
        let mut state = self.ui_state.lock().await;
        let notification = state.notification.take();
        *state = UiState::new(false);
        state.notification = notification;
    }

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
        state.filter_focused = false;
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.prev();
        state.filter_focused = false;
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
    }

    // ========================================================================
    // Filter, sort, pages
    // ========================================================================

    pub async fn set_filter_focused(&self, focused: bool) {
        let mut state = self.ui_state.lock().await;
        state.filter_focused = focused && state.active_section != ActiveSection::Dashboard;
    }

    pub async fn is_filter_focused(&self) -> bool {
        self.ui_state.lock().await.filter_focused
    }

    pub async fn append_to_filter(&self, c: char) {
        let mut state = self.ui_state.lock().await;
        with_active_list!(state, |view| view.push_query_char(c));
    }

    pub async fn backspace_filter(&self) {
        let mut state = self.ui_state.lock().await;
        with_active_list!(state, |view| view.pop_query_char());
    }

    pub async fn clear_filter(&self) {
        let mut state = self.ui_state.lock().await;
        with_active_list!(state, |view| view.set_query(""));
    }

    pub async fn cycle_sort_field(&self) {
        let mut state = self.ui_state.lock().await;
        with_active_list!(state, |view| view.cycle_sort_field());
    }

    pub async fn toggle_sort_direction(&self) {
        let mut state = self.ui_state.lock().await;
        with_active_list!(state, |view| view.toggle_direction());
    }

    pub async fn next_page(&self) {
        let catalog = self.get_catalog().await;
        let mut state = self.ui_state.lock().await;
        with_active_list!(state, catalog, |view, items| {
            let page_count = view.compute(items, &catalog).page_count;
            view.next_page(page_count)
        });
    }

    pub async fn prev_page(&self) {
        let mut state = self.ui_state.lock().await;
        with_active_list!(state, |view| view.prev_page());
    }

    pub async fn move_selection_up(&self) {
        let catalog = self.get_catalog().await;
        let mut state = self.ui_state.lock().await;
        with_active_list!(state, catalog, |view, items| {
            let rows = view.compute(items, &catalog).rows.len();
            view.move_up(rows)
        });
    }

    pub async fn move_selection_down(&self) {
        let catalog = self.get_catalog().await;
        let mut state = self.ui_state.lock().await;
        with_active_list!(state, catalog, |view, items| {
            let rows = view.compute(items, &catalog).rows.len();
            view.move_down(rows)
        });
    }

    /// The highlighted row of the active list section
    pub async fn get_selected_asset(&self) -> Option<SelectedAsset> {
        let catalog = self.get_catalog().await;
        let mut state = self.ui_state.lock().await;
        with_active_list!(state, catalog, |view, items| view
            .selected_item(items, &catalog)
            .map(describe))
        .flatten()
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub async fn set_notification(&self, kind: NotificationKind, message: String) {
        let mut state = self.ui_state.lock().await;
        state.notification = Some(Notification {
            kind,
            message,
            timestamp: Instant::now(),
        });
    }

    pub async fn set_error(&self, message: String) {
        self.set_notification(NotificationKind::Error, message).await;
    }

    pub async fn set_success(&self, message: String) {
        self.set_notification(NotificationKind::Success, message).await;
    }

    pub async fn clear_notification(&self) {
        let mut state = self.ui_state.lock().await;
        state.notification = None;
    }

    pub async fn has_notification(&self) -> bool {
        self.ui_state.lock().await.notification.is_some()
    }

    pub async fn auto_clear_old_notifications(&self) {
        let mut state = self.ui_state.lock().await;
        if state.notification.as_ref().is_some_and(Notification::is_expired) {
            state.notification = None;
        }
    }

    // ========================================================================
    // Overlays
    // ========================================================================

    pub async fn show_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = false;
    }

    pub async fn show_detail(&self, detail: DetailView) {
        let mut state = self.ui_state.lock().await;
        state.detail = Some(detail);
    }

    pub async fn close_detail(&self) {
        let mut state = self.ui_state.lock().await;
        state.detail = None;
    }

    pub async fn is_detail_open(&self) -> bool {
        self.ui_state.lock().await.detail.is_some()
    }

    pub async fn request_delete(&self, asset: SelectedAsset) {
        let mut state = self.ui_state.lock().await;
        state.pending_delete = Some(asset);
    }

    pub async fn take_pending_delete(&self) -> Option<SelectedAsset> {
        self.ui_state.lock().await.pending_delete.take()
    }

    pub async fn has_pending_delete(&self) -> bool {
        self.ui_state.lock().await.pending_delete.is_some()
    }

    pub async fn open_form(&self, form: FormDialog) {
        let mut state = self.ui_state.lock().await;
        state.form = Some(form);
    }

    pub async fn close_form(&self) {
        let mut state = self.ui_state.lock().await;
        state.form = None;
    }

    pub async fn get_form(&self) -> Option<FormDialog> {
        self.ui_state.lock().await.form.clone()
    }

    /// Apply `f` to the open form, if any
    pub async fn update_form<F: FnOnce(&mut FormDialog)>(&self, f: F) {
        let mut state = self.ui_state.lock().await;
        if let Some(form) = state.form.as_mut() {
            f(form);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::aggregator::tests::{FakeStore, who_records};
    use crate::model::asset::AssetType;
    use crate::model::asset_client::AssetStore;
    use crate::model::listing::SortDirection;

    async fn loaded_model() -> AppModel {
        let aggregator = ExtendedAggregator::new(Arc::new(FakeStore::with(who_records())));
        aggregator.fetch_all().await.expect("fetch");
        AppModel::new(aggregator, true)
    }

    #[tokio::test]
    async fn selection_follows_active_section() {
        let model = loaded_model().await;
        assert_eq!(model.get_selected_asset().await, None);

        model.set_active_section(ActiveSection::Albums).await;
        let selected = model.get_selected_asset().await.expect("album row");
        assert_eq!(selected.asset_type, AssetType::Album);
        assert_eq!(selected.name, "Tommy");
    }

    #[tokio::test]
    async fn selection_survives_a_reload_that_shrinks_the_page() {
        let store = Arc::new(FakeStore::with(who_records()));
        store.records.lock().unwrap().get_mut(&AssetType::Artist).unwrap().push(
            serde_json::json!({ "@assetType": "artist", "@key": "a2", "name": "Yes", "country": "UK" }),
        );
        let aggregator = ExtendedAggregator::new(store.clone());
        aggregator.fetch_all().await.expect("fetch");
        let model = AppModel::new(aggregator, true);
        model.set_active_section(ActiveSection::Artists).await;
        model.move_selection_down().await;
        assert_eq!(model.get_selected_asset().await.expect("row").name, "Yes");

        store.remove(AssetType::Artist, "a2").await.expect("remove");
        model.aggregator.fetch_all().await.expect("reload");

        let selected = model.get_selected_asset().await.expect("last row");
        assert_eq!(selected.name, "Who");
    }

    #[tokio::test]
    async fn filter_keys_edit_the_active_list_only() {
        let model = loaded_model().await;
        model.set_active_section(ActiveSection::Songs).await;
        model.set_filter_focused(true).await;
        model.append_to_filter('p').await;
        model.append_to_filter('x').await;
        model.backspace_filter().await;
        model.toggle_sort_direction().await;

        let state = model.get_ui_state().await;
        assert!(state.filter_focused);
        assert_eq!(state.songs.query, "p");
        assert_eq!(state.songs.direction, SortDirection::Descending);
        assert_eq!(state.artists.query, "");
    }

    #[tokio::test]
    async fn dashboard_cannot_take_filter_focus() {
        let model = loaded_model().await;
        model.set_filter_focused(true).await;
        assert!(!model.is_filter_focused().await);
    }

    #[tokio::test]
    async fn next_page_is_bounded_by_filtered_rows() {
        let model = loaded_model().await;
        model.set_active_section(ActiveSection::Artists).await;
        model.next_page().await;
        assert_eq!(model.get_ui_state().await.artists.current_page, 1);
    }

    #[tokio::test]
    async fn reset_keeps_the_pending_notification() {
        let model = loaded_model().await;
        model.set_active_section(ActiveSection::Playlists).await;
        model.set_success("Logged out".to_string()).await;

        model.reset_for_login().await;

        let state = model.get_ui_state().await;
        assert_eq!(state.screen, Screen::Login);
        assert_eq!(state.active_section, ActiveSection::Dashboard);
        assert!(state.notification.is_some());
    }
}
