//! Core type definitions for the application

use std::time::Instant;

use super::asset::AssetType;
use super::content::DetailView;
use super::forms::{FormDialog, LoginForm};
use super::listing::{AlbumSort, ArtistSort, ListView, PlaylistSort, SongSort};

/// Seconds a notification stays on screen
pub const NOTIFICATION_SECS: u64 = 5;

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Dashboard,
    Artists,
    Albums,
    Songs,
    Playlists,
}

impl ActiveSection {
    pub const ALL: [ActiveSection; 5] = [
        ActiveSection::Dashboard,
        ActiveSection::Artists,
        ActiveSection::Albums,
        ActiveSection::Songs,
        ActiveSection::Playlists,
    ];

    pub fn next(self) -> Self {
        match self {
            ActiveSection::Dashboard => ActiveSection::Artists,
            ActiveSection::Artists => ActiveSection::Albums,
            ActiveSection::Albums => ActiveSection::Songs,
            ActiveSection::Songs => ActiveSection::Playlists,
            ActiveSection::Playlists => ActiveSection::Dashboard,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Dashboard => ActiveSection::Playlists,
            ActiveSection::Artists => ActiveSection::Dashboard,
            ActiveSection::Albums => ActiveSection::Artists,
            ActiveSection::Songs => ActiveSection::Albums,
            ActiveSection::Playlists => ActiveSection::Songs,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ActiveSection::Dashboard => "Dashboard",
            ActiveSection::Artists => "Artists",
            ActiveSection::Albums => "Albums",
            ActiveSection::Songs => "Songs",
            ActiveSection::Playlists => "Playlists",
        }
    }

    /// The asset type listed in this section, `None` for the dashboard
    pub fn asset_type(self) -> Option<AssetType> {
        match self {
            ActiveSection::Dashboard => None,
            ActiveSection::Artists => Some(AssetType::Artist),
            ActiveSection::Albums => Some(AssetType::Album),
            ActiveSection::Songs => Some(AssetType::Song),
            ActiveSection::Playlists => Some(AssetType::Playlist),
        }
    }
}

/// Login screen or the catalog itself
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Login,
    Catalog,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Clone, Debug)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub timestamp: Instant,
}

impl Notification {
    pub fn is_expired(&self) -> bool {
        self.timestamp.elapsed().as_secs() >= NOTIFICATION_SECS
    }
}

/// The type, key and display name of one listed asset
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedAsset {
    pub asset_type: AssetType,
    pub key: String,
    pub name: String,
}

/// UI state for the application
#[derive(Clone, Debug)]
pub struct UiState {
    pub screen: Screen,
    pub active_section: ActiveSection,
    /// Typed characters go to the current section's filter
    pub filter_focused: bool,
    pub artists: ListView<ArtistSort>,
    pub albums: ListView<AlbumSort>,
    pub songs: ListView<SongSort>,
    pub playlists: ListView<PlaylistSort>,
    pub notification: Option<Notification>,
    /// Asset waiting for the user to confirm its deletion
    pub pending_delete: Option<SelectedAsset>,
    pub detail: Option<DetailView>,
    pub form: Option<FormDialog>,
    pub login: LoginForm,
    pub show_help_popup: bool,
}

impl UiState {
    pub fn new(logged_in: bool) -> Self {
        Self {
            screen: if logged_in { Screen::Catalog } else { Screen::Login },
            active_section: ActiveSection::Dashboard,
            filter_focused: false,
            artists: ListView::default(),
            albums: ListView::default(),
            songs: ListView::default(),
            playlists: ListView::default(),
            notification: None,
            pending_delete: None,
            detail: None,
            form: None,
            login: LoginForm::default(),
            show_help_popup: false,
        }
    }

    /// Filter text of the active list section
    pub fn active_query(&self) -> Option<&str> {
        match self.active_section {
            ActiveSection::Dashboard => None,
            ActiveSection::Artists => Some(&self.artists.query),
            ActiveSection::Albums => Some(&self.albums.query),
            ActiveSection::Songs => Some(&self.songs.query),
            ActiveSection::Playlists => Some(&self.playlists.query),
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(false)
    }
}
