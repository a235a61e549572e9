//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `error`: Typed errors for the asset store, forms and the session file
//! - `asset`: Catalog records and the payloads sent to the store
//! - `asset_client`: The asset store trait and its HTTP implementation
//! - `aggregator`: Whole-collection fetches into a catalog snapshot
//! - `resolver`: Foreign-key lookups and detail views over a snapshot
//! - `listing`: Filter, sort and paginate list sections
//! - `forms`: Create/edit drafts and the login form
//! - `content`: Display-ready rows and detail records
//! - `types`: Core type definitions (sections, notifications, UI state)
//! - `app_model`: Main application model with state management methods

mod error;
mod asset;
mod asset_client;
pub(crate) mod aggregator;
pub(crate) mod resolver;
mod listing;
mod forms;
mod content;
mod types;
mod app_model;

// Re-export all public types for convenient access
pub use error::{ApiError, SessionError, SubmitError, ValidationError};

pub use asset::{AssetType, Provenance};

pub use asset_client::{AssetClient, AssetStore};

pub use aggregator::{Catalog, ExtendedAggregator};

pub use listing::{ListView, Listable, SortField, PAGE_SIZE};

pub use forms::{
    AlbumDraft, ArtistDraft, Draft, FormDialog, FormField, LoginField, LoginForm, PlaylistDraft,
    SongDraft,
};

pub use content::{DetailView, song_count_label};

pub use types::{
    ActiveSection, Notification, NotificationKind, Screen, SelectedAsset, UiState,
};

pub use app_model::AppModel;
