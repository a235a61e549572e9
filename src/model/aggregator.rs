//! Fetches whole asset collections into an in-memory [`Catalog`] snapshot
//!
//! Nothing is cached between fetches: every call replaces the collections it managed
//! to load. When one of the concurrent searches fails the others are still applied and
//! the failed slot keeps its previous contents; the first error is returned.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::asset::{Album, Artist, AssetType, Playlist, Song};
use super::asset_client::{AssetStore, search_as};
use super::error::ApiError;

/// Flat lists of every asset the console knows about
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
    pub songs: Vec<Song>,
    pub playlists: Vec<Playlist>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
            && self.albums.is_empty()
            && self.songs.is_empty()
            && self.playlists.is_empty()
    }
}

/// Songs, albums and artists
#[derive(Clone)]
pub struct BasicAggregator {
    store: Arc<dyn AssetStore>,
    catalog: Arc<RwLock<Catalog>>,
    loading: Arc<RwLock<bool>>,
}

impl BasicAggregator {
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self {
            store,
            catalog: Arc::new(RwLock::new(Catalog::default())),
            loading: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn fetch_all(&self) -> Result<(), ApiError> {
        self.fetch_all_with(|| {}).await
    }

    /// Fetch songs, albums and artists concurrently, then run `on_complete` once,
    /// whether or not the fetch succeeded.
    pub async fn fetch_all_with<F: FnOnce() + Send>(&self, on_complete: F) -> Result<(), ApiError> {
        self.set_loading(true).await;
        let result = self.fetch_collections().await;
        self.set_loading(false).await;
        on_complete();
        result
    }

    async fn fetch_collections(&self) -> Result<(), ApiError> {
        let store = self.store.as_ref();
        let (songs, albums, artists) = futures::join!(
            search_as::<Song>(store, AssetType::Song),
            search_as::<Album>(store, AssetType::Album),
            search_as::<Artist>(store, AssetType::Artist),
        );

        let mut first_error = None;
        let mut catalog = self.catalog.write().await;
        apply(&mut catalog.songs, songs, &mut first_error);
        apply(&mut catalog.albums, albums, &mut first_error);
        apply(&mut catalog.artists, artists, &mut first_error);
        tracing::debug!(
            songs = catalog.songs.len(),
            albums = catalog.albums.len(),
            artists = catalog.artists.len(),
            "Basic collections refreshed"
        );

        first_error.map_or(Ok(()), Err)
    }

    async fn set_loading(&self, loading: bool) {
        *self.loading.write().await = loading;
    }

    pub async fn is_loading(&self) -> bool {
        *self.loading.read().await
    }

    pub async fn snapshot(&self) -> Catalog {
        self.catalog.read().await.clone()
    }

    /// Drop every collection, e.g. when the session ends
    pub async fn clear(&self) {
        *self.catalog.write().await = Catalog::default();
    }
}

/// The basic collections plus playlists. Shares its loading flag with the basic aggregator.
#[derive(Clone)]
pub struct ExtendedAggregator {
    basic: BasicAggregator,
}

impl ExtendedAggregator {
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self {
            basic: BasicAggregator::new(store),
        }
    }

    pub async fn fetch_all(&self) -> Result<(), ApiError> {
        self.fetch_all_with(|| {}).await
    }

    pub async fn fetch_all_with<F: FnOnce() + Send>(&self, on_complete: F) -> Result<(), ApiError> {
        self.basic.set_loading(true).await;

        let store = self.basic.store.as_ref();
        let (basic, playlists) = futures::join!(
            self.basic.fetch_collections(),
            search_as::<Playlist>(store, AssetType::Playlist),
        );

        let mut first_error = basic.err();
        {
            let mut catalog = self.basic.catalog.write().await;
            apply(&mut catalog.playlists, playlists, &mut first_error);
        }

        self.basic.set_loading(false).await;
        on_complete();

        match first_error {
            Some(e) => {
                tracing::warn!(error = %e, "Catalog refresh incomplete");
                Err(e)
            }
            None => Ok(()),
        }
    }

    pub async fn is_loading(&self) -> bool {
        self.basic.is_loading().await
    }

    pub async fn snapshot(&self) -> Catalog {
        self.basic.snapshot().await
    }

    pub async fn clear(&self) {
        self.basic.clear().await;
    }
}

fn apply<T>(slot: &mut Vec<T>, fetched: Result<Vec<T>, ApiError>, first_error: &mut Option<ApiError>) {
    match fetched {
        Ok(items) => *slot = items,
        Err(e) => {
            if first_error.is_none() {
                *first_error = Some(e);
            }
        }
    }
}
