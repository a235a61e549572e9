//! Catalog reloads and detail views

use crate::model::{AssetType, DetailView};
use super::AppController;

impl AppController {
    /// Refetch all four collections. Failures become an error notification; the
    /// collections that did load are still shown.
    pub async fn refresh(&self) {
        let aggregator = self.model.lock().await.aggregator.clone();

        tracing::debug!("Refreshing catalog");
        if let Err(e) = aggregator.fetch_all().await {
            let model = self.model.lock().await;
            model.set_error(Self::format_error(&e)).await;
        }
    }

    /// Reload without blocking the input loop
    pub fn spawn_refresh(&self) {
        let controller = self.clone();
        tokio::spawn(async move {
            controller.refresh().await;
        });
    }

    pub async fn open_details(&self) {
        let model = self.model.lock().await;
        let Some(selected) = model.get_selected_asset().await else {
            return;
        };
        let catalog = model.get_catalog().await;

        let detail = match selected.asset_type {
            AssetType::Artist => catalog
                .artist(&selected.key)
                .map(|a| DetailView::Artist(catalog.artist_detail(a))),
            AssetType::Album => catalog
                .album(&selected.key)
                .map(|a| DetailView::Album(catalog.album_detail(a))),
            AssetType::Song => catalog
                .song(&selected.key)
                .map(|s| DetailView::Song(catalog.song_detail(s))),
            AssetType::Playlist => catalog
                .playlist(&selected.key)
                .map(|p| DetailView::Playlist(catalog.playlist_detail(p))),
        };

        if let Some(detail) = detail {
            tracing::debug!(asset_type = %selected.asset_type, key = %selected.key, "Opening details");
            model.show_detail(detail).await;
        }
    }
}
