//! Create, edit and delete

use crate::model::{
    AlbumDraft, ArtistDraft, AssetType, Draft, FormDialog, PlaylistDraft, SongDraft,
};
use super::AppController;

impl AppController {
    /// First step of a delete: ask for confirmation of the highlighted row
    pub async fn request_delete(&self) {
        let model = self.model.lock().await;
        if let Some(selected) = model.get_selected_asset().await {
            model.request_delete(selected).await;
        }
    }

    pub async fn cancel_delete(&self) {
        let model = self.model.lock().await;
        model.take_pending_delete().await;
    }

    /// Second step: remove the asset, then reload everything. A rejected delete
    /// leaves the lists exactly as they were.
    pub async fn confirm_delete(&self) {
        let pending = self.model.lock().await.take_pending_delete().await;
        let Some(asset) = pending else {
            return;
        };

        match self.store.remove(asset.asset_type, &asset.key).await {
            Ok(()) => {
                tracing::info!(asset_type = %asset.asset_type, key = %asset.key, "Asset deleted");
                {
                    let model = self.model.lock().await;
                    model
                        .set_success(format!("{} \"{}\" deleted", asset.asset_type.label(), asset.name))
                        .await;
                }
                self.refresh().await;
            }
            Err(e) => {
                tracing::error!(asset_type = %asset.asset_type, key = %asset.key, error = %e, "Delete failed");
                let model = self.model.lock().await;
                model.set_error(Self::format_error(&e)).await;
            }
        }
    }

    /// Open an empty form for the active section
    pub async fn open_new_form(&self) {
        let model = self.model.lock().await;
        let state = model.get_ui_state().await;
        if let Some(asset_type) = state.active_section.asset_type() {
            model.open_form(FormDialog::new(Draft::new(asset_type))).await;
        }
    }

    /// Open a form pre-filled from the highlighted row
    pub async fn open_edit_form(&self) {
        let model = self.model.lock().await;
        let Some(selected) = model.get_selected_asset().await else {
            return;
        };
        let catalog = model.get_catalog().await;

        let draft = match selected.asset_type {
            AssetType::Artist => catalog
                .artist(&selected.key)
                .map(|a| Draft::Artist(ArtistDraft::from_existing(a))),
            AssetType::Album => catalog
                .album(&selected.key)
                .map(|a| Draft::Album(AlbumDraft::from_existing(a))),
            AssetType::Song => catalog
                .song(&selected.key)
                .map(|s| Draft::Song(SongDraft::from_existing(s))),
            AssetType::Playlist => catalog
                .playlist(&selected.key)
                .map(|p| Draft::Playlist(PlaylistDraft::from_existing(p))),
        };

        if let Some(draft) = draft {
            model.open_form(FormDialog::new(draft)).await;
        }
    }

    /// Validate and send the open form. On success the form closes and the catalog
    /// reloads; on failure it stays open for another try.
    pub async fn submit_form(&self) {
        let form = {
            let model = self.model.lock().await;
            match model.get_form().await {
                Some(form) if !form.submitting => {
                    model.update_form(|f| f.submitting = true).await;
                    form
                }
                _ => return,
            }
        };

        let asset_type = form.draft.asset_type();
        let verb = if form.draft.key().is_some() { "updated" } else { "created" };

        match form.draft.submit(self.store.as_ref()).await {
            Ok(_) => {
                tracing::info!(asset_type = %asset_type, verb, "Form submitted");
                {
                    let model = self.model.lock().await;
                    model.close_form().await;
                    model
                        .set_success(format!("{} {verb}", asset_type.label()))
                        .await;
                }
                self.refresh().await;
            }
            Err(e) => {
                tracing::warn!(asset_type = %asset_type, error = %e, "Form rejected");
                let model = self.model.lock().await;
                model.update_form(|f| f.submitting = false).await;
                model.set_error(Self::format_submit_error(&e)).await;
            }
        }
    }

    pub async fn cancel_form(&self) {
        let model = self.model.lock().await;
        model.close_form().await;
    }
}
