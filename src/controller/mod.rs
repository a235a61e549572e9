//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and drives the asset store.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `navigation`: Catalog reloads and detail views
//! - `mutations`: Create/edit forms and deletion
//! - `session`: Login and logout

mod input;
mod navigation;
mod mutations;
mod session;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::auth::SessionStore;
use crate::model::{ApiError, AppModel, AssetStore, SubmitError};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) store: Arc<dyn AssetStore>,
    pub(crate) sessions: Arc<SessionStore>,
}

impl AppController {
    pub fn new(
        model: Arc<Mutex<AppModel>>,
        store: Arc<dyn AssetStore>,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self {
            model,
            store,
            sessions,
        }
    }

    pub(crate) fn format_error(error: &ApiError) -> String {
        match error {
            ApiError::Status { status: 401, message } => {
                format!("{message}. Log out and sign in again.")
            }
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Transport(detail) => format!("Could not reach the asset store: {detail}"),
            ApiError::NotAuthenticated => "Not logged in".to_string(),
            ApiError::Decode(_) => format!("Error: {error}"),
        }
    }

    pub(crate) fn format_submit_error(error: &SubmitError) -> String {
        match error {
            SubmitError::Validation(e) => e.to_string(),
            SubmitError::Api(e) => Self::format_error(e),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::ExtendedAggregator;
    use crate::model::aggregator::tests::{FakeStore, who_records};

    /// Controller over a fake store, logged in, with the catalog already loaded
    pub(crate) async fn controller_with(
        store: Arc<FakeStore>,
        dir: &tempfile::TempDir,
    ) -> AppController {
        let sessions = SessionStore::open(dir.path().join("credentials")).await;
        sessions.login("admin", "secret").await.expect("login");
        let aggregator = ExtendedAggregator::new(store.clone());
        aggregator.fetch_all().await.expect("fetch");
        let model = Arc::new(Mutex::new(AppModel::new(aggregator, true)));
        AppController::new(model, store, Arc::new(sessions))
    }

    pub(crate) fn who_store() -> Arc<FakeStore> {
        Arc::new(FakeStore::with(who_records()))
    }

    #[test]
    fn store_message_is_shown_verbatim() {
        let err = ApiError::status(404, Some("song s9 does not exist".to_string()));
        assert_eq!(AppController::format_error(&err), "song s9 does not exist");
    }

    #[test]
    fn unauthorized_gets_a_hint() {
        let err = ApiError::status(401, None);
        assert!(AppController::format_error(&err).contains("sign in again"));
    }

    #[test]
    fn unauthorized_keeps_the_store_message() {
        let err = ApiError::status(401, Some("token expired for admin".to_string()));
        assert_eq!(
            AppController::format_error(&err),
            "token expired for admin. Log out and sign in again."
        );
    }

    #[test]
    fn validation_errors_are_shown_as_is() {
        let err = SubmitError::Validation(crate::model::ValidationError::Required("Name"));
        assert_eq!(AppController::format_submit_error(&err), "Name is required");
    }
}
