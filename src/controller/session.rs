//! Login and logout

use crate::auth::encode_credentials;
use crate::model::Screen;
use super::AppController;

impl AppController {
    /// Check the typed credentials against the store and, if accepted, start a session
    pub async fn submit_login(&self) {
        let login = {
            let model = self.model.lock().await;
            let state = model.get_ui_state().await;
            if state.login.submitting {
                return;
            }
            if let Err(e) = state.login.validate() {
                model.set_error(e.to_string()).await;
                return;
            }
            model.ui_state.lock().await.login.submitting = true;
            state.login
        };

        let token = encode_credentials(&login.username, &login.password);
        if let Err(e) = self.store.probe(&token).await {
            tracing::warn!(error = %e, "Login rejected");
            let model = self.model.lock().await;
            model.ui_state.lock().await.login.submitting = false;
            model.set_error(Self::format_error(&e)).await;
            return;
        }

        if let Err(e) = self.sessions.login(&login.username, &login.password).await {
            tracing::error!(error = %e, "Could not save session");
            let model = self.model.lock().await;
            model.ui_state.lock().await.login.submitting = false;
            model.set_error(e.to_string()).await;
            return;
        }

        {
            let model = self.model.lock().await;
            {
                let mut state = model.ui_state.lock().await;
                state.login = Default::default();
            }
            model.set_screen(Screen::Catalog).await;
            model.set_success(format!("Logged in as {}", login.username)).await;
        }
        self.refresh().await;
    }

    pub async fn logout(&self) {
        let result = self.sessions.logout().await;

        let model = self.model.lock().await;
        model.aggregator.clear().await;
        model.reset_for_login().await;
        match result {
            Ok(()) => model.set_success("Logged out".to_string()).await,
            Err(e) => {
                tracing::error!(error = %e, "Could not remove saved session");
                model.set_error(e.to_string()).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use tokio::sync::Mutex;

    use super::super::tests::{controller_with, who_store};
    use super::AppController;
    use crate::auth::SessionStore;
    use crate::model::aggregator::tests::{FakeStore, who_records};
    use crate::model::{ApiError, AppModel, ExtendedAggregator, NotificationKind, Screen};

    async fn logged_out(store: Arc<FakeStore>, dir: &tempfile::TempDir) -> AppController {
        let sessions = SessionStore::open(dir.path().join("credentials")).await;
        let model = AppModel::new(ExtendedAggregator::new(store.clone()), false);
        AppController::new(Arc::new(Mutex::new(model)), store, Arc::new(sessions))
    }

    async fn type_credentials(controller: &AppController, username: &str, password: &str) {
        let model = controller.model.lock().await;
        let mut state = model.ui_state.lock().await;
        state.login.username = username.to_string();
        state.login.password = password.to_string();
    }

    #[tokio::test]
    async fn missing_password_is_caught_before_probing() {
        let dir = tempfile::TempDir::new().expect("tmp dir");
        let store = Arc::new(FakeStore::default());
        let controller = logged_out(store.clone(), &dir).await;
        type_credentials(&controller, "admin", "").await;

        controller.submit_login().await;

        let state = controller.model.lock().await.get_ui_state().await;
        assert_eq!(store.calls(), 0);
        assert_eq!(state.screen, Screen::Login);
        assert_eq!(state.notification.map(|n| n.message), Some("Password is required".to_string()));
    }

    #[tokio::test]
    async fn rejected_probe_stays_on_login_and_saves_nothing() {
        let dir = tempfile::TempDir::new().expect("tmp dir");
        let store = Arc::new(FakeStore::default());
        *store.probe_error.lock().unwrap() =
            Some(ApiError::status(403, Some("invalid credentials".to_string())));
        let controller = logged_out(store, &dir).await;
        type_credentials(&controller, "admin", "wrong").await;

        controller.submit_login().await;

        let state = controller.model.lock().await.get_ui_state().await;
        assert_eq!(state.screen, Screen::Login);
        assert!(!state.login.submitting);
        assert_eq!(state.notification.map(|n| n.message), Some("invalid credentials".to_string()));
        assert!(!dir.path().join("credentials").exists());
        assert!(!controller.sessions.is_logged_in().await);
    }

    #[tokio::test]
    async fn accepted_login_persists_token_and_loads_catalog() {
        let dir = tempfile::TempDir::new().expect("tmp dir");
        let store = Arc::new(FakeStore::with(who_records()));
        let controller = logged_out(store.clone(), &dir).await;
        type_credentials(&controller, "admin", "secret").await;

        controller.submit_login().await;

        let model = controller.model.lock().await;
        let state = model.get_ui_state().await;
        assert_eq!(state.screen, Screen::Catalog);
        assert_eq!(state.login.password, "");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("credentials")).expect("token file"),
            "YWRtaW46c2VjcmV0"
        );
        assert_eq!(model.get_catalog().await.artists.len(), 1);
        // probe plus four searches
        assert_eq!(store.calls(), 5);
    }

    #[tokio::test]
    async fn logout_clears_session_and_catalog() {
        let dir = tempfile::TempDir::new().expect("tmp dir");
        let controller = controller_with(who_store(), &dir).await;

        controller.logout().await;

        let model = controller.model.lock().await;
        let state = model.get_ui_state().await;
        assert_eq!(state.screen, Screen::Login);
        assert_eq!(state.notification.map(|n| n.kind), Some(NotificationKind::Success));
        assert!(model.get_catalog().await.artists.is_empty());
        assert!(!controller.sessions.is_logged_in().await);
        assert!(!dir.path().join("credentials").exists());
    }
}
