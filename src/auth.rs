//! Session handling: the Basic credential token, its on-disk copy and the shared handle
//! every outgoing request reads it from.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::Engine as _;
use tokio::sync::RwLock;

use crate::model::SessionError;

/// Build the token sent as `Authorization: Basic <token>`
pub fn encode_credentials(username: &str, password: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"))
}

pub fn authorization_value(token: &str) -> String {
    format!("Basic {token}")
}

/// Shared view of the active token. Cloned into the asset client and the controller.
#[derive(Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.token.read().await.is_some()
    }

    pub async fn authorization_header(&self) -> Option<String> {
        self.token().await.map(|t| authorization_value(&t))
    }

    async fn set(&self, token: Option<String>) {
        *self.token.write().await = token;
    }
}

/// Owns the credentials file and keeps the shared [`Session`] in step with it
pub struct SessionStore {
    path: PathBuf,
    session: Session,
}

impl SessionStore {
    /// Open the store, picking up a token persisted by an earlier run.
    /// An empty or missing file means logged out.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let session = Session::default();
        if let Some(token) = load_file(&path) {
            tracing::info!(path = %path.display(), "Restored saved session");
            session.set(Some(token)).await;
        }
        Self { path, session }
    }

    pub fn session(&self) -> Session {
        self.session.clone()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.session.is_logged_in().await
    }

    /// Derive the token from the credentials, persist it and make it active.
    /// The credentials are not checked here; callers probe the store first.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, SessionError> {
        let token = encode_credentials(username, password);
        store_file(&self.path, &token)?;
        self.session.set(Some(token.clone())).await;
        tracing::info!("Session started");
        Ok(token)
    }

    pub async fn logout(&self) -> Result<(), SessionError> {
        self.session.set(None).await;
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                SessionError::Io(format!("failed to delete {}: {e}", self.path.display()))
            })?;
        }
        tracing::info!("Session ended");
        Ok(())
    }
}

fn store_file(path: &Path, token: &str) -> Result<(), SessionError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| SessionError::Io(format!("mkdir {}: {e}", parent.display())))?;
        }
    }
    fs::write(path, token)
        .map_err(|e| SessionError::Io(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| SessionError::Io(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

fn load_file(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_base64_of_user_and_password() {
        assert_eq!(encode_credentials("admin", "secret"), "YWRtaW46c2VjcmV0");
        assert_eq!(authorization_value("YWRtaW46c2VjcmV0"), "Basic YWRtaW46c2VjcmV0");
    }

    #[tokio::test]
    async fn login_persists_and_logout_clears() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("nested").join("credentials");

        let store = SessionStore::open(&path).await;
        assert!(!store.is_logged_in().await);

        let token = store.login("admin", "secret").await.expect("login");
        assert!(store.is_logged_in().await);
        assert_eq!(std::fs::read_to_string(&path).expect("read"), token);
        assert_eq!(
            store.session().authorization_header().await.as_deref(),
            Some("Basic YWRtaW46c2VjcmV0")
        );

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).expect("metadata").permissions().mode() & 0o777;
            assert_eq!(mode, 0o600);
        }

        store.logout().await.expect("logout");
        assert!(!store.is_logged_in().await);
        assert!(!path.exists());
        assert_eq!(store.session().token().await, None);
    }

    #[tokio::test]
    async fn reopening_restores_saved_token() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("credentials");

        SessionStore::open(&path)
            .await
            .login("admin", "secret")
            .await
            .expect("login");

        let reopened = SessionStore::open(&path).await;
        assert_eq!(reopened.session().token().await.as_deref(), Some("YWRtaW46c2VjcmV0"));
    }

    #[tokio::test]
    async fn blank_file_means_logged_out() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("credentials");
        std::fs::write(&path, "  \n").expect("write");

        assert!(!SessionStore::open(&path).await.is_logged_in().await);
    }

    #[tokio::test]
    async fn logout_without_file_is_fine() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = SessionStore::open(tmp.path().join("credentials")).await;
        assert!(store.logout().await.is_ok());
    }

    #[tokio::test]
    async fn clones_share_the_token() {
        let session = Session::with_token("abc");
        let other = session.clone();
        session.set(None).await;
        assert!(!other.is_logged_in().await);
    }
}
