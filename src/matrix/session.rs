//! On-disk persistence of the Matrix login.
//!
//! The data directory holds two entries:
//! - `sqlite/` - the SDK state and crypto store
//! - `session` - the login tokens and the last sync token, as JSON

use std::path::{Path, PathBuf};

use log::{debug, trace, warn};
use matrix_sdk::authentication::matrix::MatrixSession;
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    login: MatrixSession,

    #[serde(skip_serializing_if = "Option::is_none")]
    sync_token: Option<String>,
}

/// Login and sync position of the bot, read once at startup.
#[derive(Debug, Clone)]
pub struct SessionStore {
    stored: Option<StoredSession>,
    sqlite_path: PathBuf,
    session_path: PathBuf,
}

impl SessionStore {
    /// Opens the store located in `dir_path`.
    ///
    /// A missing or unreadable session file means the bot has to log in again.
    pub async fn open(dir_path: &Path) -> Self {
        let sqlite_path = dir_path.join("sqlite");
        let session_path = dir_path.join("session");
        debug!(
            "session store: sqlite at {}, session at {}",
            sqlite_path.display(),
            session_path.display()
        );

        let stored = match read_session(&session_path).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("ignoring stored session: {:#}", e);
                None
            }
        };

        SessionStore {
            stored,
            sqlite_path,
            session_path,
        }
    }

    pub fn sqlite_path(&self) -> &Path {
        &self.sqlite_path
    }

    /// Returns the stored login, if the bot already logged in once.
    pub fn login(&self) -> Option<&MatrixSession> {
        self.stored.as_ref().map(|stored| &stored.login)
    }

    pub fn sync_token(&self) -> Option<String> {
        self.stored.as_ref().and_then(|stored| stored.sync_token.clone())
    }

    /// Writes a fresh login to disk, forgetting any previous sync token.
    pub async fn save_login(&self, login: &MatrixSession) -> anyhow::Result<()> {
        trace!("saving login");
        self.write(&StoredSession {
            login: login.clone(),
            sync_token: None,
        })
        .await
    }

    /// Updates the sync token of the login stored on disk.
    pub async fn save_sync_token(&self, sync_token: String) -> anyhow::Result<()> {
        trace!("saving sync token {}", sync_token);

        let content = fs::read_to_string(&self.session_path).await?;
        let mut stored: StoredSession = serde_json::from_str(&content)?;
        stored.sync_token = Some(sync_token);

        self.write(&stored).await
    }

    async fn write(&self, stored: &StoredSession) -> anyhow::Result<()> {
        fs::write(&self.session_path, serde_json::to_string(stored)?).await?;
        Ok(())
    }
}

async fn read_session(session_path: &Path) -> anyhow::Result<Option<StoredSession>> {
    if !fs::try_exists(session_path).await? {
        return Ok(None);
    }

    let content = fs::read_to_string(session_path).await?;
    Ok(Some(serde_json::from_str(&content)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrix_sdk::{SessionMeta, SessionTokens};
    use tempfile::TempDir;

    fn create_login() -> MatrixSession {
        MatrixSession {
            meta: SessionMeta {
                user_id: "@herald:example.com".try_into().unwrap(),
                device_id: "HERALDDEVICE".into(),
            },
            tokens: SessionTokens {
                access_token: "access_token".to_string(),
                refresh_token: None,
            },
        }
    }

    #[tokio::test]
    async fn test_open_without_session() {
        let dir = TempDir::new().unwrap();

        let store = SessionStore::open(dir.path()).await;

        assert!(store.login().is_none());
        assert!(store.sync_token().is_none());
        assert_eq!(store.sqlite_path(), dir.path().join("sqlite"));
    }

    #[tokio::test]
    async fn test_open_with_invalid_session() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("session"), "{not json").await.unwrap();

        let store = SessionStore::open(dir.path()).await;

        assert!(store.login().is_none());
    }

    #[tokio::test]
    async fn test_save_login_then_sync_token() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path()).await;

        store.save_login(&create_login()).await.unwrap();
        store.save_sync_token("s72594_4483_1934".to_string()).await.unwrap();

        let reopened = SessionStore::open(dir.path()).await;
        assert_eq!(
            reopened.login().unwrap().meta.user_id.to_string(),
            "@herald:example.com"
        );
        assert_eq!(reopened.sync_token(), Some("s72594_4483_1934".to_string()));
    }

    #[tokio::test]
    async fn test_save_login_resets_sync_token() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path()).await;
        store.save_login(&create_login()).await.unwrap();
        store.save_sync_token("old".to_string()).await.unwrap();

        store.save_login(&create_login()).await.unwrap();

        let content = fs::read_to_string(dir.path().join("session")).await.unwrap();
        assert!(!content.contains("sync_token"));
    }

    #[tokio::test]
    async fn test_save_sync_token_without_login_fails() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path()).await;

        assert!(store.save_sync_token("token".to_string()).await.is_err());
    }
}
