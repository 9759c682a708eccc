//! Registry of the users mentioned by playtest alerts.

use std::collections::HashSet;

use log::info;
use tokio::sync::Mutex;

use crate::subscribers::playtester_loader::PlaytesterLoader;

/// Users subscribed to playtest alerts.
///
/// Every change is written to disk right away.
pub struct PlaytesterRegistry {
    playtesters: Mutex<HashSet<String>>,
    loader: PlaytesterLoader,
}

impl PlaytesterRegistry {
    /// Creates a registry from the subscriptions persisted at `path`.
    pub async fn new(path: String) -> Self {
        let loader = PlaytesterLoader::new(path);
        let playtesters = Mutex::new(loader.load().await);

        PlaytesterRegistry {
            playtesters,
            loader,
        }
    }

    /// Subscribes `user_id` if it is not subscribed, unsubscribes it otherwise.
    ///
    /// # Returns
    ///
    /// `true` if the user is subscribed after the call.
    pub async fn toggle(&self, user_id: &str) -> bool {
        let mut playtesters = self.playtesters.lock().await;

        let subscribed = if playtesters.remove(user_id) {
            info!("removed playtester {}", user_id);
            false
        } else {
            playtesters.insert(user_id.to_owned());
            info!("added playtester {}", user_id);
            true
        };

        self.loader.persist(&playtesters).await;
        subscribed
    }

    /// Returns the subscribed user ids, sorted.
    pub async fn get_playtesters(&self) -> Vec<String> {
        let mut playtesters: Vec<String> = self.playtesters.lock().await.iter().cloned().collect();
        playtesters.sort();
        playtesters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_path(dir: &TempDir) -> String {
        dir.path().join("playtesters").to_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_toggle_subscribes_then_unsubscribes() {
        let dir = TempDir::new().unwrap();
        let registry = PlaytesterRegistry::new(create_path(&dir)).await;

        assert!(registry.toggle("@alice:example.com").await);
        assert_eq!(registry.get_playtesters().await, vec!["@alice:example.com"]);

        assert!(!registry.toggle("@alice:example.com").await);
        assert!(registry.get_playtesters().await.is_empty());
    }

    #[tokio::test]
    async fn test_subscriptions_survive_restart() {
        let dir = TempDir::new().unwrap();
        let registry = PlaytesterRegistry::new(create_path(&dir)).await;
        registry.toggle("@bob:example.com").await;
        registry.toggle("@alice:example.com").await;
        drop(registry);

        let restored = PlaytesterRegistry::new(create_path(&dir)).await;

        assert_eq!(
            restored.get_playtesters().await,
            vec!["@alice:example.com", "@bob:example.com"]
        );
    }
}
