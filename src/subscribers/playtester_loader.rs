//! Persistence of the playtester subscriptions.
//!
//! Subscriptions are stored as a JSON array of Matrix user ids.

use std::collections::HashSet;

use log::{error, info, warn};
use tokio::fs;

/// Loads and saves the playtester subscriptions.
///
/// Loading never fails: a missing or corrupted file gives an empty set.
///
/// # Examples
///
/// ```no_run
/// let loader = PlaytesterLoader::new("data/playtesters".to_string());
/// let playtesters = loader.load().await;
/// loader.persist(&playtesters).await;
/// ```
#[derive(Clone)]
pub struct PlaytesterLoader {
    /// Path to the JSON file where subscriptions are stored
    path: String,
}

impl PlaytesterLoader {
    pub fn new(path: String) -> Self {
        PlaytesterLoader { path }
    }

    /// Loads the subscribed user ids.
    pub async fn load(&self) -> HashSet<String> {
        let Ok(serialized) = fs::read_to_string(&self.path).await else {
            warn!("no persisted playtesters found, starting without subscribers");
            return HashSet::new();
        };

        let Ok(playtesters) = serde_json::from_str::<HashSet<String>>(&serialized) else {
            error!("failed to deserialize persisted playtesters, starting without subscribers");
            return HashSet::new();
        };

        info!("loaded {} persisted playtesters", playtesters.len());

        playtesters
    }

    /// Saves the subscribed user ids, sorted for stable output.
    ///
    /// Errors are logged and not propagated.
    pub async fn persist(&self, playtesters: &HashSet<String>) {
        let mut sorted: Vec<&String> = playtesters.iter().collect();
        sorted.sort();

        let serialized = match serde_json::to_string(&sorted) {
            Ok(serialized) => serialized,
            Err(e) => {
                error!("failed to serialize playtesters: {}", e);
                return;
            }
        };

        if let Err(e) = fs::write(&self.path, &serialized).await {
            error!("failed to persist playtesters to {}: {}", self.path, e);
            return;
        }

        info!("persisted {} playtesters", playtesters.len());
    }
}
