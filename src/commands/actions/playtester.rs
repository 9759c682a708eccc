//! Playtester command handler.
//!
//! Toggles the subscription of the sender to the playtest alerts. Direct rooms
//! are refused since alerts are only sent in the testing room.

use log::debug;

use crate::{
    commands::{
        CommandContext, CommandResult,
        markdown_response::{
            format_playtester_added, format_playtester_refused, format_playtester_removed,
        },
    },
    subscribers::PlaytesterRegistry,
};

pub async fn handle_playtester(
    context: &CommandContext,
    playtesters: &PlaytesterRegistry,
) -> CommandResult {
    debug!("handling playtester command for {}", context.user_id);

    if context.is_direct {
        return CommandResult {
            response: format_playtester_refused(),
        };
    }

    let response = if playtesters.toggle(&context.user_id).await {
        format_playtester_added(&context.user_id)
    } else {
        format_playtester_removed(&context.user_id)
    };

    CommandResult { response }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn create_context(is_direct: bool) -> CommandContext {
        CommandContext {
            room_id: "!room:example.com".to_string(),
            user_id: "@alice:example.com".to_string(),
            is_direct,
        }
    }

    async fn create_registry(dir: &TempDir) -> PlaytesterRegistry {
        PlaytesterRegistry::new(dir.path().join("playtesters").to_str().unwrap().to_string()).await
    }

    #[tokio::test]
    async fn test_handle_playtester_toggles() {
        let dir = TempDir::new().unwrap();
        let registry = create_registry(&dir).await;
        let context = create_context(false);

        let result = handle_playtester(&context, &registry).await;
        assert_eq!(result.response, format_playtester_added("@alice:example.com"));
        assert_eq!(registry.get_playtesters().await, vec!["@alice:example.com"]);

        let result = handle_playtester(&context, &registry).await;
        assert_eq!(result.response, format_playtester_removed("@alice:example.com"));
        assert!(registry.get_playtesters().await.is_empty());
    }

    #[tokio::test]
    async fn test_handle_playtester_refused_in_direct_room() {
        let dir = TempDir::new().unwrap();
        let registry = create_registry(&dir).await;

        let result = handle_playtester(&create_context(true), &registry).await;

        assert_eq!(result.response, format_playtester_refused());
        assert!(registry.get_playtesters().await.is_empty());
    }
}
