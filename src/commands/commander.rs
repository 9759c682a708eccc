//! Command orchestration and execution.
//!
//! This module provides the [`Commander`] struct, which serves as the main entry point
//! for processing bot commands. It coordinates command parsing and execution, routing
//! commands to their appropriate handlers.
//!
//! # Flow
//!
//! ```text
//! Matrix Message → parse() → Command → execute() → CommandResult
//! ```

use std::sync::Arc;

use command_parser::Parser;

use crate::{
    announcer::AnnouncementViewer,
    calendar::CalendarSource,
    commands::{
        CommandContext, CommandParseError, CommandResult,
        actions::{handle_help, handle_playtester, handle_search, handle_upcoming},
        command::{Command, format_command_error},
    },
    search::{PageFetcher, Searcher},
    subscribers::PlaytesterRegistry,
};

/// Command orchestrator for parsing and executing bot commands.
///
/// # Command Prefix
///
/// All commands must start with `!herald` followed by the subcommand name.
///
/// # Examples
///
/// ```no_run
/// let commander = Commander::new(viewer, searcher, playtesters);
/// let command = commander.parse("!herald upcoming")?;
/// let result = commander.execute(&command, &context).await;
/// ```
pub struct Commander<C: CalendarSource, F: PageFetcher> {
    parser: Parser,
    viewer: AnnouncementViewer<C>,
    searcher: Arc<Searcher<F>>,
    playtesters: Arc<PlaytesterRegistry>,
}

impl<C: CalendarSource, F: PageFetcher> Commander<C, F> {
    pub fn new(
        viewer: AnnouncementViewer<C>,
        searcher: Arc<Searcher<F>>,
        playtesters: Arc<PlaytesterRegistry>,
    ) -> Self {
        let parser = Parser::new('!', '-');
        Commander {
            parser,
            viewer,
            searcher,
            playtesters,
        }
    }

    /// Parses a message body into a command.
    ///
    /// # Errors
    ///
    /// * [`CommandParseError::NotForBot`] - The message is not a `!herald` command, no reply is expected
    /// * [`CommandParseError::InvalidCommand`] - The command is invalid, carries the reply to send
    pub fn parse(&self, body: &str) -> Result<Command, CommandParseError> {
        Command::parse(&self.parser, body).map_err(|error| match format_command_error(error) {
            Some(message) => CommandParseError::InvalidCommand(message),
            None => CommandParseError::NotForBot,
        })
    }

    /// Executes a parsed command and returns the reply.
    pub async fn execute(&self, command: &Command, context: &CommandContext) -> CommandResult {
        match command {
            Command::Help => handle_help(),
            Command::Upcoming => handle_upcoming(&self.viewer).await,
            Command::Playtester => handle_playtester(context, &self.playtesters).await,
            Command::Search(series, terms) => {
                handle_search(context, &self.searcher, series, terms).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono_tz::America;
    use tempfile::TempDir;

    use super::*;
    use crate::{
        announcer::{AnnouncementFormatter, Branding, MockChannelSink, PlaytestAnnouncer},
        calendar::{EventSnapshot, MockCalendarSource, NO_EVENT_TITLE},
        config,
        search::{MockPageFetcher, SearchSettings, TutorialCatalog},
    };

    async fn create_commander(dir: &TempDir) -> Commander<MockCalendarSource, MockPageFetcher> {
        let mut calendar = MockCalendarSource::new();
        calendar
            .expect_get_next_event()
            .returning(|| Ok(EventSnapshot::NotFound));

        let branding = Branding::from(&config::Branding::default());
        let formatter = AnnouncementFormatter::new(America::Chicago, branding);
        let announcer = PlaytestAnnouncer::new(
            Arc::new(calendar),
            MockChannelSink::new(),
            Arc::new(formatter),
            2,
        )
        .await;

        let searcher = Searcher::new(
            MockPageFetcher::new(),
            TutorialCatalog::default(),
            SearchSettings::from(&config::Search::default()),
        );
        let path = dir.path().join("playtesters").to_str().unwrap().to_string();

        Commander::new(
            announcer.viewer(),
            Arc::new(searcher),
            Arc::new(PlaytesterRegistry::new(path).await),
        )
    }

    fn create_test_context() -> CommandContext {
        CommandContext {
            room_id: "!room:example.com".to_string(),
            user_id: "@user:example.com".to_string(),
            is_direct: false,
        }
    }

    #[tokio::test]
    async fn test_parse_valid_commands() {
        let dir = TempDir::new().unwrap();
        let commander = create_commander(&dir).await;

        assert!(matches!(commander.parse("!herald help"), Ok(Command::Help)));
        assert!(matches!(commander.parse("!herald up"), Ok(Command::Upcoming)));
        assert!(matches!(commander.parse("!herald pt"), Ok(Command::Playtester)));
        assert!(matches!(
            commander.parse("!herald s all leak"),
            Ok(Command::Search(_, _))
        ));
    }

    #[tokio::test]
    async fn test_parse_invalid_command_returns_error() {
        let dir = TempDir::new().unwrap();
        let commander = create_commander(&dir).await;

        match commander.parse("!herald unknown_command") {
            Err(CommandParseError::InvalidCommand(msg)) => {
                assert!(msg.contains("Unknown command"));
            }
            other => panic!("Expected InvalidCommand error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_parse_invalid_search_returns_usage() {
        let dir = TempDir::new().unwrap();
        let commander = create_commander(&dir).await;

        match commander.parse("!herald search faq") {
            Err(CommandParseError::InvalidCommand(msg)) => assert!(msg.contains("Usage")),
            other => panic!("Expected InvalidCommand error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_parse_not_for_bot() {
        let dir = TempDir::new().unwrap();
        let commander = create_commander(&dir).await;

        assert!(matches!(
            commander.parse("!other_bot help"),
            Err(CommandParseError::NotForBot)
        ));
        assert!(matches!(
            commander.parse("This is just a regular message"),
            Err(CommandParseError::NotForBot)
        ));
    }

    #[tokio::test]
    async fn test_execute_help() {
        let dir = TempDir::new().unwrap();
        let commander = create_commander(&dir).await;

        let result = commander
            .execute(&Command::Help, &create_test_context())
            .await;

        assert!(result.response.contains("Commands:"));
    }

    #[tokio::test]
    async fn test_execute_upcoming() {
        let dir = TempDir::new().unwrap();
        let commander = create_commander(&dir).await;

        let result = commander
            .execute(&Command::Upcoming, &create_test_context())
            .await;

        assert!(result.response.contains(NO_EVENT_TITLE));
    }

    #[tokio::test]
    async fn test_execute_playtester() {
        let dir = TempDir::new().unwrap();
        let commander = create_commander(&dir).await;

        let result = commander
            .execute(&Command::Playtester, &create_test_context())
            .await;

        assert!(result.response.contains("you are now a playtester"));
    }

    #[tokio::test]
    async fn test_execute_search_unknown_series() {
        let dir = TempDir::new().unwrap();
        let commander = create_commander(&dir).await;

        let result = commander
            .execute(
                &Command::Search("v9".to_string(), vec!["leak".to_string()]),
                &create_test_context(),
            )
            .await;

        assert_eq!(result.response, "No results found.");
    }
}
