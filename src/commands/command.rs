//! Command parsing.
//!
//! This module converts Matrix message text into structured [`Command`] enums
//! that can be executed by the [`Commander`](crate::commands::Commander).

use command_parser::{Command as ParserCommand, Parser};
use log::debug;

use crate::commands::markdown_response::{format_invalid_search, format_unknown_command};

/// Represents a parsed bot command.
#[derive(Debug, Hash, PartialEq, Eq)]
pub enum Command {
    /// Display help information
    Help,
    /// Display the next playtest
    Upcoming,
    /// Toggle the playtester subscription of the sender
    Playtester,
    /// Search tutorials or the FAQ
    ///
    /// # Fields
    ///
    /// * `String` - Series alias
    /// * `Vec<String>` - Search terms
    Search(String, Vec<String>),
}

/// Errors that can occur during command parsing.
#[derive(Debug)]
pub enum CommandParsingError {
    /// The message could not be parsed as a command
    UnableToParse,
    /// The command is not for this bot (wrong prefix)
    NotHerald,
    /// The command is not recognized
    Unknown,
    /// The search command is missing its series or terms
    InvalidSearch,
}

impl Command {
    /// Parses a message string into a Command.
    ///
    /// # Arguments
    ///
    /// * `parser` - The command parser instance configured for the bot
    /// * `body` - The message text to parse
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The message is not a command format - [`CommandParsingError::UnableToParse`]
    /// - The command is for a different bot - [`CommandParsingError::NotHerald`]
    /// - The command is not recognized - [`CommandParsingError::Unknown`]
    /// - Search command has missing arguments - [`CommandParsingError::InvalidSearch`]
    pub fn parse(parser: &Parser, body: &str) -> Result<Self, CommandParsingError> {
        // The parser ignores the last word, so a dummy word is added at the end
        let body = body.to_string() + " dummy";

        let command = match parser.parse(&body) {
            Ok(cmd) => cmd,
            Err(_) => return Err(CommandParsingError::UnableToParse),
        };

        if command.name != "herald" {
            return Err(CommandParsingError::NotHerald);
        }

        debug!("Parsing command: {:?}", command);

        if command.arguments.is_empty() {
            return Ok(Command::Help);
        }

        match command.arguments[0].to_lowercase().as_str() {
            "help" => Ok(Command::Help),
            "upcoming" | "up" => Ok(Command::Upcoming),
            "playtester" | "pt" => Ok(Command::Playtester),
            "search" | "s" => {
                let (series, terms) = Self::parse_search(&command)?;
                Ok(Command::Search(series, terms))
            }
            _ => Err(CommandParsingError::Unknown),
        }
    }

    fn parse_search(command: &ParserCommand) -> Result<(String, Vec<String>), CommandParsingError> {
        // search, series and at least one term
        if command.arguments.len() < 3 {
            return Err(CommandParsingError::InvalidSearch);
        }

        let series = command.arguments[1].clone();
        let terms = command.arguments[2..].to_vec();

        debug!("Parsed search command - series: {}, terms: {:?}", series, terms);

        Ok((series, terms))
    }
}

/// Formats a command error into a user-friendly message.
///
/// Errors on messages that are not meant for the bot produce no message.
pub fn format_command_error(error: CommandParsingError) -> Option<String> {
    match error {
        CommandParsingError::Unknown => Some(format_unknown_command()),
        CommandParsingError::InvalidSearch => Some(format_invalid_search()),
        CommandParsingError::UnableToParse | CommandParsingError::NotHerald => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_parser() -> Parser {
        Parser::new('!', '-')
    }

    #[test]
    fn test_parse_help_command() {
        let parser = create_parser();
        assert!(matches!(
            Command::parse(&parser, "!herald help"),
            Ok(Command::Help)
        ));
    }

    #[test]
    fn test_parse_help_command_no_args() {
        let parser = create_parser();
        assert!(matches!(
            Command::parse(&parser, "!herald"),
            Ok(Command::Help)
        ));
    }

    #[test]
    fn test_parse_upcoming_command_and_alias() {
        let parser = create_parser();
        assert!(matches!(
            Command::parse(&parser, "!herald upcoming"),
            Ok(Command::Upcoming)
        ));
        assert!(matches!(
            Command::parse(&parser, "!herald up"),
            Ok(Command::Upcoming)
        ));
    }

    #[test]
    fn test_parse_playtester_command_and_alias() {
        let parser = create_parser();
        assert!(matches!(
            Command::parse(&parser, "!herald playtester"),
            Ok(Command::Playtester)
        ));
        assert!(matches!(
            Command::parse(&parser, "!herald pt"),
            Ok(Command::Playtester)
        ));
    }

    #[test]
    fn test_parse_search_command() {
        let parser = create_parser();
        let result = Command::parse(&parser, "!herald search v2 lighting skybox");
        assert!(matches!(
            result,
            Ok(Command::Search(series, terms))
            if series == "v2" && terms == vec!["lighting", "skybox"]
        ));
    }

    #[test]
    fn test_parse_search_alias() {
        let parser = create_parser();
        let result = Command::parse(&parser, "!herald s faq leak");
        assert!(matches!(
            result,
            Ok(Command::Search(series, terms)) if series == "faq" && terms == vec!["leak"]
        ));
    }

    #[test]
    fn test_parse_search_command_missing_terms() {
        let parser = create_parser();
        assert!(matches!(
            Command::parse(&parser, "!herald search v2"),
            Err(CommandParsingError::InvalidSearch)
        ));
        assert!(matches!(
            Command::parse(&parser, "!herald search"),
            Err(CommandParsingError::InvalidSearch)
        ));
    }

    #[test]
    fn test_parse_unknown_command() {
        let parser = create_parser();
        assert!(matches!(
            Command::parse(&parser, "!herald games"),
            Err(CommandParsingError::Unknown)
        ));
    }

    #[test]
    fn test_parse_not_herald_command() {
        let parser = create_parser();
        assert!(matches!(
            Command::parse(&parser, "!miou help"),
            Err(CommandParsingError::NotHerald)
        ));
    }

    #[test]
    fn test_parse_unable_to_parse() {
        let parser = create_parser();
        assert!(matches!(
            Command::parse(&parser, "When is the next playtest?"),
            Err(CommandParsingError::UnableToParse)
        ));
    }

    #[test]
    fn test_format_command_error() {
        assert!(
            format_command_error(CommandParsingError::Unknown)
                .unwrap()
                .contains("Unknown command")
        );
        assert!(
            format_command_error(CommandParsingError::InvalidSearch)
                .unwrap()
                .contains("Usage")
        );
        assert!(format_command_error(CommandParsingError::UnableToParse).is_none());
        assert!(format_command_error(CommandParsingError::NotHerald).is_none());
    }
}
