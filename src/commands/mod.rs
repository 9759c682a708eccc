//! Bot command parsing and response formatting.
//!
//! This module provides the complete command processing pipeline for the Herald bot,
//! letting Matrix users check the next playtest, subscribe to its alerts and search
//! the community tutorials.
//!
//! # Architecture
//!
//! ```text
//! Matrix Message
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Commander  │  ← Entry point: parse() + execute()
//! └─────────────┘
//!      │
//!      ├── parse() ──────────────► command::Command
//!      │
//!      └── execute() ────────────► Action Handlers
//!                                   - handle_help
//!                                   - handle_upcoming
//!                                   - handle_playtester
//!                                   - handle_search
//!                                        │
//!                                        ▼
//!                                  CommandResult (Markdown)
//! ```
//!
//! # Available Commands
//!
//! All commands use the `!herald` prefix:
//!
//! | Command | Alias | Arguments | Description |
//! |---------|-------|-----------|-------------|
//! | `help` | | None | Display available commands |
//! | `upcoming` | `up` | None | Display the next playtest |
//! | `playtester` | `pt` | None | Toggle the mentions in playtest alerts |
//! | `search` | `s` | `<series> <terms...>` | Search tutorials or the FAQ |
//!
//! # Error Handling
//!
//! - **Silent Errors** ([`CommandParseError::NotForBot`]): messages that aren't `!herald` commands
//! - **User Errors** ([`CommandParseError::InvalidCommand`]): unknown commands or missing
//!   arguments, answered with a Markdown message

mod actions;
mod command;
mod commander;
mod markdown_response;

pub use crate::commands::commander::Commander;

/// Execution context of a command.
#[derive(Debug)]
pub struct CommandContext {
    /// Matrix room ID where the command was issued
    pub room_id: String,
    /// Matrix user ID of the command issuer
    pub user_id: String,
    /// Whether the room only holds the issuer and the bot
    pub is_direct: bool,
}

/// Result of a command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Markdown-formatted response message
    pub response: String,
}

/// Errors returned by [`Commander::parse`].
#[derive(Debug)]
pub enum CommandParseError {
    /// Message is not for this bot (silent error)
    NotForBot,
    /// Invalid command syntax with error message
    InvalidCommand(String),
}
