//! Command action handlers.
//!
//! Individual handler functions for each bot command. Each handler receives
//! what it needs from the [`Commander`](crate::commands::Commander), processes
//! the command, and returns a [`CommandResult`](crate::commands::CommandResult).
//!
//! # Available Handlers
//!
//! - [`handle_help`] - Display help information
//! - [`handle_upcoming`] - Display the next playtest
//! - [`handle_playtester`] - Toggle the playtester subscription
//! - [`handle_search`] - Search tutorials and the FAQ

mod help;
mod playtester;
mod search;
mod upcoming;

pub use crate::commands::actions::{
    help::handle_help, playtester::handle_playtester, search::handle_search,
    upcoming::handle_upcoming,
};
