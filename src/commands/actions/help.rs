//! Help command handler.

use log::debug;

use crate::commands::{CommandResult, markdown_response::format_help};

/// Handles the `help` command.
pub fn handle_help() -> CommandResult {
    debug!("handling help command");

    CommandResult {
        response: format_help(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_help() {
        let result = handle_help();
        assert!(result.response.contains("Commands:"));
    }
}
