//! Markdown replies of the bot commands.

use crate::search::SearchResult;

/// Returns the help message listing every command.
pub fn format_help() -> String {
    let body = "Commands:\n\
        - `upcoming` (`up`): show the next scheduled playtest\n\
        - `playtester` (`pt`): subscribe to or unsubscribe from the playtest alerts\n\
        - `search <series> <terms...>` (`s`): search tutorials, or the FAQ with the `faq` series\n\
        - `help`: show this help message\n\n\
        Series: `v2`, `bc`, `3ds`, `written`, `v1`, `ht`, `faq`, or `all` for every tutorial series except `v1`.\n\n\
        Playtesters are mentioned one hour before a playtest and when it starts.";

    body.to_owned()
}

pub fn format_unknown_command() -> String {
    "Unknown command. Type `!herald help` for more information.".to_owned()
}

pub fn format_invalid_search() -> String {
    "Invalid search command. Usage: `!herald search <series> <terms...>`".to_owned()
}

pub fn format_playtester_added(user_id: &str) -> String {
    format!(
        "{}: you are now a playtester and will be mentioned in the playtest alerts.",
        user_id
    )
}

pub fn format_playtester_removed(user_id: &str) -> String {
    format!(
        "{}: you are no longer a playtester and won't be mentioned in the playtest alerts.",
        user_id
    )
}

pub fn format_playtester_refused() -> String {
    "The playtester subscription can't be changed from a direct room, send the command in a community room."
        .to_owned()
}

/// Formats the search results, one section per result.
pub fn format_search_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "No results found.".to_owned();
    }

    results
        .iter()
        .map(|result| {
            let mut sections = vec![format!("### [{}]({})", result.title, result.url)];
            if !result.description.is_empty() {
                sections.push(result.description.clone());
            }
            if let Some(image_url) = &result.image_url {
                sections.push(format!("[Image]({})", image_url));
            }
            sections.join("\n\n")
        })
        .collect::<Vec<String>>()
        .join("\n\n---\n\n")
}
