//! Search command handler.

use log::debug;

use crate::{
    commands::{CommandContext, CommandResult, markdown_response::format_search_results},
    search::{PageFetcher, Searcher},
};

/// Handles the `search <series> <terms...>` command.
///
/// Results are only capped outside direct rooms.
pub async fn handle_search<F: PageFetcher>(
    context: &CommandContext,
    searcher: &Searcher<F>,
    series: &str,
    terms: &[String],
) -> CommandResult {
    debug!("handling search command in {}", context.room_id);

    let terms: Vec<&str> = terms.iter().map(String::as_str).collect();
    let results = searcher.search(series, &terms, context.is_direct).await;

    CommandResult {
        response: format_search_results(&results),
    }
}
